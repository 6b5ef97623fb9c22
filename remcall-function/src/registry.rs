//! Function registry: register, look up, and execute remote functions.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use remcall_hooks::TracingSink;
use remcall_types::{
    ConfigError, Connection, ConnectionConfig, Connector, InvocationResult, NativeFault,
    NotificationSink, ParamError,
};
use thiserror::Error;

use crate::call_spec::CallSpec;
use crate::function::RemoteFunction;

/// Errors from registry operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No function is registered under that name.
    #[error("function not found: {0}")]
    NotFound(String),

    /// A function with that name is already registered.
    #[error("function already registered: {0}")]
    Duplicate(String),

    /// The call spec could not be instantiated.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// The connection configuration is invalid.
    #[error("invalid connection config: {0}")]
    Config(#[from] ConfigError),

    /// Opening the connection failed.
    #[error("connect failed: {0}")]
    Connect(#[from] NativeFault),
}

/// Remote functions sharing one connection handle and one notification sink.
///
/// Functions keep registration order. Every function registered after a
/// connection is bound gets that connection; [`bind_connection`] rebinds
/// all of them.
///
/// [`bind_connection`]: Self::bind_connection
pub struct FunctionRegistry {
    functions: Vec<Arc<RemoteFunction>>,
    index: HashMap<String, usize>,
    sink: Arc<dyn NotificationSink>,
    offline_mode: bool,
    connection: Option<Arc<dyn Connection>>,
}

impl FunctionRegistry {
    /// Create an empty registry notifying through [`TracingSink`].
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
            index: HashMap::new(),
            sink: Arc::new(TracingSink::new()),
            offline_mode: false,
            connection: None,
        }
    }

    /// Notify through `sink`. Applies to functions registered afterwards.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Build functions in offline mode. Applies to functions registered afterwards.
    #[must_use]
    pub fn offline(mut self, offline_mode: bool) -> Self {
        self.offline_mode = offline_mode;
        self
    }

    /// Bind `connection` before registering.
    #[must_use]
    pub fn with_connection(mut self, connection: Arc<dyn Connection>) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Instantiate `spec` and register it.
    pub fn register(&mut self, spec: CallSpec) -> Result<Arc<RemoteFunction>, RegistryError> {
        if self.index.contains_key(&spec.name) {
            return Err(RegistryError::Duplicate(spec.name));
        }
        let mut function = RemoteFunction::new(spec)?
            .offline(self.offline_mode)
            .with_sink(Arc::clone(&self.sink));
        if let Some(connection) = &self.connection {
            function = function.with_connection(Arc::clone(connection));
        }
        self.register_function(Arc::new(function))
    }

    /// Register a prebuilt function as-is.
    ///
    /// Its sink and offline mode are left alone; the registry's current
    /// connection, if any, is bound to it.
    pub fn register_function(
        &mut self,
        function: Arc<RemoteFunction>,
    ) -> Result<Arc<RemoteFunction>, RegistryError> {
        let name = function.name().to_owned();
        if self.index.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        if let Some(connection) = &self.connection {
            function.bind_connection(Some(Arc::clone(connection)));
        }
        tracing::debug!(function = %name, "remcall.registry.register");
        self.index.insert(name, self.functions.len());
        self.functions.push(Arc::clone(&function));
        Ok(function)
    }

    /// Register every spec in order, stopping at the first error.
    pub fn register_all(
        &mut self,
        specs: impl IntoIterator<Item = CallSpec>,
    ) -> Result<(), RegistryError> {
        for spec in specs {
            self.register(spec)?;
        }
        Ok(())
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<Arc<RemoteFunction>> {
        self.index.get(name).map(|&i| Arc::clone(&self.functions[i]))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name()).collect()
    }

    /// Functions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RemoteFunction>> {
        self.functions.iter()
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Specs of every registered function, in registration order.
    pub fn definitions(&self) -> Vec<CallSpec> {
        self.functions.iter().map(|f| f.definition().clone()).collect()
    }

    /// Every tag in use, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.functions
            .iter()
            .flat_map(|f| f.tags().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Functions carrying `tag`.
    pub fn with_tag(&self, tag: &str) -> Vec<Arc<RemoteFunction>> {
        self.functions
            .iter()
            .filter(|f| f.has_tag(tag))
            .cloned()
            .collect()
    }

    /// Functions carrying every one of `tags`.
    pub fn with_all_tags(&self, tags: &[&str]) -> Vec<Arc<RemoteFunction>> {
        self.functions
            .iter()
            .filter(|f| tags.iter().all(|t| f.has_tag(t)))
            .cloned()
            .collect()
    }

    /// Execute the function registered as `name`.
    pub fn execute(&self, name: &str) -> Result<InvocationResult, RegistryError> {
        let function = self
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))?;
        Ok(function.execute())
    }

    /// Rebind every function, clearing their last results.
    pub fn bind_connection(&mut self, connection: Option<Arc<dyn Connection>>) {
        for function in &self.functions {
            function.bind_connection(connection.clone());
        }
        tracing::debug!(
            functions = self.functions.len(),
            bound = connection.is_some(),
            "remcall.registry.rebind"
        );
        self.connection = connection;
    }

    /// The connection currently bound.
    pub fn connection(&self) -> Option<Arc<dyn Connection>> {
        self.connection.clone()
    }

    /// Validate `config`, open a connection, and bind it to every function.
    pub fn connect(
        &mut self,
        connector: &dyn Connector,
        config: &ConnectionConfig,
    ) -> Result<Arc<dyn Connection>, RegistryError> {
        config.validate()?;
        let connection = connector.connect(config)?;
        tracing::info!(
            host = %config.host,
            timeout_ms = config.timeout.as_millis(),
            "remcall.registry.connected"
        );
        self.bind_connection(Some(Arc::clone(&connection)));
        Ok(connection)
    }

    /// Unbind the connection from every function.
    pub fn disconnect(&mut self) {
        self.bind_connection(None);
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .field("offline_mode", &self.offline_mode)
            .field("connected", &self.connection.is_some())
            .finish()
    }
}
