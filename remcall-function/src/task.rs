//! Running invocations off the async runtime's worker threads.

use std::sync::Arc;

use remcall_types::InvocationResult;
use tokio::task::JoinHandle;

use crate::function::RemoteFunction;

/// Execute `function` on tokio's blocking pool.
///
/// The native call blocks, so it must not run on a runtime worker. The
/// same re-entrancy rule applies: a second spawn while the first is still
/// in flight resolves to a `Rejected` result.
///
/// Must be called from within a tokio runtime.
pub fn spawn_execute(function: Arc<RemoteFunction>) -> JoinHandle<InvocationResult> {
    tokio::task::spawn_blocking(move || function.execute())
}
