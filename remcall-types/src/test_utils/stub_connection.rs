//! StubConnection: scripted replies, recorded calls.

use crate::connection::{Connection, NativeReply};
use crate::error::NativeFault;
use crate::value::ParamValue;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// One call the stub received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Native function name.
    pub function: String,
    /// Arguments in declared order.
    pub args: Vec<ParamValue>,
}

/// A [`Connection`] that answers from a script.
///
/// Queued replies are consumed first, in order; once the queue is empty
/// every call gets the fallback reply (status 0, no outputs, unless
/// changed with [`StubConnection::fallback`]).
pub struct StubConnection {
    connected: AtomicBool,
    queue: Mutex<VecDeque<Result<NativeReply, NativeFault>>>,
    fallback: Mutex<Result<NativeReply, NativeFault>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubConnection {
    /// A connected stub answering status 0 with no outputs.
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            queue: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(Ok(NativeReply::ok(Vec::new()))),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A stub that reports not-connected.
    pub fn disconnected() -> Self {
        let stub = Self::new();
        stub.set_connected(false);
        stub
    }

    /// A connected stub whose fallback reply is `reply`.
    pub fn replying(reply: NativeReply) -> Self {
        let stub = Self::new();
        stub.fallback(Ok(reply));
        stub
    }

    /// A connected stub whose fallback is `fault`.
    pub fn faulting(fault: NativeFault) -> Self {
        let stub = Self::new();
        stub.fallback(Err(fault));
        stub
    }

    /// Change the reported connection state.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Replace the fallback reply.
    pub fn fallback(&self, reply: Result<NativeReply, NativeFault>) {
        *self.fallback.lock().unwrap() = reply;
    }

    /// Queue a one-shot reply.
    pub fn push_reply(&self, reply: Result<NativeReply, NativeFault>) {
        self.queue.lock().unwrap().push_back(reply);
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for StubConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for StubConnection {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn call(&self, function: &str, args: &[ParamValue]) -> Result<NativeReply, NativeFault> {
        self.calls.lock().unwrap().push(RecordedCall {
            function: function.to_owned(),
            args: args.to_vec(),
        });
        if let Some(reply) = self.queue.lock().unwrap().pop_front() {
            return reply;
        }
        self.fallback.lock().unwrap().clone()
    }
}
