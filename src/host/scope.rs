//! Host global scope.

use crate::host::value::{HostObject, HostValue};
use parking_lot::Mutex;
use std::sync::Arc;

/// The host's global object: a shared, mutable property bag.
///
/// Cloning yields another handle to the same scope.
#[derive(Clone, Default)]
pub struct HostScope {
    globals: Arc<Mutex<HostObject>>,
}

impl HostScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a global property.
    pub fn get(&self, name: &str) -> Option<HostValue> {
        self.globals.lock().get(name).cloned()
    }

    pub fn set(&self, name: impl Into<String>, value: HostValue) {
        self.globals.lock().insert(name.into(), value);
    }

    /// Run `f` with exclusive access to the globals.
    ///
    /// Do not invoke host functions from inside `f`; they may need the scope.
    pub fn with_globals<R>(&self, f: impl FnOnce(&mut HostObject) -> R) -> R {
        f(&mut self.globals.lock())
    }
}
