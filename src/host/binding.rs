//! `get`/`set`/`remove` as host-callable functions.
//!
//! [`LibCookie`] validates host arguments, runs the codec against a
//! [`CookieStore`] and invokes the completion callback with the result. On
//! any failure the error is logged and returned, and the callback is not
//! invoked. [`install`] is the only place that touches the global namespace.

use crate::base::error::CookieError;
use crate::cookies::attributes::CookieAttributes;
use crate::cookies::codec::CookieCodec;
use crate::cookies::config::CodecConfig;
use crate::host::args::{
    attributes_from_host, check_arity, expect_function, expect_options, expect_string,
};
use crate::host::scope::HostScope;
use crate::host::store::CookieStore;
use crate::host::value::HostValue;
use std::sync::Arc;

/// Global name the bindings are installed under.
pub const NAMESPACE: &str = "libcookie";

pub struct LibCookie<S> {
    codec: CookieCodec,
    store: S,
}

impl<S: CookieStore> LibCookie<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, CodecConfig::default())
    }

    pub fn with_config(store: S, config: CodecConfig) -> Self {
        Self {
            codec: CookieCodec::with_config(config),
            store,
        }
    }

    pub fn codec(&self) -> &CookieCodec {
        &self.codec
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up `key` in the live store string.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, CookieError> {
        let raw = self.store.read_cookie_string()?;
        self.codec.lookup(&raw, key)
    }

    /// Serialize and commit one cookie. Returns the exact string written.
    pub fn set_value(
        &self,
        key: &str,
        value: &str,
        attributes: &CookieAttributes,
    ) -> Result<String, CookieError> {
        let serialized = self.codec.serialize(key, value, attributes)?;
        self.store.write_cookie_string(&serialized)?;
        tracing::debug!(key = %key, "cookie written");
        Ok(serialized)
    }

    /// Commit a removal assignment for `key`. Returns the exact string written.
    pub fn remove_value(
        &self,
        key: &str,
        attributes: &CookieAttributes,
    ) -> Result<String, CookieError> {
        let serialized = self.codec.serialize_removal(key, attributes)?;
        self.store.write_cookie_string(&serialized)?;
        tracing::debug!(key = %key, "cookie removed");
        Ok(serialized)
    }

    /// Host entry point: `get(key, callback)`.
    ///
    /// The callback receives the value, or `null` when the key is absent.
    pub fn get(&self, args: &[HostValue]) -> Result<(), CookieError> {
        report("get", self.try_get(args))
    }

    /// Host entry point: `set(key, value, options, callback)`.
    ///
    /// The callback receives the assignment that was written.
    pub fn set(&self, args: &[HostValue]) -> Result<(), CookieError> {
        report("set", self.try_set(args))
    }

    /// Host entry point: `remove(key, options, callback)`.
    pub fn remove(&self, args: &[HostValue]) -> Result<(), CookieError> {
        report("remove", self.try_remove(args))
    }

    fn try_get(&self, args: &[HostValue]) -> Result<(), CookieError> {
        check_arity(args, 2)?;
        let key = expect_string(args, 0)?;
        let callback = expect_function(args, 1)?;

        let value = self.get_value(key)?;
        callback(&[HostValue::from(value)]);
        Ok(())
    }

    fn try_set(&self, args: &[HostValue]) -> Result<(), CookieError> {
        check_arity(args, 4)?;
        let key = expect_string(args, 0)?;
        let value = expect_string(args, 1)?;
        let options = expect_options(args, 2)?;
        let callback = expect_function(args, 3)?;
        let attributes = attributes_from_host(options)?;

        let written = self.set_value(key, value, &attributes)?;
        callback(&[HostValue::String(written)]);
        Ok(())
    }

    fn try_remove(&self, args: &[HostValue]) -> Result<(), CookieError> {
        check_arity(args, 3)?;
        let key = expect_string(args, 0)?;
        let options = expect_options(args, 1)?;
        let callback = expect_function(args, 2)?;
        let attributes = attributes_from_host(options)?;

        let written = self.remove_value(key, &attributes)?;
        callback(&[HostValue::String(written)]);
        Ok(())
    }
}

fn report(call: &'static str, result: Result<(), CookieError>) -> Result<(), CookieError> {
    if let Err(err) = &result {
        tracing::warn!(
            call,
            kind = err.kind(),
            code = err.as_i32(),
            error = %err,
            "libcookie call failed"
        );
    }
    result
}

/// Attach the `libcookie` namespace (`get`, `set`, `remove`) to `scope`.
///
/// Host functions return `undefined`; failures only reach the log.
pub fn install<S>(scope: &HostScope, lib: Arc<LibCookie<S>>)
where
    S: CookieStore + Send + Sync + 'static,
{
    let get = Arc::clone(&lib);
    let set = Arc::clone(&lib);
    let remove = lib;

    let namespace = HostValue::object([
        (
            "get",
            HostValue::function(move |args| {
                let _ = get.get(args);
                HostValue::Undefined
            }),
        ),
        (
            "set",
            HostValue::function(move |args| {
                let _ = set.set(args);
                HostValue::Undefined
            }),
        ),
        (
            "remove",
            HostValue::function(move |args| {
                let _ = remove.remove(args);
                HostValue::Undefined
            }),
        ),
    ]);

    scope.set(NAMESPACE, namespace);
    tracing::debug!(namespace = NAMESPACE, "cookie bindings installed");
}
