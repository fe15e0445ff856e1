//! Host binding adapter.
//!
//! Everything between a scripting host and the codec lives here: the host
//! value model, argument guards, the cookie store collaborator and the
//! namespace installation. The [`cookies`](crate::cookies) module does not
//! depend on any of it.
//!
//! ```rust
//! use libcookie::host::binding::{install, LibCookie, NAMESPACE};
//! use libcookie::host::scope::HostScope;
//! use libcookie::host::store::DocumentCookieStore;
//! use libcookie::host::value::HostValue;
//! use std::sync::Arc;
//!
//! let scope = HostScope::new();
//! scope.set("document", HostValue::object([("cookie", HostValue::from("id=42"))]));
//!
//! let lib = LibCookie::new(DocumentCookieStore::new(scope.clone()));
//! install(&scope, Arc::new(lib));
//!
//! let get = scope.get(NAMESPACE).and_then(|ns| ns.get("get").cloned()).unwrap();
//! get.invoke(&[
//!     HostValue::from("id"),
//!     HostValue::function(|args| {
//!         assert_eq!(args[0], HostValue::from("42"));
//!         HostValue::Undefined
//!     }),
//! ]);
//! ```

pub mod args;
pub mod binding;
pub mod scope;
pub mod store;
pub mod value;
