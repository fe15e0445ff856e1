//! # libcookie
//!
//! Read and write browser cookies through the host's serialized cookie
//! string.
//!
//! The core is a pure codec: it finds a value in a `key1=value1; key2=value2`
//! string and builds the single assignment (`key=value; expires=...; path=...;
//! domain=...; secure`) a host cookie store accepts. Storage stays with the
//! host; this crate performs no I/O and keeps no state between calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use libcookie::cookies::attributes::CookieAttributes;
//! use libcookie::host::binding::LibCookie;
//! use libcookie::host::store::InMemoryCookieStore;
//!
//! let lib = LibCookie::new(InMemoryCookieStore::new());
//! let written = lib.set_value("id", "42", &CookieAttributes::new().path("/"))?;
//! assert_eq!(written, "id=42; path=/");
//! assert_eq!(lib.get_value("id")?.as_deref(), Some("42"));
//! # Ok::<(), libcookie::base::error::CookieError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy
//! - [`cookies`] - Codec, escaping, attributes and configuration
//! - [`host`] - Host values, argument guards, cookie stores and the
//!   `libcookie` namespace binding

pub mod base;
pub mod cookies;
pub mod host;
