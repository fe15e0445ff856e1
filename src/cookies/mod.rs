//! Cookie string codec.
//!
//! Reads the host's serialized cookie string (`a=1; b=2`) and builds the
//! single-cookie assignments written back to it.
//!
//! | Piece | Type | Responsibility |
//! |-------|------|----------------|
//! | [`codec`] | [`CookieCodec`](codec::CookieCodec) | lookup, parse, serialize |
//! | [`escape`] | | percent-escaping shared by both directions |
//! | [`attributes`] | [`CookieAttributes`](attributes::CookieAttributes) | write-only attributes, HTTP-date |
//! | [`config`] | [`CodecConfig`](config::CodecConfig) | malformed segment policy |
//!
//! # Example
//!
//! ```rust
//! use libcookie::cookies::attributes::CookieAttributes;
//! use libcookie::cookies::codec::CookieCodec;
//!
//! let codec = CookieCodec::new();
//! let assignment = codec.serialize("theme", "dark mode", &CookieAttributes::new().path("/"))?;
//! assert_eq!(assignment, "theme=dark%20mode; path=/");
//!
//! let value = codec.lookup("lang=en; theme=dark%20mode", "theme")?;
//! assert_eq!(value.as_deref(), Some("dark mode"));
//! # Ok::<(), libcookie::base::error::CookieError>(())
//! ```

pub mod attributes;
pub mod codec;
pub mod config;
pub mod escape;
