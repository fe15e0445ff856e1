//! Base types and error handling.
//!
//! - [`CookieError`](error::CookieError): the error taxonomy shared by the
//!   codec and the host adapter.

pub mod error;

#[cfg(test)]
mod tests;
