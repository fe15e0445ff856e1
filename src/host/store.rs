//! Host cookie store collaborator.
//!
//! The codec never touches storage; a [`CookieStore`] supplies the current
//! serialized cookie string and accepts one assignment at a time. Two
//! emulations are provided for native embedders and tests:
//!
//! - [`InMemoryCookieStore`]: a standalone cookie string.
//! - [`DocumentCookieStore`]: `document.cookie` inside a [`HostScope`].
//!
//! Both merge assignments the way a browser's `document.cookie` setter does:
//! replace by name, append otherwise, drop when `expires` has passed.

use crate::base::error::CookieError;
use crate::cookies::attributes::parse_http_date;
use crate::cookies::codec::PAIR_SEPARATOR;
use crate::host::scope::HostScope;
use crate::host::value::HostValue;
use parking_lot::Mutex;
use std::sync::Arc;
use time::OffsetDateTime;

pub trait CookieStore {
    /// The full serialized cookie string currently held by the host.
    fn read_cookie_string(&self) -> Result<String, CookieError>;

    /// Commit one assignment (`name=value; attr...`).
    fn write_cookie_string(&self, serialized: &str) -> Result<(), CookieError>;
}

impl<S: CookieStore + ?Sized> CookieStore for Arc<S> {
    fn read_cookie_string(&self) -> Result<String, CookieError> {
        (**self).read_cookie_string()
    }

    fn write_cookie_string(&self, serialized: &str) -> Result<(), CookieError> {
        (**self).write_cookie_string(serialized)
    }
}

impl<S: CookieStore + ?Sized> CookieStore for &S {
    fn read_cookie_string(&self) -> Result<String, CookieError> {
        (**self).read_cookie_string()
    }

    fn write_cookie_string(&self, serialized: &str) -> Result<(), CookieError> {
        (**self).write_cookie_string(serialized)
    }
}

/// Apply one assignment to an existing cookie string.
///
/// Attributes other than `expires` are not retained, matching what a host
/// cookie string reports back.
pub fn merge_assignment(existing: &str, assignment: &str) -> Result<String, CookieError> {
    merge_assignment_at(existing, assignment, OffsetDateTime::now_utc())
}

fn merge_assignment_at(
    existing: &str,
    assignment: &str,
    now: OffsetDateTime,
) -> Result<String, CookieError> {
    let mut parts = assignment.split(';');
    let pair = parts.next().unwrap_or_default().trim();
    let Some((name, _)) = pair.split_once('=') else {
        return Err(CookieError::validation(
            "cookie",
            "a name=value assignment",
        ));
    };

    let expired = parts
        .filter_map(|attr| attr.trim().split_once('='))
        .filter(|(attr, _)| attr.eq_ignore_ascii_case("expires"))
        .filter_map(|(_, date)| parse_http_date(date))
        .any(|expires| expires <= now);

    let mut replaced = false;
    let mut merged: Vec<&str> = Vec::new();
    for segment in existing.split(PAIR_SEPARATOR).filter(|s| !s.is_empty()) {
        let segment_name = segment.split_once('=').map_or(segment, |(n, _)| n);
        if segment_name != name {
            merged.push(segment);
        } else if !expired && !replaced {
            merged.push(pair);
            replaced = true;
        }
    }
    if !expired && !replaced {
        merged.push(pair);
    }

    tracing::debug!(name = %name, expired, replaced, "merged cookie assignment");
    Ok(merged.join(PAIR_SEPARATOR))
}

/// A cookie string held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCookieStore {
    cookies: Mutex<String>,
}

impl InMemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing serialized string, e.g. one captured from a browser.
    pub fn with_cookie_string(cookies: impl Into<String>) -> Self {
        Self {
            cookies: Mutex::new(cookies.into()),
        }
    }

    pub fn clear(&self) {
        self.cookies.lock().clear();
    }
}

impl CookieStore for InMemoryCookieStore {
    fn read_cookie_string(&self) -> Result<String, CookieError> {
        Ok(self.cookies.lock().clone())
    }

    fn write_cookie_string(&self, serialized: &str) -> Result<(), CookieError> {
        let mut cookies = self.cookies.lock();
        *cookies = merge_assignment(&cookies, serialized)?;
        Ok(())
    }
}

/// `document.cookie` of a host global scope.
#[derive(Clone)]
pub struct DocumentCookieStore {
    scope: HostScope,
}

impl DocumentCookieStore {
    pub fn new(scope: HostScope) -> Self {
        Self { scope }
    }
}

fn document_cookie(document: Option<&HostValue>) -> Result<&str, CookieError> {
    let document = match document {
        Some(HostValue::Object(document)) => document,
        _ => {
            return Err(CookieError::unavailable(
                "No document property of global object",
            ))
        }
    };
    document
        .get("cookie")
        .and_then(HostValue::as_str)
        .ok_or_else(|| CookieError::unavailable("document.cookie is not a string"))
}

impl CookieStore for DocumentCookieStore {
    fn read_cookie_string(&self) -> Result<String, CookieError> {
        self.scope
            .with_globals(|globals| document_cookie(globals.get("document")).map(str::to_string))
    }

    fn write_cookie_string(&self, serialized: &str) -> Result<(), CookieError> {
        self.scope.with_globals(|globals| -> Result<(), CookieError> {
            let merged = merge_assignment(document_cookie(globals.get("document"))?, serialized)?;
            if let Some(HostValue::Object(document)) = globals.get_mut("document") {
                document.insert("cookie".to_string(), HostValue::String(merged));
            }
            Ok(())
        })
    }
}
