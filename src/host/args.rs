//! Argument guards for host calls.
//!
//! Each guard fails fast; nothing is parsed or written until every argument
//! has passed. Positions in errors are 1-based, indices taken here are 0-based.

use crate::base::error::CookieError;
use crate::cookies::attributes::{from_unix_millis, parse_timestamp, CookieAttributes};
use crate::host::value::{HostFunction, HostObject, HostValue, ValueKind};
use time::OffsetDateTime;

/// Fail with an arity error when fewer than `required` arguments were passed.
pub fn check_arity(args: &[HostValue], required: usize) -> Result<(), CookieError> {
    if args.len() < required {
        return Err(CookieError::arity(required, args.len()));
    }
    Ok(())
}

fn arg(args: &[HostValue], index: usize) -> Result<&HostValue, CookieError> {
    args.get(index)
        .ok_or_else(|| CookieError::arity(index + 1, args.len()))
}

fn mismatch(index: usize, expected: ValueKind, actual: &HostValue) -> CookieError {
    CookieError::type_mismatch(index + 1, expected.as_str(), actual.kind().as_str())
}

pub fn expect_string(args: &[HostValue], index: usize) -> Result<&str, CookieError> {
    let value = arg(args, index)?;
    value
        .as_str()
        .ok_or_else(|| mismatch(index, ValueKind::String, value))
}

pub fn expect_function(args: &[HostValue], index: usize) -> Result<&HostFunction, CookieError> {
    match arg(args, index)? {
        HostValue::Function(f) => Ok(f),
        other => Err(mismatch(index, ValueKind::Function, other)),
    }
}

/// An options object, or `None` for `null`/`undefined`.
pub fn expect_options(args: &[HostValue], index: usize) -> Result<Option<&HostObject>, CookieError> {
    match arg(args, index)? {
        HostValue::Object(o) => Ok(Some(o)),
        v if v.is_nullish() => Ok(None),
        other => Err(mismatch(index, ValueKind::Object, other)),
    }
}

/// Convert a host options object into [`CookieAttributes`].
///
/// `null`/`undefined` fields are treated as absent. Unknown keys are ignored.
pub fn attributes_from_host(options: Option<&HostObject>) -> Result<CookieAttributes, CookieError> {
    let mut attributes = CookieAttributes::new();
    let Some(options) = options else {
        return Ok(attributes);
    };

    for (name, value) in options {
        if value.is_nullish() {
            continue;
        }
        match name.as_str() {
            "expires" => attributes.expires = Some(expires_from_host(value)?),
            "path" => attributes.path = Some(string_field("path", value)?),
            "domain" => attributes.domain = Some(string_field("domain", value)?),
            "secure" => match value {
                HostValue::Bool(b) => attributes.secure = *b,
                _ => return Err(CookieError::validation("secure", "Boolean")),
            },
            unknown => tracing::debug!(option = %unknown, "ignoring unknown cookie option"),
        }
    }

    Ok(attributes)
}

/// Accepts a host date, epoch milliseconds, or an HTTP-date / RFC 3339 string.
pub fn expires_from_host(value: &HostValue) -> Result<OffsetDateTime, CookieError> {
    let parsed = match value {
        HostValue::Date(d) => Some(*d),
        HostValue::Number(ms) => from_unix_millis(*ms),
        HostValue::String(s) => parse_timestamp(s),
        _ => None,
    };
    parsed.ok_or_else(|| {
        CookieError::validation(
            "expires",
            "a Date, epoch milliseconds or an HTTP-date/RFC 3339 String",
        )
    })
}

fn string_field(field: &'static str, value: &HostValue) -> Result<String, CookieError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CookieError::validation(field, "String"))
}
