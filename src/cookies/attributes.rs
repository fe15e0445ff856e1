//! Write-only cookie attributes and HTTP-date handling.

use crate::base::error::CookieError;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Optional attributes attached to a cookie assignment.
///
/// Serialized in a fixed order (`expires`, `path`, `domain`, `secure`) and
/// only when present. Never produced by the read path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieAttributes {
    pub expires: Option<OffsetDateTime>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
}

impl CookieAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute expiry.
    pub fn expires(mut self, at: OffsetDateTime) -> Self {
        self.expires = Some(at);
        self
    }

    /// Set the path attribute.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the domain attribute.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set or clear the secure flag.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

/// Render a timestamp as an HTTP-date in GMT.
///
/// Years outside 1..=9999 have no HTTP-date form.
pub fn format_http_date(at: OffsetDateTime) -> Result<String, CookieError> {
    let utc = at
        .checked_to_offset(UtcOffset::UTC)
        .ok_or_else(|| CookieError::validation("expires", "a date between years 1 and 9999"))?;
    if !(1..=9999).contains(&utc.year()) {
        return Err(CookieError::validation(
            "expires",
            "a date between years 1 and 9999",
        ));
    }
    utc.format(HTTP_DATE)
        .map_err(|_| CookieError::validation("expires", "a date representable as HTTP-date"))
}

/// Parse an HTTP-date (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn parse_http_date(text: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(text.trim(), HTTP_DATE)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Parse either an HTTP-date or an RFC 3339 timestamp.
pub fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    parse_http_date(text).or_else(|| OffsetDateTime::parse(text.trim(), &Rfc3339).ok())
}

/// Convert host-style milliseconds since the Unix epoch.
pub fn from_unix_millis(millis: f64) -> Option<OffsetDateTime> {
    if !millis.is_finite() {
        return None;
    }
    // Whole milliseconds stay exact; only the sub-millisecond part is scaled.
    let whole = millis.trunc();
    let sub_ms = ((millis - whole) * 1_000_000.0).round() as i64;
    let offset = Duration::milliseconds(whole as i64).checked_add(Duration::nanoseconds(sub_ms))?;
    OffsetDateTime::UNIX_EPOCH.checked_add(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_epoch() {
        assert_eq!(
            format_http_date(OffsetDateTime::UNIX_EPOCH).unwrap(),
            "Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }

    #[test]
    fn test_format_converts_to_gmt() {
        let local = datetime!(1994-11-06 10:49:37 +02:00);
        assert_eq!(
            format_http_date(local).unwrap(),
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );
    }

    #[test]
    fn test_format_rejects_year_zero() {
        let ancient = datetime!(0000-06-01 00:00:00 UTC);
        assert!(matches!(
            format_http_date(ancient),
            Err(CookieError::Validation {
                field: "expires",
                ..
            })
        ));
    }

    #[test]
    fn test_format_rejects_offset_past_year_9999() {
        // 23:00 at -05:00 is already year 10000 in UTC.
        let late = datetime!(9999-12-31 23:00:00 -05:00);
        assert!(matches!(
            format_http_date(late),
            Err(CookieError::Validation {
                field: "expires",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_http_date() {
        assert_eq!(
            parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT"),
            Some(datetime!(1994-11-06 08:49:37 UTC))
        );
        assert_eq!(parse_http_date("yesterday"), None);
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        assert_eq!(
            parse_timestamp("2030-01-02T03:04:05Z"),
            Some(datetime!(2030-01-02 03:04:05 UTC))
        );
    }

    #[test]
    fn test_from_unix_millis() {
        assert_eq!(from_unix_millis(0.0), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(
            from_unix_millis(784_111_777_000.0),
            Some(datetime!(1994-11-06 08:49:37 UTC))
        );
        assert_eq!(
            from_unix_millis(1_700_000_000_123.0),
            Some(datetime!(2023-11-14 22:13:20.123 UTC))
        );
        assert_eq!(
            from_unix_millis(-1.5),
            Some(OffsetDateTime::UNIX_EPOCH - Duration::microseconds(1_500))
        );
        assert_eq!(from_unix_millis(f64::NAN), None);
        assert_eq!(from_unix_millis(f64::INFINITY), None);
        assert_eq!(from_unix_millis(1e30), None);
    }

    #[test]
    fn test_builder() {
        let attrs = CookieAttributes::new()
            .path("/x")
            .domain("example.com")
            .secure(true);
        assert_eq!(attrs.path.as_deref(), Some("/x"));
        assert_eq!(attrs.domain.as_deref(), Some("example.com"));
        assert!(attrs.secure);
        assert!(attrs.expires.is_none());
        assert_eq!(CookieAttributes::default(), CookieAttributes::new());
    }
}
