use crate::base::error::CookieError;
use crate::cookies::attributes::{format_http_date, CookieAttributes};
use crate::cookies::config::{CodecConfig, MalformedSegmentPolicy};
use crate::cookies::escape::{escape, unescape};
use std::str::Split;
use time::OffsetDateTime;

/// Separator between pairs in a host cookie string.
pub const PAIR_SEPARATOR: &str = "; ";

/// One `name=value` pair read from a cookie string, value unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieEntry {
    pub name: String,
    pub value: String,
}

/// Parses host cookie strings and builds cookie assignments.
///
/// Stateless apart from its configuration; every call is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieCodec {
    config: CodecConfig,
}

impl CookieCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Find the first entry named `key` and unescape its value.
    ///
    /// `Ok(None)` means not found. Only the matched value is decoded, so a
    /// broken escape elsewhere in the string does not affect the lookup.
    pub fn lookup(&self, raw: &str, key: &str) -> Result<Option<String>, CookieError> {
        for (name, value) in self.segments(raw) {
            if name == key {
                return unescape(value)
                    .map(Some)
                    .map_err(|e| CookieError::decode(key, e));
            }
        }

        tracing::debug!(key = %key, "cookie not found");
        Ok(None)
    }

    /// All well-formed entries in host order.
    pub fn parse(&self, raw: &str) -> Result<Vec<CookieEntry>, CookieError> {
        self.segments(raw)
            .map(|(name, value)| -> Result<CookieEntry, CookieError> {
                let value = unescape(value).map_err(|e| CookieError::decode(name, e))?;
                Ok(CookieEntry {
                    name: name.to_string(),
                    value,
                })
            })
            .collect()
    }

    /// Names of all well-formed entries in host order. Values are not decoded.
    pub fn keys(&self, raw: &str) -> Vec<String> {
        self.segments(raw)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Build `key=escaped(value)` followed by the present attributes.
    pub fn serialize(
        &self,
        key: &str,
        value: &str,
        attributes: &CookieAttributes,
    ) -> Result<String, CookieError> {
        validate_key(key)?;

        let expires = attributes.expires.map(format_http_date).transpose()?;
        if let Some(path) = &attributes.path {
            validate_attribute("path", path)?;
        }
        if let Some(domain) = &attributes.domain {
            validate_attribute("domain", domain)?;
        }

        let mut out = format!("{}={}", key, escape(value));
        if let Some(expires) = expires {
            out.push_str("; expires=");
            out.push_str(&expires);
        }
        if let Some(path) = &attributes.path {
            out.push_str("; path=");
            out.push_str(path);
        }
        if let Some(domain) = &attributes.domain {
            out.push_str("; domain=");
            out.push_str(domain);
        }
        if attributes.secure {
            out.push_str("; secure");
        }

        Ok(out)
    }

    /// Build an assignment that makes the host drop `key`.
    ///
    /// The value is emptied and `expires` forced to the Unix epoch; path,
    /// domain and secure are kept so the same cookie is targeted.
    pub fn serialize_removal(
        &self,
        key: &str,
        attributes: &CookieAttributes,
    ) -> Result<String, CookieError> {
        let attributes = attributes.clone().expires(OffsetDateTime::UNIX_EPOCH);
        self.serialize(key, "", &attributes)
    }

    fn segments<'a>(&self, raw: &'a str) -> Segments<'a> {
        Segments {
            inner: raw.split(PAIR_SEPARATOR),
            policy: self.config.malformed_segments,
            done: false,
        }
    }
}

/// Iterator over `(name, raw_value)` pairs honoring the malformed segment policy.
struct Segments<'a> {
    inner: Split<'a, &'static str>,
    policy: MalformedSegmentPolicy,
    done: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for segment in self.inner.by_ref() {
            if let Some(pair) = segment.split_once('=') {
                return Some(pair);
            }
            match self.policy {
                MalformedSegmentPolicy::Skip => {
                    if !segment.is_empty() {
                        tracing::trace!(segment = %segment, "skipping malformed cookie segment");
                    }
                }
                MalformedSegmentPolicy::Stop => {
                    tracing::debug!(segment = %segment, "malformed cookie segment, stopping scan");
                    self.done = true;
                    return None;
                }
            }
        }

        None
    }
}

/// Keys must be usable verbatim in an assignment.
fn validate_key(key: &str) -> Result<(), CookieError> {
    let token_safe = !key.is_empty()
        && key
            .chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, ';' | '=' | ','));
    if token_safe {
        Ok(())
    } else {
        Err(CookieError::validation(
            "key",
            "a non-empty token without ';', '=', ',' or whitespace",
        ))
    }
}

fn validate_attribute(field: &'static str, value: &str) -> Result<(), CookieError> {
    if value.chars().any(|c| c == ';' || c.is_control()) {
        return Err(CookieError::validation(
            field,
            "a String without ';' or control characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn stop_codec() -> CookieCodec {
        CookieCodec::with_config(CodecConfig::new().malformed_segments(MalformedSegmentPolicy::Stop))
    }

    #[test]
    fn test_lookup_found() {
        let codec = CookieCodec::new();
        assert_eq!(
            codec.lookup("a=1; b=2; c=3", "b").unwrap(),
            Some("2".to_string())
        );
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let codec = CookieCodec::new();
        assert_eq!(
            codec.lookup("a=first; a=second", "a").unwrap(),
            Some("first".to_string())
        );
    }

    #[test]
    fn test_lookup_splits_on_first_equals() {
        let codec = CookieCodec::new();
        assert_eq!(
            codec.lookup("token=abc==; x=1", "token").unwrap(),
            Some("abc==".to_string())
        );
    }

    #[test]
    fn test_lookup_missing() {
        let codec = CookieCodec::new();
        assert_eq!(codec.lookup("a=1", "b").unwrap(), None);
        assert_eq!(codec.lookup("", "b").unwrap(), None);
        assert_eq!(codec.lookup(";;;", "b").unwrap(), None);
    }

    #[test]
    fn test_lookup_empty_value() {
        let codec = CookieCodec::new();
        assert_eq!(codec.lookup("a=; b=2", "a").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_lookup_unescapes() {
        let codec = CookieCodec::new();
        assert_eq!(
            codec.lookup("msg=hello%3B%20world", "msg").unwrap(),
            Some("hello; world".to_string())
        );
    }

    #[test]
    fn test_lookup_decode_error() {
        let codec = CookieCodec::new();
        let err = codec.lookup("bad=%zz", "bad").unwrap_err();
        assert!(matches!(err, CookieError::Decode { ref key, .. } if key == "bad"));
    }

    #[test]
    fn test_lookup_ignores_broken_neighbours() {
        let codec = CookieCodec::new();
        assert_eq!(
            codec.lookup("bad=%zz; good=ok", "good").unwrap(),
            Some("ok".to_string())
        );
    }

    #[test]
    fn test_skip_policy_scans_past_malformed() {
        let codec = CookieCodec::new();
        assert_eq!(
            codec.lookup("junk; a=1", "a").unwrap(),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_stop_policy_halts_at_malformed() {
        let codec = stop_codec();
        assert_eq!(codec.lookup("junk; a=1", "a").unwrap(), None);
        assert_eq!(
            codec.lookup("a=1; junk; b=2", "a").unwrap(),
            Some("1".to_string())
        );
        assert_eq!(codec.lookup("a=1; junk; b=2", "b").unwrap(), None);
    }

    #[test]
    fn test_parse_entries() {
        let codec = CookieCodec::new();
        let entries = codec.parse("a=1; junk; b=x%20y").unwrap();
        assert_eq!(
            entries,
            vec![
                CookieEntry {
                    name: "a".to_string(),
                    value: "1".to_string()
                },
                CookieEntry {
                    name: "b".to_string(),
                    value: "x y".to_string()
                },
            ]
        );
        assert_eq!(stop_codec().parse("a=1; junk; b=2").unwrap().len(), 1);
    }

    #[test]
    fn test_parse_decode_error() {
        let codec = CookieCodec::new();
        assert!(matches!(
            codec.parse("a=1; b=%4"),
            Err(CookieError::Decode { ref key, .. }) if key == "b"
        ));
    }

    #[test]
    fn test_keys() {
        let codec = CookieCodec::new();
        assert_eq!(codec.keys("a=1; b=%zz; c"), vec!["a", "b"]);
        assert!(codec.keys("").is_empty());
    }

    #[test]
    fn test_serialize_plain() {
        let codec = CookieCodec::new();
        assert_eq!(
            codec.serialize("id", "42", &CookieAttributes::new()).unwrap(),
            "id=42"
        );
        assert_eq!(
            codec.serialize("id", "", &CookieAttributes::new()).unwrap(),
            "id="
        );
    }

    #[test]
    fn test_serialize_secure_only() {
        let codec = CookieCodec::new();
        let attrs = CookieAttributes::new().secure(true);
        assert_eq!(codec.serialize("a", "b", &attrs).unwrap(), "a=b; secure");
    }

    #[test]
    fn test_serialize_path_and_domain() {
        let codec = CookieCodec::new();
        let attrs = CookieAttributes::new().path("/x").domain("example.com");
        assert_eq!(
            codec.serialize("a", "b", &attrs).unwrap(),
            "a=b; path=/x; domain=example.com"
        );
    }

    #[test]
    fn test_serialize_attribute_order() {
        let codec = CookieCodec::new();
        let attrs = CookieAttributes::new()
            .secure(true)
            .domain("example.com")
            .path("/")
            .expires(datetime!(2030-01-01 00:00:00 UTC));
        assert_eq!(
            codec.serialize("sid", "a b", &attrs).unwrap(),
            "sid=a%20b; expires=Tue, 01 Jan 2030 00:00:00 GMT; path=/; domain=example.com; secure"
        );
    }

    #[test]
    fn test_serialize_rejects_bad_keys() {
        let codec = CookieCodec::new();
        for key in ["", "a;b", "a=b", "a b", "a,b", "a\nb"] {
            assert!(
                matches!(
                    codec.serialize(key, "v", &CookieAttributes::new()),
                    Err(CookieError::Validation { field: "key", .. })
                ),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_serialize_rejects_injected_attributes() {
        let codec = CookieCodec::new();
        let attrs = CookieAttributes::new().path("/; secure");
        assert!(matches!(
            codec.serialize("a", "b", &attrs),
            Err(CookieError::Validation { field: "path", .. })
        ));
        let attrs = CookieAttributes::new().domain("evil.com;");
        assert!(matches!(
            codec.serialize("a", "b", &attrs),
            Err(CookieError::Validation { field: "domain", .. })
        ));
    }

    #[test]
    fn test_serialize_removal() {
        let codec = CookieCodec::new();
        let attrs = CookieAttributes::new()
            .path("/app")
            .expires(datetime!(2099-01-01 00:00:00 UTC));
        assert_eq!(
            codec.serialize_removal("sid", &attrs).unwrap(),
            "sid=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/app"
        );
    }

    #[test]
    fn test_serialize_then_lookup() {
        let codec = CookieCodec::new();
        let value = "semi;colon = ünïcode";
        let serialized = codec
            .serialize("k", value, &CookieAttributes::new())
            .unwrap();
        assert_eq!(codec.lookup(&serialized, "k").unwrap().as_deref(), Some(value));
    }
}
