//! Cookie values and the `document.cookie` text format.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A named cookie with an absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}

impl Cookie {
    /// Cookie that expires `ttl_days` from now, scoped to the whole site.
    pub fn with_ttl_days(name: impl Into<String>, value: impl Into<String>, ttl_days: u32) -> Self {
        Self::expiring_at(name, value, Utc::now() + Duration::days(i64::from(ttl_days)))
    }

    pub fn expiring_at(name: impl Into<String>, value: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires,
            path: default_path(),
        }
    }

    /// Whether the cookie has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }

    /// Render as an assignment to `document.cookie` / a `Set-Cookie` value:
    /// `name=value; expires=<RFC 1123>; path=/`.
    pub fn to_header(&self) -> Result<String, StoreError> {
        validate_name(&self.name)?;
        Ok(format!(
            "{}={}; expires={}; path={}",
            self.name,
            encode_value(&self.value),
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.path
        ))
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let bad = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '=' | ';' | ','));
    if bad {
        return Err(StoreError::InvalidCookie(format!("bad cookie name '{}'", name)));
    }
    Ok(())
}

/// Escape the two characters that would break the `name=value;` framing.
///
/// Everything else is written raw, which keeps values written by older
/// builds (raw JSON) readable by [`decode_value`].
pub fn encode_value(value: &str) -> String {
    value.replace('%', "%25").replace(';', "%3B")
}

/// Inverse of [`encode_value`].
pub fn decode_value(value: &str) -> String {
    value.replace("%3B", ";").replace("%3b", ";").replace("%25", "%")
}

/// Split a `document.cookie` / `Cookie:` header into `(name, value)` pairs.
///
/// Values are decoded; pairs without `=` are skipped.
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), decode_value(value.trim())))
        })
        .collect()
}

/// Look up one cookie in a header string.
///
/// When the name appears more than once the lookup fails, matching the
/// storefront's own reader.
pub fn cookie_from_header(header: &str, name: &str) -> Option<String> {
    let mut found = parse_cookie_header(header)
        .into_iter()
        .filter(|(n, _)| n == name)
        .map(|(_, v)| v);
    let first = found.next()?;
    if found.next().is_some() {
        return None;
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_header_format() {
        let expires = Utc.with_ymd_and_hms(2026, 11, 18, 9, 30, 0).unwrap();
        let cookie = Cookie::expiring_at("cart_details", r#"{"cart_id":"c1"}"#, expires);
        assert_eq!(
            cookie.to_header().unwrap(),
            r#"cart_details={"cart_id":"c1"}; expires=Wed, 18 Nov 2026 09:30:00 GMT; path=/"#
        );
    }

    #[test]
    fn test_semicolons_are_escaped() {
        let cookie = Cookie::with_ttl_days("cart_details", "a;b%c", 31);
        let header = cookie.to_header().unwrap();
        assert!(header.starts_with("cart_details=a%3Bb%25c;"));
        assert_eq!(decode_value("a%3Bb%25c"), "a;b%c");
    }

    #[test]
    fn test_rejects_bad_names() {
        let cookie = Cookie::with_ttl_days("cart details", "x", 1);
        assert!(matches!(cookie.to_header(), Err(StoreError::InvalidCookie(_))));
    }

    #[test]
    fn test_parse_header() {
        let header = r#"_shopify_y=abc; cart=Z2NwLXVz; cart_details={"cart_id":"Z2NwLXVz","product_details":[]}"#;
        assert_eq!(cookie_from_header(header, "cart").as_deref(), Some("Z2NwLXVz"));
        assert_eq!(
            cookie_from_header(header, "cart_details").as_deref(),
            Some(r#"{"cart_id":"Z2NwLXVz","product_details":[]}"#)
        );
        assert_eq!(cookie_from_header(header, "missing"), None);
    }

    #[test]
    fn test_duplicate_names_are_ambiguous() {
        assert_eq!(cookie_from_header("cart=a; cart=b", "cart"), None);
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let cookie = Cookie::expiring_at("cart", "c1", now);
        assert!(cookie.is_expired(now));
        assert!(!Cookie::with_ttl_days("cart", "c1", 7).is_expired(now));
    }
}
