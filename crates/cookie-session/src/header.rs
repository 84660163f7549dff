//! Parsing of the `Cookie` request header and rendering of `Set-Cookie` values.
//!
//! Both directions are plain string functions with no knowledge of sessions or encryption.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::{CookieOptions, Expiry};

/// Expiry date used when deleting a cookie.
pub const EPOCH_EXPIRY: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// Characters left unescaped in cookie values, the same set JavaScript's `encodeURIComponent`
/// keeps.
const COOKIE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Attributes rendered into a `Set-Cookie` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Cookie domain, omitted when `None` or empty
    pub domain: Option<String>,
    /// Cookie path, `/` when empty
    pub path: String,
    /// Lifetime, omitted when `None` (a browser session cookie)
    pub expires: Option<Expiry>,
    /// Secure attribute (HTTPS-only)
    pub secure: bool,
    /// HttpOnly attribute (prevents JavaScript access)
    pub http_only: bool,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self::from(&CookieOptions::default())
    }
}

impl From<&CookieOptions> for CookieAttributes {
    fn from(options: &CookieOptions) -> Self {
        Self {
            domain: options.domain.clone(),
            path: options.path.clone(),
            expires: Some(options.expires.clone()),
            secure: options.secure,
            http_only: options.http_only,
        }
    }
}

/// Find the value of cookie `name` in a raw `Cookie` header.
///
/// Pairs are separated by `;` with optional whitespace around names and values. The first
/// non-empty match wins and its value is percent-decoded. Returns `None` when the cookie is
/// missing, empty, or not valid percent-encoded UTF-8.
pub fn parse_cookie_header(header: &str, name: &str) -> Option<String> {
    let raw = find_raw_value(header, name)?;

    match percent_decode_str(raw).decode_utf8() {
        Ok(value) => Some(value.into_owned()),
        Err(_) => {
            tracing::warn!(cookie_name = %name, "Cookie value is not valid UTF-8");
            None
        }
    }
}

/// Like [`parse_cookie_header`] but returns the value still percent-encoded.
pub(crate) fn find_raw_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value)
}

/// Render a `Set-Cookie` header value.
///
/// A `None` value renders a deletion: the value is emptied and the expiry forced to
/// [`EPOCH_EXPIRY`], whatever `attributes.expires` says.
pub fn render_set_cookie(name: &str, value: Option<&str>, attributes: &CookieAttributes) -> String {
    let (mut cookie, expires) = match value {
        None => (
            format!("{name}=;"),
            Some(Expiry::At(EPOCH_EXPIRY.to_owned())),
        ),
        Some(value) => (
            format!("{name}={};", utf8_percent_encode(value, COOKIE_VALUE)),
            attributes.expires.clone(),
        ),
    };

    match expires {
        Some(Expiry::MaxAge(seconds)) => cookie.push_str(&format!("max-age={seconds};")),
        Some(Expiry::At(date)) => cookie.push_str(&format!("expires={date};")),
        None => {}
    }

    let path = if attributes.path.is_empty() {
        "/"
    } else {
        attributes.path.as_str()
    };
    cookie.push_str(&format!("path={path};"));

    if let Some(domain) = attributes.domain.as_deref().filter(|d| !d.is_empty()) {
        cookie.push_str(&format!("domain={domain};"));
    }

    if attributes.secure {
        cookie.push_str("Secure;");
    }

    if attributes.http_only {
        cookie.push_str("HttpOnly;");
    }

    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_header() {
        let header = "a=1; b=2";

        assert_eq!(parse_cookie_header(header, "a").as_deref(), Some("1"));
        assert_eq!(parse_cookie_header(header, "b").as_deref(), Some("2"));
        assert_eq!(parse_cookie_header(header, "c"), None);
    }

    #[test]
    fn test_parse_first_match_wins() {
        assert_eq!(
            parse_cookie_header("a=1;a=2", "a").as_deref(),
            Some("1")
        );
    }

    #[test]
    fn test_parse_whitespace_and_trailing_separator() {
        let header = "  a = 1 ;b=2;";

        assert_eq!(parse_cookie_header(header, "a").as_deref(), Some("1"));
        assert_eq!(parse_cookie_header(header, "b").as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_name_must_match_exactly() {
        assert_eq!(parse_cookie_header("xa=1; ax=2", "a"), None);
    }

    #[test]
    fn test_parse_empty_value_is_absent() {
        assert_eq!(parse_cookie_header("a=; b=2", "a"), None);
        assert_eq!(parse_cookie_header("a=; a=2", "a").as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_decodes_value() {
        assert_eq!(
            parse_cookie_header("a=hello%20world%3D", "a").as_deref(),
            Some("hello world=")
        );
        assert_eq!(parse_cookie_header("a=%FF", "a"), None);
    }

    #[test]
    fn test_find_raw_value_skips_decoding() {
        let header = "a=%FF%FE; b=hello%20world";

        assert_eq!(find_raw_value(header, "a"), Some("%FF%FE"));
        assert_eq!(find_raw_value(header, "b"), Some("hello%20world"));
        assert_eq!(find_raw_value("a=", "a"), None);
    }

    #[test]
    fn test_parse_keeps_equals_in_value() {
        assert_eq!(
            parse_cookie_header("token=abc==--def", "token").as_deref(),
            Some("abc==--def")
        );
    }

    #[test]
    fn test_render_defaults() {
        let header = render_set_cookie("key", Some("value"), &CookieAttributes::default());

        assert_eq!(header, "key=value;max-age=31536000;path=/;Secure;HttpOnly;");
    }

    #[test]
    fn test_render_delete() {
        let header = render_set_cookie("key", None, &CookieAttributes::default());

        assert_eq!(
            header,
            "key=;expires=Thu, 01 Jan 1970 00:00:01 GMT;path=/;Secure;HttpOnly;"
        );
    }

    #[test]
    fn test_render_delete_with_domain() {
        let attributes = CookieAttributes {
            domain: Some("example.com".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            render_set_cookie("key", None, &attributes),
            "key=;expires=Thu, 01 Jan 1970 00:00:01 GMT;path=/;domain=example.com;Secure;HttpOnly;"
        );
    }

    #[test]
    fn test_render_encodes_value() {
        let header = render_set_cookie("key", Some("a b=c+d/e;"), &CookieAttributes::default());

        assert!(header.starts_with("key=a%20b%3Dc%2Bd%2Fe%3B;"));
    }

    #[test]
    fn test_render_expiry_string_and_flags_off() {
        let attributes = CookieAttributes {
            domain: Some(String::new()),
            path: String::new(),
            expires: Some(Expiry::At("Wed, 21 Oct 2026 07:28:00 GMT".to_owned())),
            secure: false,
            http_only: false,
        };

        assert_eq!(
            render_set_cookie("key", Some("v"), &attributes),
            "key=v;expires=Wed, 21 Oct 2026 07:28:00 GMT;path=/;"
        );
    }

    #[test]
    fn test_render_session_cookie() {
        let attributes = CookieAttributes {
            expires: None,
            ..Default::default()
        };

        assert_eq!(
            render_set_cookie("key", Some("v"), &attributes),
            "key=v;path=/;Secure;HttpOnly;"
        );
    }
}
