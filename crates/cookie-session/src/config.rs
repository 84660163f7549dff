use std::fmt;

use cookie_session_crypto::SessionOptions;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Visitor},
};

/// How long a cookie lives.
///
/// Deserializes from a non-negative number of seconds or from a date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Expiry {
    /// Rendered as `max-age=<seconds>`
    MaxAge(u64),
    /// Rendered verbatim as `expires=<date>`, e.g. `Thu, 01 Jan 1970 00:00:01 GMT`
    At(String),
}

impl Default for Expiry {
    fn default() -> Self {
        Expiry::MaxAge(default_max_age())
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ExpiryVisitor)
    }
}

struct ExpiryVisitor;

impl Visitor<'_> for ExpiryVisitor {
    type Value = Expiry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a max-age in whole seconds or an expiry date string")
    }

    fn visit_u64<E: de::Error>(self, seconds: u64) -> Result<Self::Value, E> {
        Ok(Expiry::MaxAge(seconds))
    }

    fn visit_i64<E: de::Error>(self, seconds: i64) -> Result<Self::Value, E> {
        u64::try_from(seconds)
            .map(Expiry::MaxAge)
            .map_err(|_| E::custom(format!("max-age must not be negative, got {seconds}")))
    }

    fn visit_str<E: de::Error>(self, date: &str) -> Result<Self::Value, E> {
        Ok(Expiry::At(date.to_owned()))
    }
}

/// Default cookie lifetime, one year in seconds
pub fn default_max_age() -> u64 {
    31_536_000
}

/// Construction-time configuration of a [`Cookie`](crate::Cookie).
///
/// The attribute fields are defaults for every cookie written, individual writes can override
/// them. `session` enables the encrypted session stored under `session.key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieOptions {
    /// `domain` attribute, omitted when `None` or empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// `path` attribute
    #[serde(default = "default_path")]
    pub path: String,
    /// Number of seconds (`max-age`) or an expiry date string (`expires`)
    #[serde(default)]
    pub expires: Expiry,
    /// Emit the `Secure` flag
    #[serde(default = "default_true")]
    pub secure: bool,
    /// Emit the `HttpOnly` flag
    #[serde(default = "default_true")]
    pub http_only: bool,
    /// Encrypted session configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionOptions>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            domain: None,
            path: default_path(),
            expires: Expiry::default(),
            secure: true,
            http_only: true,
            session: None,
        }
    }
}

impl CookieOptions {
    /// Enable the encrypted session with the given options.
    pub fn with_session(mut self, session: SessionOptions) -> Self {
        self.session = Some(session);
        self
    }
}

fn default_path() -> String {
    "/".to_owned()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let options: CookieOptions = serde_json::from_str("{}").unwrap();

        assert_eq!(options, CookieOptions::default());
        assert_eq!(options.expires, Expiry::MaxAge(31_536_000));
        assert!(options.secure);
        assert!(options.http_only);
        assert!(options.session.is_none());
    }

    #[test]
    fn test_full_config() {
        let options: CookieOptions = serde_json::from_str(
            r#"{
                "domain": "example.com",
                "path": "/app",
                "expires": 3600,
                "secure": false,
                "httpOnly": false,
                "session": { "key": "sid", "secret": "secret", "iterations": 1000 }
            }"#,
        )
        .unwrap();

        assert_eq!(options.domain.as_deref(), Some("example.com"));
        assert_eq!(options.path, "/app");
        assert_eq!(options.expires, Expiry::MaxAge(3600));
        assert!(!options.secure);
        assert!(!options.http_only);

        let session = options.session.unwrap();
        assert_eq!(session.key, "sid");
        assert_eq!(session.iterations, 1000);
    }

    #[test]
    fn test_expiry_date_string() {
        let options: CookieOptions =
            serde_json::from_str(r#"{ "expires": "Wed, 21 Oct 2026 07:28:00 GMT" }"#).unwrap();

        assert_eq!(
            options.expires,
            Expiry::At("Wed, 21 Oct 2026 07:28:00 GMT".to_owned())
        );
    }

    #[test]
    fn test_negative_expiry_is_rejected() {
        let err = serde_json::from_str::<CookieOptions>(r#"{ "expires": -1 }"#).unwrap_err();

        assert!(err.to_string().contains("max-age must not be negative, got -1"));
    }

    #[test]
    fn test_fractional_expiry_is_rejected() {
        assert!(serde_json::from_str::<CookieOptions>(r#"{ "expires": 1.5 }"#).is_err());
    }

    #[test]
    fn test_serialize_uses_config_format() {
        let options = CookieOptions {
            expires: Expiry::MaxAge(60),
            ..Default::default()
        };
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["expires"], 60);
        assert_eq!(json["httpOnly"], true);
        assert!(json.get("domain").is_none());
        assert_eq!(serde_json::from_value::<CookieOptions>(json).unwrap(), options);
    }
}
