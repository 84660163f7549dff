use cookie_session_crypto::CryptoError;

/// Errors that can occur while reading or writing cookies and sessions.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// A cookie write was attempted but no response header sink was provided. Writes without a
    /// way to reach the response are a programming error.
    #[error("Missing HTTP integration: no response header sink to set cookies on")]
    MissingHttpIntegration,

    /// [`Cookie::session`](crate::Cookie::session) was called on a cookie created without session
    /// options.
    #[error("Session is not configured for this cookie")]
    SessionNotConfigured,

    /// Session configuration, encoding or decoding failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
