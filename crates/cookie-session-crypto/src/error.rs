use thiserror::Error;

/// Errors produced while configuring a [`SessionCodec`](crate::SessionCodec) or while
/// encoding and decoding envelopes.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The cookie name or the shared secret was missing or empty.
    #[error("Session key & secret required.")]
    MissingKeyOrSecret,
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedDigest(String),
    #[error("Unsupported cipher: {0}")]
    UnsupportedCipher(String),
    #[error("Key derivation iterations must be greater than zero")]
    InvalidIterations,
    /// `keylen / 2` does not match the key size required by the configured cipher.
    #[error("Invalid key length, {cipher} requires {expected} bytes but got {actual}")]
    InvalidKeyLength {
        cipher: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The signature of the envelope did not match. The envelope has been tampered with or was
    /// produced with a different secret.
    #[error("Not valid")]
    InvalidMac,

    #[error("Malformed envelope, {0}")]
    MalformedEnvelope(#[from] EncodingError),
}

/// Structural problems with an envelope, surfaced through [`CryptoError::MalformedEnvelope`].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("missing separator")]
    MissingSeparator,
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("invalid initialization vector length")]
    InvalidIv,
    #[error("invalid padding")]
    InvalidPadding,
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unknown payload kind")]
    UnknownPayloadKind,
    #[error("session payload is not an object")]
    NotAnObject,
}

pub(crate) type Result<T, E = CryptoError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            CryptoError::MissingKeyOrSecret.to_string(),
            "Session key & secret required."
        );
        assert_eq!(CryptoError::InvalidMac.to_string(), "Not valid");

        let err = CryptoError::from(EncodingError::MissingSeparator);
        assert_eq!(err.to_string(), "Malformed envelope, missing separator");
    }
}
