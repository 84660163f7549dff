use std::{fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{EncodingError, PayloadKind, Result};

const SEPARATOR: &str = "--";

/// The encrypted part of a session cookie: ciphertext, IV and payload kind.
///
/// Serialized as the "main blob", `BASE64(BASE64(ciphertext) "--" BASE64(iv) "--" kind)`.
/// Envelopes written before the kind marker existed only have the first two parts, those parse
/// with a `kind` of `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    ciphertext: Vec<u8>,
    iv: Vec<u8>,
    kind: Option<PayloadKind>,
}

impl Envelope {
    pub(crate) fn new(ciphertext: Vec<u8>, iv: Vec<u8>, kind: PayloadKind) -> Self {
        Self {
            ciphertext,
            iv,
            kind: Some(kind),
        }
    }

    /// Raw ciphertext bytes
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Initialization vector the ciphertext was produced with
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Payload kind marker, `None` for untagged envelopes
    pub fn kind(&self) -> Option<PayloadKind> {
        self.kind
    }

    /// Render the main blob. This is the exact string the HMAC is computed over.
    pub fn to_main(&self) -> String {
        let mut inner = [STANDARD.encode(&self.ciphertext), STANDARD.encode(&self.iv)].join(SEPARATOR);
        if let Some(kind) = self.kind {
            inner.push_str(SEPARATOR);
            inner.push_str(kind.marker());
        }
        STANDARD.encode(inner)
    }

    /// Parse a main blob back into its parts.
    pub fn from_main(main: &str) -> Result<Self> {
        let inner = STANDARD.decode(main).map_err(EncodingError::InvalidBase64)?;
        let inner = String::from_utf8(inner).map_err(|_| EncodingError::InvalidUtf8)?;

        let mut parts = inner.split(SEPARATOR);
        let ciphertext = parts.next().ok_or(EncodingError::MissingSeparator)?;
        let iv = parts.next().ok_or(EncodingError::MissingSeparator)?;
        let kind = parts.next().map(PayloadKind::from_marker).transpose()?;
        crate::ensure!(parts.next().is_none() => EncodingError::UnknownPayloadKind.into());

        Ok(Self {
            ciphertext: STANDARD
                .decode(ciphertext)
                .map_err(EncodingError::InvalidBase64)?,
            iv: STANDARD.decode(iv).map_err(EncodingError::InvalidBase64)?,
            kind,
        })
    }
}

/// A session cookie value as it travels over the wire: the main blob and its hex HMAC, joined by
/// `--`. Parsing only splits the two halves, verifying the signature is up to the
/// [`SessionCodec`](crate::SessionCodec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    main: String,
    digest: String,
}

impl SignedEnvelope {
    pub(crate) fn new(main: String, digest: String) -> Self {
        Self { main, digest }
    }

    /// The signed main blob
    pub fn main(&self) -> &str {
        &self.main
    }

    /// Hex encoded HMAC of [`SignedEnvelope::main`]
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl FromStr for SignedEnvelope {
    type Err = crate::CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (main, digest) = s
            .split_once(SEPARATOR)
            .ok_or(EncodingError::MissingSeparator)?;

        Ok(Self {
            main: main.to_owned(),
            digest: digest.to_owned(),
        })
    }
}

impl fmt::Display for SignedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.main, self.digest)
    }
}
