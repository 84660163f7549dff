use std::{fmt, num::NonZeroU32};

use hmac::Hmac;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::DigestAlgorithm;

/// Configuration of a session cookie: its name, the shared secret and the parameters used to
/// derive the cipher and signing keys from that secret.
///
/// Every field except `key` and `secret` has a default, so the minimal JSON configuration is
/// `{ "key": "session", "secret": "..." }`. Algorithm names are validated when the options are
/// turned into a [`SessionCodec`](crate::SessionCodec).
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    /// Name of the cookie holding the envelope
    #[serde(default)]
    pub key: String,
    /// Shared secret both keys are derived from
    #[serde(default)]
    pub secret: String,
    /// Salt for the cipher key
    #[serde(default = "default_salt")]
    pub salt: String,
    /// Salt for the signing key
    #[serde(default = "default_signed_salt")]
    pub signed_salt: String,
    /// Length of the signing key in bytes. The cipher key is half as long.
    #[serde(default = "default_keylen")]
    pub keylen: usize,
    /// PBKDF2 iterations
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Digest used for PBKDF2 and the envelope HMAC
    #[serde(default = "default_digest")]
    pub digest: String,
    /// Block cipher used to encrypt the payload
    #[serde(default = "default_cipher_name")]
    pub cipher_name: String,
}

impl SessionOptions {
    /// Options with the given cookie name and secret, everything else defaulted.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            salt: default_salt(),
            signed_salt: default_signed_salt(),
            keylen: default_keylen(),
            iterations: default_iterations(),
            digest: default_digest(),
            cipher_name: default_cipher_name(),
        }
    }
}

// We manually implement this to make sure we don't print the secret
impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("key", &self.key)
            .field("keylen", &self.keylen)
            .field("iterations", &self.iterations)
            .field("digest", &self.digest)
            .field("cipher_name", &self.cipher_name)
            .finish_non_exhaustive()
    }
}

/// Default salt for the cipher key
pub fn default_salt() -> String {
    "salt".to_owned()
}
/// Default salt for the signing key
pub fn default_signed_salt() -> String {
    "signedSalt".to_owned()
}
/// Default signing key length, in bytes
pub fn default_keylen() -> usize {
    64
}
/// Default PBKDF2 iterations
pub fn default_iterations() -> u32 {
    100
}
/// Default digest algorithm
pub fn default_digest() -> String {
    DigestAlgorithm::Sha256.name().to_owned()
}
/// Default cipher
pub fn default_cipher_name() -> String {
    "aes-256-cbc".to_owned()
}

/// Derive `length` bytes of key material from `secret` with PBKDF2-HMAC.
///
/// This is a pure function of its inputs, the same arguments always produce the same bytes.
pub fn derive_key(
    secret: &[u8],
    salt: &[u8],
    iterations: NonZeroU32,
    length: usize,
    digest: DigestAlgorithm,
) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; length]);
    let rounds = iterations.get();

    match digest {
        DigestAlgorithm::Sha256 => {
            pbkdf2::pbkdf2::<Hmac<sha2::Sha256>>(secret, salt, rounds, &mut key)
        }
        DigestAlgorithm::Sha384 => {
            pbkdf2::pbkdf2::<Hmac<sha2::Sha384>>(secret, salt, rounds, &mut key)
        }
        DigestAlgorithm::Sha512 => {
            pbkdf2::pbkdf2::<Hmac<sha2::Sha512>>(secret, salt, rounds, &mut key)
        }
    }
    .expect("HMAC can be initialized with any key length");

    key
}
