use std::num::NonZeroU32;

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

use super::kdf::derive_key;
use crate::DigestAlgorithm;

/// The pair of keys a session envelope is protected with: one for the block cipher and one for
/// the HMAC. Both come from the same secret but through different salts, so learning one does not
/// reveal the other.
#[derive(Clone)]
pub struct SessionKeys {
    cipher_key: Zeroizing<Vec<u8>>,
    sign_key: Zeroizing<Vec<u8>>,
}

impl SessionKeys {
    /// Derive the cipher key (`keylen / 2` bytes) and the signing key (`keylen` bytes).
    pub fn derive(
        secret: &str,
        salt: &str,
        signed_salt: &str,
        iterations: NonZeroU32,
        keylen: usize,
        digest: DigestAlgorithm,
    ) -> Self {
        tracing::debug!(
            iterations = iterations.get(),
            keylen,
            %digest,
            "Deriving session keys"
        );

        Self {
            cipher_key: derive_key(
                secret.as_bytes(),
                salt.as_bytes(),
                iterations,
                keylen / 2,
                digest,
            ),
            sign_key: derive_key(
                secret.as_bytes(),
                signed_salt.as_bytes(),
                iterations,
                keylen,
                digest,
            ),
        }
    }

    pub(crate) fn cipher_key(&self) -> &[u8] {
        &self.cipher_key
    }

    pub(crate) fn sign_key(&self) -> &[u8] {
        &self.sign_key
    }
}

impl ConstantTimeEq for SessionKeys {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.cipher_key.as_slice().ct_eq(other.cipher_key.as_slice())
            & self.sign_key.as_slice().ct_eq(other.sign_key.as_slice())
    }
}

impl PartialEq for SessionKeys {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

// We manually implement these to make sure we don't print any sensitive data
impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys").finish()
    }
}
