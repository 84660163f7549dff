//! Allow-listed algorithm names.
//!
//! Configuration carries algorithm names as plain strings. They are resolved against these enums
//! when a [`SessionCodec`](crate::SessionCodec) is constructed, anything else is rejected.

use std::{fmt, str::FromStr};

use crate::CryptoError;

/// Digest used both for PBKDF2 key derivation and for the envelope HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256, the default
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl DigestAlgorithm {
    /// Name as accepted in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha384" => Ok(DigestAlgorithm::Sha384),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(CryptoError::UnsupportedDigest(s.to_owned())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Block cipher used to encrypt the session payload. Always CBC with PKCS#7 padding, the
/// envelope MAC provides the authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    /// AES-128 in CBC mode
    Aes128Cbc,
    /// AES-192 in CBC mode
    Aes192Cbc,
    /// AES-256 in CBC mode, the default
    Aes256Cbc,
}

impl CipherAlgorithm {
    /// Name as accepted in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            CipherAlgorithm::Aes128Cbc => "aes-128-cbc",
            CipherAlgorithm::Aes192Cbc => "aes-192-cbc",
            CipherAlgorithm::Aes256Cbc => "aes-256-cbc",
        }
    }

    /// Key size in bytes.
    pub fn key_len(&self) -> usize {
        match self {
            CipherAlgorithm::Aes128Cbc => 16,
            CipherAlgorithm::Aes192Cbc => 24,
            CipherAlgorithm::Aes256Cbc => 32,
        }
    }
}

impl FromStr for CipherAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aes-128-cbc" => Ok(CipherAlgorithm::Aes128Cbc),
            "aes-192-cbc" => Ok(CipherAlgorithm::Aes192Cbc),
            "aes-256-cbc" => Ok(CipherAlgorithm::Aes256Cbc),
            _ => Err(CryptoError::UnsupportedCipher(s.to_owned())),
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digest() {
        assert_eq!("sha256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("SHA512".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        assert!(matches!(
            "md5".parse::<DigestAlgorithm>(),
            Err(CryptoError::UnsupportedDigest(name)) if name == "md5"
        ));
    }

    #[test]
    fn test_parse_cipher() {
        let cipher: CipherAlgorithm = "aes-256-cbc".parse().unwrap();
        assert_eq!(cipher, CipherAlgorithm::Aes256Cbc);
        assert_eq!(cipher.key_len(), 32);

        assert!(matches!(
            "aes-256-gcm".parse::<CipherAlgorithm>(),
            Err(CryptoError::UnsupportedCipher(_))
        ));
        assert!(matches!(
            "des-ede3-cbc".parse::<CipherAlgorithm>(),
            Err(CryptoError::UnsupportedCipher(_))
        ));
    }
}
