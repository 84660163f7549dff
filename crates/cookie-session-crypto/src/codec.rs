use std::num::NonZeroU32;

use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::{
    CipherAlgorithm, CryptoError, DigestAlgorithm, EncodingError, Envelope, PayloadKind, Result,
    SessionKeys, SessionOptions, SignedEnvelope,
    aes_cbc::{decrypt_aes_cbc, encrypt_aes_cbc},
    signature::{sign_hex, verify_hex},
};

/// Encrypts and signs session values into cookie-safe envelopes, and verifies and decrypts them
/// on the way back.
///
/// The keys are derived once in [`SessionCodec::new`], encoding and decoding afterwards only run
/// AES and HMAC.
#[derive(Debug, Clone)]
pub struct SessionCodec {
    name: String,
    cipher: CipherAlgorithm,
    digest: DigestAlgorithm,
    keys: SessionKeys,
}

impl SessionCodec {
    /// Validate `options` and derive the session keys.
    ///
    /// All checks run before the (deliberately slow) key derivation, so invalid configuration
    /// fails fast.
    pub fn new(options: &SessionOptions) -> Result<Self> {
        crate::ensure!(
            !options.key.is_empty() && !options.secret.is_empty() => CryptoError::MissingKeyOrSecret
        );

        let digest: DigestAlgorithm = options.digest.parse()?;
        let cipher: CipherAlgorithm = options.cipher_name.parse()?;
        let iterations = NonZeroU32::new(options.iterations).ok_or(CryptoError::InvalidIterations)?;
        crate::ensure!(options.keylen / 2 == cipher.key_len() => CryptoError::InvalidKeyLength {
            cipher: cipher.name(),
            expected: cipher.key_len(),
            actual: options.keylen / 2,
        });

        let keys = SessionKeys::derive(
            &options.secret,
            &options.salt,
            &options.signed_salt,
            iterations,
            options.keylen,
            digest,
        );

        Ok(Self {
            name: options.key.clone(),
            cipher,
            digest,
            keys,
        })
    }

    /// Name of the cookie this codec's envelopes are stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encrypt and sign `value`.
    ///
    /// Every call uses a fresh random IV, encoding the same value twice gives different
    /// envelopes.
    pub fn encode(&self, value: &Value) -> Result<String> {
        let (kind, text) = PayloadKind::serialize(value)?;

        let encrypted = encrypt_aes_cbc(self.cipher, self.keys.cipher_key(), text.as_bytes())?;
        let main = Envelope::new(
            encrypted.encrypted_bytes().to_vec(),
            encrypted.iv().to_vec(),
            kind,
        )
        .to_main();

        let digest = sign_hex(self.digest, self.keys.sign_key(), main.as_bytes());
        Ok(SignedEnvelope::new(main, digest).to_string())
    }

    /// Verify and decrypt an envelope.
    ///
    /// `envelope` may still be percent-encoded, as it appears in a raw `Cookie` header. The
    /// signature is checked before anything is decrypted.
    pub fn decode(&self, envelope: &str) -> Result<Value> {
        let envelope = percent_decode_str(envelope)
            .decode_utf8()
            .map_err(|_| EncodingError::InvalidUtf8)?;
        let signed: SignedEnvelope = envelope.parse()?;

        if !verify_hex(
            self.digest,
            self.keys.sign_key(),
            signed.main().as_bytes(),
            signed.digest(),
        ) {
            tracing::warn!(cookie_name = %self.name, "Session envelope signature mismatch");
            return Err(CryptoError::InvalidMac);
        }

        let envelope = Envelope::from_main(signed.main())?;
        let decrypted = decrypt_aes_cbc(
            self.cipher,
            self.keys.cipher_key(),
            envelope.iv(),
            envelope.ciphertext(),
        )?;
        let text = String::from_utf8(decrypted).map_err(|_| EncodingError::InvalidUtf8)?;

        PayloadKind::deserialize(envelope.kind(), text)
    }
}
