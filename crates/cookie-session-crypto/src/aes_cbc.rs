//! # AES-CBC operations
//!
//! Contains low level AES-CBC operations used by the [`SessionCodec`](crate::SessionCodec).
//!
//! Note:
//! AES-CBC is not authenticated. It must only be used inside the envelope, where the HMAC over the
//! ciphertext and IV is verified before [`decrypt_aes_cbc`] is ever called.

use aes::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};

use crate::{CipherAlgorithm, CryptoError, EncodingError, Result};

pub(crate) const IV_SIZE: usize = 16;

pub(crate) struct AesCbcCiphertext {
    iv: [u8; IV_SIZE],
    encrypted_bytes: Vec<u8>,
}

impl AesCbcCiphertext {
    pub(crate) fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }

    pub(crate) fn encrypted_bytes(&self) -> &[u8] {
        &self.encrypted_bytes
    }
}

/// Encrypt `plaintext` under a freshly generated random IV.
pub(crate) fn encrypt_aes_cbc(
    cipher: CipherAlgorithm,
    key: &[u8],
    plaintext: &[u8],
) -> Result<AesCbcCiphertext> {
    let iv = crate::generate_random_bytes::<[u8; IV_SIZE]>();
    encrypt_aes_cbc_with_iv(cipher, key, &iv, plaintext)
}

pub(crate) fn encrypt_aes_cbc_with_iv(
    cipher: CipherAlgorithm,
    key: &[u8],
    iv: &[u8; IV_SIZE],
    plaintext: &[u8],
) -> Result<AesCbcCiphertext> {
    let encrypted_bytes = match cipher {
        CipherAlgorithm::Aes128Cbc => encrypt::<aes::Aes128>(key, iv, plaintext),
        CipherAlgorithm::Aes192Cbc => encrypt::<aes::Aes192>(key, iv, plaintext),
        CipherAlgorithm::Aes256Cbc => encrypt::<aes::Aes256>(key, iv, plaintext),
    }
    .ok_or(CryptoError::InvalidKeyLength {
        cipher: cipher.name(),
        expected: cipher.key_len(),
        actual: key.len(),
    })?;

    Ok(AesCbcCiphertext {
        iv: *iv,
        encrypted_bytes,
    })
}

pub(crate) fn decrypt_aes_cbc(
    cipher: CipherAlgorithm,
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    crate::ensure!(iv.len() == IV_SIZE => EncodingError::InvalidIv.into());

    let decrypted = match cipher {
        CipherAlgorithm::Aes128Cbc => decrypt::<aes::Aes128>(key, iv, ciphertext),
        CipherAlgorithm::Aes192Cbc => decrypt::<aes::Aes192>(key, iv, ciphertext),
        CipherAlgorithm::Aes256Cbc => decrypt::<aes::Aes256>(key, iv, ciphertext),
    };

    decrypted.ok_or(EncodingError::InvalidPadding.into())
}

fn encrypt<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Option<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher,
    cbc::Encryptor<C>: KeyIvInit + BlockEncryptMut,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv).ok()?;
    Some(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Option<Vec<u8>>
where
    C: BlockDecryptMut + BlockCipher,
    cbc::Decryptor<C>: KeyIvInit + BlockDecryptMut,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv).ok()?;
    decryptor.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).ok()
}
