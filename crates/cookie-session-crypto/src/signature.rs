//! HMAC signing of the envelope's main blob, rendered as lowercase hex.

use hmac::{Hmac, Mac};
use subtle::ConstantTimeEq;

use crate::DigestAlgorithm;

/// Compute the hex encoded HMAC of `data`.
pub(crate) fn sign_hex(digest: DigestAlgorithm, key: &[u8], data: &[u8]) -> String {
    let tag = match digest {
        DigestAlgorithm::Sha256 => mac::<Hmac<sha2::Sha256>>(key, data),
        DigestAlgorithm::Sha384 => mac::<Hmac<sha2::Sha384>>(key, data),
        DigestAlgorithm::Sha512 => mac::<Hmac<sha2::Sha512>>(key, data),
    };
    hex::encode(tag)
}

/// Check that `signature` is exactly the hex HMAC of `data`, in constant time.
pub(crate) fn verify_hex(digest: DigestAlgorithm, key: &[u8], data: &[u8], signature: &str) -> bool {
    let expected = sign_hex(digest, key, data);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

fn mac<M: Mac + hmac::digest::KeyInit>(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <M as Mac>::new_from_slice(key).expect("HMAC can take a key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
