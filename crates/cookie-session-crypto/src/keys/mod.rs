mod kdf;
pub use kdf::{
    default_cipher_name, default_digest, default_iterations, default_keylen, default_salt,
    default_signed_salt, derive_key, SessionOptions,
};
mod session_keys;
pub use session_keys::SessionKeys;
