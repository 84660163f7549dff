#![doc = include_str!("../README.md")]

//! # Key material
//!
//! Derived keys are held in [`zeroize::Zeroizing`] buffers and wiped on drop. None of the key
//! types implement a `Debug` that prints their contents, so it is safe to log the structs that
//! own them.

mod aes_cbc;
mod algorithm;
pub use algorithm::{CipherAlgorithm, DigestAlgorithm};
mod codec;
pub use codec::SessionCodec;
mod content_format;
pub use content_format::PayloadKind;
mod envelope;
pub use envelope::{Envelope, SignedEnvelope};
mod ensure;
mod error;
pub(crate) use error::Result;
pub use error::{CryptoError, EncodingError};
mod keys;
pub use keys::*;
mod signature;
mod util;
pub use util::generate_random_bytes;
