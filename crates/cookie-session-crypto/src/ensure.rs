//! Helper macro to express validation logic more concisely.

/// Ensures that an expression is true. Otherwise an error is returned.
/// ```
/// use cookie_session_crypto::ensure;
/// use cookie_session_crypto::CryptoError;
/// fn example(iterations: u32) -> Result<(), CryptoError> {
///     ensure!(iterations > 0 => CryptoError::InvalidIterations);
///     Ok(())
/// }
/// assert!(example(0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr => $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
