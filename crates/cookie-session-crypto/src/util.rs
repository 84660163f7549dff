use rand::{
    Rng,
    distributions::{Distribution, Standard},
};
use zeroize::{Zeroize, Zeroizing};

/// Generate random bytes that are cryptographically secure
pub fn generate_random_bytes<T>() -> Zeroizing<T>
where
    Standard: Distribution<T>,
    T: Zeroize,
{
    Zeroizing::new(rand::thread_rng().r#gen::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_bytes_differs() {
        let a: Zeroizing<[u8; 16]> = generate_random_bytes();
        let b: Zeroizing<[u8; 16]> = generate_random_bytes();

        assert_ne!(*a, *b);
    }
}
