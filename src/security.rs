//! Memory protection for secret scalars
//!
//! Private keys and the derived index key are held in [`SensitiveScalar`],
//! which zeroizes on drop and never prints its value.

use ark_ff::PrimeField;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Wrapper for sensitive scalar field elements that ensures zeroization on drop
#[derive(Clone)]
pub struct SensitiveScalar<F: PrimeField> {
    value: F,
}

impl<F: PrimeField> SensitiveScalar<F> {
    pub fn new(value: F) -> Self {
        Self { value }
    }

    /// Get a reference to the inner value
    ///
    /// # Security Warning
    /// The caller must ensure this reference is not used to leak the value
    pub fn expose_secret(&self) -> &F {
        &self.value
    }
}

impl<F: PrimeField> Zeroize for SensitiveScalar<F> {
    fn zeroize(&mut self) {
        self.value.zeroize();
    }
}

impl<F: PrimeField> ZeroizeOnDrop for SensitiveScalar<F> {}

impl<F: PrimeField> Drop for SensitiveScalar<F> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<F: PrimeField> PartialEq for SensitiveScalar<F> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<F: PrimeField> Eq for SensitiveScalar<F> {}

// Prevent debug output from leaking sensitive data
impl<F: PrimeField> std::fmt::Debug for SensitiveScalar<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SensitiveScalar([REDACTED])")
    }
}
