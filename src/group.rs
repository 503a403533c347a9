//! Group context and canonical point encodings.
//!
//! All protocol operations run against an explicitly constructed
//! [`GroupContext`] rather than process-wide curve constants. The context
//! fixes the generator, the group order `n` and the byte layout of the SEC1
//! encodings used on the wire and as baby-step table keys.

use ark_ec::{
    short_weierstrass::{Affine, Projective, SWCurveConfig},
    CurveGroup, PrimeGroup,
};
use ark_ff::{BigInteger, One, PrimeField};
use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::error::DeniableError;

/// Leading byte of an uncompressed SEC1 point.
pub const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// Leading byte of a compressed SEC1 point with even y.
pub const SEC1_COMPRESSED_EVEN_TAG: u8 = 0x02;

/// Leading byte of a compressed SEC1 point with odd y.
pub const SEC1_COMPRESSED_ODD_TAG: u8 = 0x03;

/// Curve parameters shared by key generation, encryption and decryption.
pub struct GroupContext<C: SWCurveConfig> {
    generator: Projective<C>,
    order: BigUint,
    field_modulus: BigUint,
    coordinate_len: usize,
}

impl<C: SWCurveConfig> Clone for GroupContext<C> {
    fn clone(&self) -> Self {
        GroupContext {
            generator: self.generator,
            order: self.order.clone(),
            field_modulus: self.field_modulus.clone(),
            coordinate_len: self.coordinate_len,
        }
    }
}

impl<C: SWCurveConfig> std::fmt::Debug for GroupContext<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupContext")
            .field("generator", &self.generator)
            .field("order", &self.order)
            .finish()
    }
}

impl<C: SWCurveConfig> Default for GroupContext<C>
where
    C::BaseField: PrimeField,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SWCurveConfig> GroupContext<C>
where
    C::BaseField: PrimeField,
{
    /// Creates a context for curve `C` using its standard generator.
    pub fn new() -> Self {
        GroupContext {
            generator: Projective::<C>::generator(),
            order: modulus_of::<C::ScalarField>(),
            field_modulus: modulus_of::<C::BaseField>(),
            coordinate_len: (C::BaseField::MODULUS_BIT_SIZE as usize).div_ceil(8),
        }
    }

    pub fn generator(&self) -> Projective<C> {
        self.generator
    }

    /// The prime order `n` of the generator.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Length in bytes of an uncompressed encoding (`1 + 2 * coordinate width`).
    pub fn encoded_len(&self) -> usize {
        1 + 2 * self.coordinate_len
    }

    /// Computes `s * G`.
    pub fn mul_generator(&self, s: &C::ScalarField) -> Projective<C> {
        self.generator * *s
    }

    pub fn scalar_from_u64(&self, value: u64) -> C::ScalarField {
        C::ScalarField::from(value)
    }

    /// Converts an integer in `[0, n-1]` into a scalar.
    ///
    /// # Errors
    /// Returns an error if `value >= n`; out-of-range values are never reduced.
    pub fn scalar_from_biguint(&self, value: BigUint) -> Result<C::ScalarField, DeniableError> {
        if value >= self.order {
            return Err(DeniableError::InvalidScalar(format!(
                "{} is not less than the group order",
                value
            )));
        }
        Ok(C::ScalarField::from(value))
    }

    /// Parses a scalar from its decimal representation.
    ///
    /// # Errors
    /// Returns an error for empty input, anything other than ASCII digits, or a
    /// value that is not below the group order.
    pub fn parse_scalar(&self, decimal: &str) -> Result<C::ScalarField, DeniableError> {
        let digits = decimal.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DeniableError::InvalidScalar(format!(
                "'{}' is not a non-negative decimal integer",
                decimal
            )));
        }
        let value = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| {
            DeniableError::InvalidScalar(format!("'{}' is not a decimal integer", decimal))
        })?;
        self.scalar_from_biguint(value)
    }

    pub fn scalar_to_biguint(&self, s: &C::ScalarField) -> BigUint {
        (*s).into()
    }

    /// Big-endian bytes of a scalar, left-padded to the width of the group order.
    pub fn scalar_to_bytes(&self, s: &C::ScalarField) -> Vec<u8> {
        let width = (C::ScalarField::MODULUS_BIT_SIZE as usize).div_ceil(8);
        let bytes = s.into_bigint().to_bytes_be();
        bytes[bytes.len() - width..].to_vec()
    }

    /// Uncompressed SEC1 encoding `0x04 || X || Y`.
    ///
    /// The identity has no SEC1 form of this width; it encodes as all zero
    /// bytes so that `0 * G` still has a fixed-width table key.
    pub fn encode_uncompressed(&self, point: &Affine<C>) -> Vec<u8> {
        let len = self.coordinate_len;
        let mut out = vec![0u8; self.encoded_len()];
        if point.infinity {
            return out;
        }
        out[0] = SEC1_UNCOMPRESSED_TAG;
        self.write_coordinate(&point.x, &mut out[1..1 + len]);
        self.write_coordinate(&point.y, &mut out[1 + len..]);
        out
    }

    pub fn encode_projective(&self, point: &Projective<C>) -> Vec<u8> {
        self.encode_uncompressed(&point.into_affine())
    }

    /// Compressed SEC1 encoding `0x02/0x03 || X`.
    pub fn encode_compressed(&self, point: &Affine<C>) -> Vec<u8> {
        let len = self.coordinate_len;
        let mut out = vec![0u8; 1 + len];
        if point.infinity {
            return out;
        }
        out[0] = if point.y.into_bigint().is_odd() {
            SEC1_COMPRESSED_ODD_TAG
        } else {
            SEC1_COMPRESSED_EVEN_TAG
        };
        self.write_coordinate(&point.x, &mut out[1..]);
        out
    }

    /// Decodes an uncompressed SEC1 point.
    ///
    /// # Errors
    /// Returns an error for a wrong length or prefix, out-of-range
    /// coordinates, points off the curve or outside the prime-order subgroup,
    /// and for the all-zero identity encoding.
    pub fn decode_uncompressed(&self, bytes: &[u8]) -> Result<Affine<C>, DeniableError> {
        let len = self.coordinate_len;
        if bytes.len() != self.encoded_len() {
            return Err(DeniableError::InvalidPoint(format!(
                "expected {} bytes, got {}",
                self.encoded_len(),
                bytes.len()
            )));
        }
        if bytes[0] != SEC1_UNCOMPRESSED_TAG {
            if bytes.iter().all(|b| *b == 0) {
                return Err(DeniableError::InvalidPoint(
                    "point at infinity is not accepted".to_string(),
                ));
            }
            return Err(DeniableError::InvalidPoint(format!(
                "unexpected prefix 0x{:02x}, expected 0x{:02x}",
                bytes[0], SEC1_UNCOMPRESSED_TAG
            )));
        }

        let x = self.read_coordinate(&bytes[1..1 + len])?;
        let y = self.read_coordinate(&bytes[1 + len..])?;
        let point = Affine::<C>::new_unchecked(x, y);
        if !point.is_on_curve() {
            return Err(DeniableError::InvalidPoint(
                "point is not on the curve".to_string(),
            ));
        }
        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(DeniableError::InvalidPoint(
                "point is not in the prime-order subgroup".to_string(),
            ));
        }
        Ok(point)
    }

    pub fn decode_hex(&self, encoded: &str) -> Result<Affine<C>, DeniableError> {
        let bytes = hex::decode(encoded.trim())?;
        self.decode_uncompressed(&bytes)
    }

    /// Interprets the uncompressed encoding of `point` as a big-endian integer.
    pub fn point_value(&self, point: &Affine<C>) -> BigUint {
        BigUint::from_bytes_be(&self.encode_uncompressed(point))
    }

    /// SHA-256 of the compressed encoding; a diagnostic fingerprint only.
    pub fn fingerprint(&self, point: &Affine<C>) -> [u8; 32] {
        let digest = Sha256::digest(self.encode_compressed(point));
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        out
    }

    fn write_coordinate(&self, coordinate: &C::BaseField, dst: &mut [u8]) {
        let bytes = coordinate.into_bigint().to_bytes_be();
        dst.copy_from_slice(&bytes[bytes.len() - self.coordinate_len..]);
    }

    fn read_coordinate(&self, bytes: &[u8]) -> Result<C::BaseField, DeniableError> {
        let value = BigUint::from_bytes_be(bytes);
        if value >= self.field_modulus {
            return Err(DeniableError::InvalidPoint(
                "coordinate is not less than the field modulus".to_string(),
            ));
        }
        Ok(C::BaseField::from(value))
    }
}

fn modulus_of<F: PrimeField>() -> BigUint {
    let max: BigUint = (-F::one()).into();
    max + 1u32
}
