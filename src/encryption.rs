use ark_ec::{
    short_weierstrass::{Affine, SWCurveConfig},
    CurveGroup,
};
use ark_ff::PrimeField;
use ark_std::Zero;
use num_bigint::BigInt;

use crate::error::DeniableError;
use crate::group::GroupContext;
use crate::keygen::SecretKey;

/// A ciphertext carrying the dictator's integer and Alice's hidden index.
///
/// `c1 = r * G` with `r = cm + t (mod n)`, and `c0 = value(r * pk) + x`
/// computed over the integers.
pub struct Ciphertext<C: SWCurveConfig> {
    /// Integer mask plus the dictator's message; never reduced mod n
    pub c0: BigInt,
    /// Ephemeral point `r * G`
    pub c1: Affine<C>,
}

impl<C: SWCurveConfig> Clone for Ciphertext<C> {
    fn clone(&self) -> Self {
        Ciphertext {
            c0: self.c0.clone(),
            c1: self.c1,
        }
    }
}

impl<C: SWCurveConfig> std::fmt::Debug for Ciphertext<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("c0", &self.c0)
            .field("c1", &self.c1)
            .finish()
    }
}

impl<C: SWCurveConfig> PartialEq for Ciphertext<C> {
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<C: SWCurveConfig> Ciphertext<C>
where
    C::BaseField: PrimeField,
{
    pub fn new(c0: BigInt, c1: Affine<C>) -> Self {
        Ciphertext { c0, c1 }
    }

    /// SHA-256 of the compressed `c1`.
    ///
    /// `c1` is the public half of the key Alice derives after recovering the
    /// index, so this matches [`crate::decryption::DerivedKeyPair::fingerprint`].
    pub fn index_fingerprint(&self, ctx: &GroupContext<C>) -> [u8; 32] {
        ctx.fingerprint(&self.c1)
    }
}

/// The integer mask `value(point)` shared by encryption and dictator decryption.
pub(crate) fn shared_mask<C: SWCurveConfig>(ctx: &GroupContext<C>, point: &Affine<C>) -> BigInt
where
    C::BaseField: PrimeField,
{
    BigInt::from(ctx.point_value(point))
}

/// Encrypts `x` for the dictator while hiding `cm` for Alice.
///
/// The dictator's public key is recomputed from `dictator`; see
/// [`encrypt_with_public_key`] when only the public point is at hand.
///
/// # Arguments
/// * `ctx` - The group context
/// * `dictator` - The dictator's private key
/// * `alice` - Alice's private key `t`
/// * `x` - The dictator's integer message
/// * `cm` - Alice's hidden index
///
/// # Errors
/// Returns an error if `cm + t` is zero mod n
pub fn encrypt<C: SWCurveConfig>(
    ctx: &GroupContext<C>,
    dictator: &SecretKey<C>,
    alice: &SecretKey<C>,
    x: &BigInt,
    cm: u64,
) -> Result<Ciphertext<C>, DeniableError>
where
    C::BaseField: PrimeField,
{
    let pk = dictator.public_key(ctx);
    encrypt_with_public_key(ctx, &pk, alice, x, cm)
}

/// Encrypts against the dictator's public point `pk`.
///
/// # Errors
/// Returns an error if `cm + t` is zero mod n, since `c1` would then be the
/// identity and could not be transmitted.
pub fn encrypt_with_public_key<C: SWCurveConfig>(
    ctx: &GroupContext<C>,
    pk: &Affine<C>,
    alice: &SecretKey<C>,
    x: &BigInt,
    cm: u64,
) -> Result<Ciphertext<C>, DeniableError>
where
    C::BaseField: PrimeField,
{
    let r = ctx.scalar_from_u64(cm) + alice.scalar();
    if r.is_zero() {
        return Err(DeniableError::InvalidParameter(format!(
            "index {} cancels Alice's private key",
            cm
        )));
    }

    let c1 = ctx.mul_generator(&r).into_affine();
    let y = (*pk * r).into_affine();
    let c0 = shared_mask(ctx, &y) + x;

    Ok(Ciphertext { c0, c1 })
}
