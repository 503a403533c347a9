use ark_ec::{
    short_weierstrass::{Affine, SWCurveConfig},
    AffineRepr, CurveGroup,
};
use ark_ff::PrimeField;
use num_bigint::BigInt;
use tracing::debug;

use crate::discrete_log::{solve_bounded, SearchConfig};
use crate::encryption::{shared_mask, Ciphertext};
use crate::error::DeniableError;
use crate::group::GroupContext;
use crate::keygen::{KeyPair, SecretKey};

/// The keypair Alice derives from `r = t + cm (mod n)`.
///
/// Its public point equals the ciphertext's `c1`.
pub struct DerivedKeyPair<C: SWCurveConfig> {
    pub keypair: KeyPair<C>,
}

impl<C: SWCurveConfig> Clone for DerivedKeyPair<C> {
    fn clone(&self) -> Self {
        DerivedKeyPair {
            keypair: self.keypair.clone(),
        }
    }
}

impl<C: SWCurveConfig> std::fmt::Debug for DerivedKeyPair<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKeyPair")
            .field("keypair", &self.keypair)
            .finish()
    }
}

impl<C: SWCurveConfig> DerivedKeyPair<C>
where
    C::BaseField: PrimeField,
{
    pub fn secret(&self) -> &SecretKey<C> {
        &self.keypair.secret
    }

    pub fn public(&self) -> &Affine<C> {
        &self.keypair.public
    }

    /// 32-byte big-endian private scalar.
    pub fn secret_bytes(&self, ctx: &GroupContext<C>) -> Vec<u8> {
        ctx.scalar_to_bytes(self.secret().scalar())
    }

    /// Compressed SEC1 public key.
    pub fn public_compressed(&self, ctx: &GroupContext<C>) -> Vec<u8> {
        ctx.encode_compressed(self.public())
    }

    /// SHA-256 of the compressed public key.
    pub fn fingerprint(&self, ctx: &GroupContext<C>) -> [u8; 32] {
        ctx.fingerprint(self.public())
    }
}

/// Result of a successful Alice-side decryption.
pub struct AliceRecovery<C: SWCurveConfig> {
    /// The hidden index `cm`
    pub index: u64,
    pub derived: DerivedKeyPair<C>,
}

impl<C: SWCurveConfig> std::fmt::Debug for AliceRecovery<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliceRecovery")
            .field("index", &self.index)
            .field("derived", &self.derived)
            .finish()
    }
}

fn check_c1<C: SWCurveConfig>(ct: &Ciphertext<C>) -> Result<(), DeniableError> {
    if ct.c1.infinity {
        return Err(DeniableError::InvalidPoint(
            "c1 is the point at infinity".to_string(),
        ));
    }
    Ok(())
}

/// Recovers the dictator's integer: `x = c0 - value(sk * c1)`.
///
/// The subtraction is over the integers, mirroring encryption.
///
/// # Errors
/// Returns an error if `c1` is the point at infinity
pub fn decrypt_dictator<C: SWCurveConfig>(
    ctx: &GroupContext<C>,
    dictator: &SecretKey<C>,
    ct: &Ciphertext<C>,
) -> Result<BigInt, DeniableError>
where
    C::BaseField: PrimeField,
{
    check_c1(ct)?;
    let y = (ct.c1 * *dictator.scalar()).into_affine();
    Ok(&ct.c0 - shared_mask(ctx, &y))
}

/// Recovers Alice's index by searching `[0, config.bound]` and derives the
/// keypair for `r = t + cm`.
///
/// Returns `Ok(None)` when the index is not in range; the caller may retry
/// with a larger bound.
///
/// # Arguments
/// * `ctx` - The group context
/// * `alice` - Alice's private key `t`
/// * `ct` - The ciphertext
/// * `config` - Search bound and table-building parameters
///
/// # Errors
/// Returns an error if `c1` is the point at infinity or the bound is invalid
pub fn decrypt_alice<C: SWCurveConfig>(
    ctx: &GroupContext<C>,
    alice: &SecretKey<C>,
    ct: &Ciphertext<C>,
    config: &SearchConfig,
) -> Result<Option<AliceRecovery<C>>, DeniableError>
where
    C::BaseField: PrimeField,
{
    check_c1(ct)?;

    // c1 - t * G = cm * G
    let target = ct.c1.into_group() - ctx.mul_generator(alice.scalar());
    let index = match solve_bounded(ctx, &target, config)? {
        Some(index) => index,
        None => {
            debug!(bound = config.bound, "index not recovered");
            return Ok(None);
        }
    };

    let r = *alice.scalar() + ctx.scalar_from_u64(index);
    let secret = SecretKey::from_scalar(r)?;
    let keypair = KeyPair::from_secret(ctx, secret);
    debug!(index, "index recovered");

    Ok(Some(AliceRecovery {
        index,
        derived: DerivedKeyPair { keypair },
    }))
}
