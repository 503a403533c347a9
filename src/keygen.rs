use ark_ec::{
    short_weierstrass::{Affine, SWCurveConfig},
    CurveGroup,
};
use ark_ff::PrimeField;
use ark_std::{
    rand::{
        rngs::{OsRng, StdRng},
        RngCore, SeedableRng,
    },
    UniformRand, Zero,
};

use zeroize::Zeroize;

use crate::error::DeniableError;
use crate::group::GroupContext;
use crate::security::SensitiveScalar;

/// A private scalar in `[1, n-1]`.
pub struct SecretKey<C: SWCurveConfig> {
    sk: SensitiveScalar<C::ScalarField>,
}

impl<C: SWCurveConfig> Clone for SecretKey<C> {
    fn clone(&self) -> Self {
        SecretKey {
            sk: self.sk.clone(),
        }
    }
}

impl<C: SWCurveConfig> PartialEq for SecretKey<C> {
    fn eq(&self, other: &Self) -> bool {
        self.sk == other.sk
    }
}

impl<C: SWCurveConfig> Eq for SecretKey<C> {}

impl<C: SWCurveConfig> std::fmt::Debug for SecretKey<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey").field("sk", &self.sk).finish()
    }
}

impl<C: SWCurveConfig> SecretKey<C>
where
    C::BaseField: PrimeField,
{
    /// Samples a uniformly random non-zero scalar.
    ///
    /// # Arguments
    /// * `rng` - A random number generator
    pub fn new<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        loop {
            let sk = C::ScalarField::rand(rng);
            if !sk.is_zero() {
                return SecretKey {
                    sk: SensitiveScalar::new(sk),
                };
            }
        }
    }

    /// Wraps an existing scalar.
    ///
    /// # Errors
    /// Returns an error if the scalar is zero
    pub fn from_scalar(sk: C::ScalarField) -> Result<Self, DeniableError> {
        if sk.is_zero() {
            return Err(DeniableError::InvalidScalar(
                "private key must be non-zero".to_string(),
            ));
        }
        Ok(SecretKey {
            sk: SensitiveScalar::new(sk),
        })
    }

    /// Parses a private key from its decimal representation.
    pub fn from_decimal(ctx: &GroupContext<C>, decimal: &str) -> Result<Self, DeniableError> {
        Self::from_scalar(ctx.parse_scalar(decimal)?)
    }

    pub fn scalar(&self) -> &C::ScalarField {
        self.sk.expose_secret()
    }

    pub fn to_decimal(&self, ctx: &GroupContext<C>) -> String {
        ctx.scalar_to_biguint(self.scalar()).to_string()
    }

    /// Computes `sk * G`.
    pub fn public_key(&self, ctx: &GroupContext<C>) -> Affine<C> {
        ctx.mul_generator(self.scalar()).into_affine()
    }
}

/// A private scalar together with its public point `sk * G`.
pub struct KeyPair<C: SWCurveConfig> {
    pub secret: SecretKey<C>,
    pub public: Affine<C>,
}

impl<C: SWCurveConfig> Clone for KeyPair<C> {
    fn clone(&self) -> Self {
        KeyPair {
            secret: self.secret.clone(),
            public: self.public,
        }
    }
}

impl<C: SWCurveConfig> std::fmt::Debug for KeyPair<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("secret", &self.secret)
            .field("public", &self.public)
            .finish()
    }
}

impl<C: SWCurveConfig> KeyPair<C>
where
    C::BaseField: PrimeField,
{
    pub fn from_secret(ctx: &GroupContext<C>, secret: SecretKey<C>) -> Self {
        let public = secret.public_key(ctx);
        KeyPair { secret, public }
    }

    pub fn random<R: RngCore + ?Sized>(ctx: &GroupContext<C>, rng: &mut R) -> Self {
        Self::from_secret(ctx, SecretKey::new(rng))
    }
}

/// The two independent keypairs of the scheme.
pub struct RoleKeys<C: SWCurveConfig> {
    pub dictator: KeyPair<C>,
    pub alice: KeyPair<C>,
}

/// Generates dictator and Alice keypairs from operating system entropy.
///
/// The OS source only seeds a `StdRng`; a failure to read it aborts key
/// generation.
///
/// # Errors
/// Returns [`DeniableError::Entropy`] if the OS random source fails
pub fn generate_keys<C: SWCurveConfig>(ctx: &GroupContext<C>) -> Result<RoleKeys<C>, DeniableError>
where
    C::BaseField: PrimeField,
{
    let mut seed = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut seed)
        .map_err(|e| DeniableError::Entropy(e.to_string()))?;
    let mut rng = StdRng::from_seed(seed);
    seed.zeroize();
    Ok(generate_keys_with_rng(ctx, &mut rng))
}

/// Generates dictator and Alice keypairs from the supplied random source.
pub fn generate_keys_with_rng<C: SWCurveConfig, R: RngCore + ?Sized>(
    ctx: &GroupContext<C>,
    rng: &mut R,
) -> RoleKeys<C>
where
    C::BaseField: PrimeField,
{
    RoleKeys {
        dictator: KeyPair::random(ctx, rng),
        alice: KeyPair::random(ctx, rng),
    }
}
