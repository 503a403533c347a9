//! Bounded discrete logarithms with baby-step giant-step.
//!
//! Finds `k` in `[0, N]` with `k * G = target` in `O(sqrt(N))` group
//! operations and memory. Baby steps `j * G` for `j` in `[0, m)` are keyed
//! by their uncompressed SEC1 encoding; giant steps walk
//! `target - i * m * G` for `i = 0, 1, ..., m` and the first hit with
//! `i * m + j <= N` is returned.

use std::collections::HashMap;

use ark_ec::{
    short_weierstrass::{Projective, SWCurveConfig},
    CurveGroup,
};
use ark_ff::PrimeField;
use rayon::prelude::*;
use tracing::debug;

use crate::error::DeniableError;
use crate::group::GroupContext;

/// Search bound used when the caller does not supply one.
pub const DEFAULT_SEARCH_BOUND: u64 = 1000;

/// Number of baby steps from which the table is built on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: u64 = 1 << 16;

/// Baby steps computed and batch-normalized together.
const CHUNK_SIZE: u64 = 1 << 12;

/// Parameters of a bounded search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Inclusive upper bound `N` of the search space
    pub bound: u64,
    /// Minimum number of baby steps for a parallel table build
    pub parallel_threshold: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            bound: DEFAULT_SEARCH_BOUND,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SearchConfig {
    pub fn with_bound(bound: u64) -> Self {
        SearchConfig {
            bound,
            ..Default::default()
        }
    }
}

/// Map from the encoding of `j * G` to `j`, for `j` in `[0, m)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BabyStepTable {
    steps: HashMap<Vec<u8>, u64>,
}

impl BabyStepTable {
    /// Builds the table for `m` baby steps.
    ///
    /// With `m >= parallel_threshold` disjoint index chunks are computed in
    /// parallel and merged; the resulting map is identical either way.
    pub fn build<C: SWCurveConfig>(ctx: &GroupContext<C>, m: u64, parallel_threshold: u64) -> Self
    where
        C::BaseField: PrimeField,
    {
        let chunks = m.div_ceil(CHUNK_SIZE);
        let chunk_bounds = move |c: u64| (c * CHUNK_SIZE, ((c + 1) * CHUNK_SIZE).min(m));

        let mut steps = HashMap::with_capacity(m as usize);
        if m >= parallel_threshold {
            let encoded: Vec<Vec<(Vec<u8>, u64)>> = (0..chunks)
                .into_par_iter()
                .map(|c| {
                    let (start, end) = chunk_bounds(c);
                    encode_range(ctx, start, end)
                })
                .collect();
            for chunk in encoded {
                steps.extend(chunk);
            }
        } else {
            for c in 0..chunks {
                let (start, end) = chunk_bounds(c);
                steps.extend(encode_range(ctx, start, end));
            }
        }

        BabyStepTable { steps }
    }

    pub fn get(&self, encoded: &[u8]) -> Option<u64> {
        self.steps.get(encoded).copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Encodes `j * G` for `j` in `[start, end)`.
fn encode_range<C: SWCurveConfig>(ctx: &GroupContext<C>, start: u64, end: u64) -> Vec<(Vec<u8>, u64)>
where
    C::BaseField: PrimeField,
{
    let g = ctx.generator();
    let mut cur = ctx.mul_generator(&ctx.scalar_from_u64(start));
    let mut points = Vec::with_capacity((end - start) as usize);
    for _ in start..end {
        points.push(cur);
        cur += g;
    }
    Projective::normalize_batch(&points)
        .iter()
        .zip(start..end)
        .map(|(p, j)| (ctx.encode_uncompressed(p), j))
        .collect()
}

/// Smallest `m` with `m * m >= n`.
pub fn ceil_sqrt(n: u64) -> u64 {
    let n = n as u128;
    let mut r = (n as f64).sqrt() as u128;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    if r * r == n {
        r as u64
    } else {
        (r + 1) as u64
    }
}

/// Finds `k` in `[0, config.bound]` with `k * G = target`.
///
/// Returns `Ok(None)` when no such `k` exists in range; that outcome is
/// never reported as `Some(0)`.
///
/// # Errors
/// Returns an error if `config.bound` is `u64::MAX`, whose search space does
/// not fit in a `u64`
pub fn solve_bounded<C: SWCurveConfig>(
    ctx: &GroupContext<C>,
    target: &Projective<C>,
    config: &SearchConfig,
) -> Result<Option<u64>, DeniableError>
where
    C::BaseField: PrimeField,
{
    let bound = config.bound;
    let space = bound.checked_add(1).ok_or_else(|| {
        DeniableError::InvalidParameter(format!("search bound {} is too large", bound))
    })?;
    let m = ceil_sqrt(space);

    let table = BabyStepTable::build(ctx, m, config.parallel_threshold);
    debug!(bound, m, baby_steps = table.len(), "baby-step table ready");

    let factor = ctx.mul_generator(&ctx.scalar_from_u64(m));
    let mut giant = *target;
    for i in 0..=m {
        if let Some(j) = table.get(&ctx.encode_projective(&giant)) {
            let candidate = i as u128 * m as u128 + j as u128;
            if candidate <= bound as u128 {
                debug!(giant_steps = i + 1, "discrete log found");
                return Ok(Some(candidate as u64));
            }
        }
        giant -= factor;
    }

    debug!(bound, "search space exhausted");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    type K256 = ark_secp256k1::Config;
    type P256 = ark_secp256r1::Config;

    fn multiple<C: SWCurveConfig>(ctx: &GroupContext<C>, k: u64) -> Projective<C>
    where
        C::BaseField: PrimeField,
    {
        ctx.mul_generator(&ctx.scalar_from_u64(k))
    }

    #[test]
    fn test_ceil_sqrt() {
        for (n, expected) in [
            (0, 0),
            (1, 1),
            (2, 2),
            (4, 2),
            (5, 3),
            (11, 4),
            (1001, 32),
            (1 << 40, 1 << 20),
            ((1 << 40) + 1, (1 << 20) + 1),
            (u64::MAX, 1 << 32),
        ] {
            assert_eq!(ceil_sqrt(n), expected, "ceil_sqrt({})", n);
        }
    }

    #[test]
    fn test_solves_every_value_in_range() {
        let ctx = GroupContext::<K256>::new();
        let config = SearchConfig::with_bound(30);
        for k in 0..=30 {
            assert_eq!(
                solve_bounded(&ctx, &multiple(&ctx, k), &config).unwrap(),
                Some(k)
            );
        }
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        let ctx = GroupContext::<K256>::new();
        let config = SearchConfig::with_bound(30);

        assert_eq!(solve_bounded(&ctx, &multiple(&ctx, 31), &config).unwrap(), None);
        assert_eq!(solve_bounded(&ctx, &multiple(&ctx, 36), &config).unwrap(), None);
        assert_eq!(solve_bounded(&ctx, &-multiple(&ctx, 1), &config).unwrap(), None);
    }

    #[test]
    fn test_zero_bound() {
        let ctx = GroupContext::<P256>::new();
        let config = SearchConfig::with_bound(0);
        assert_eq!(solve_bounded(&ctx, &multiple(&ctx, 0), &config).unwrap(), Some(0));
        assert_eq!(solve_bounded(&ctx, &multiple(&ctx, 1), &config).unwrap(), None);
    }

    #[test]
    fn test_max_bound_is_rejected() {
        let ctx = GroupContext::<K256>::new();
        let config = SearchConfig::with_bound(u64::MAX);
        assert!(matches!(
            solve_bounded(&ctx, &multiple(&ctx, 1), &config),
            Err(DeniableError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_parallel_table_matches_sequential() {
        let ctx = GroupContext::<K256>::new();
        let m = 2 * CHUNK_SIZE + 17;

        let sequential = BabyStepTable::build(&ctx, m, u64::MAX);
        let parallel = BabyStepTable::build(&ctx, m, 0);

        assert_eq!(sequential.len(), m as usize);
        assert_eq!(sequential, parallel);
        assert_eq!(
            parallel.get(&ctx.encode_projective(&multiple(&ctx, m - 1))),
            Some(m - 1)
        );
        assert_eq!(parallel.get(&vec![0u8; ctx.encoded_len()]), Some(0));
    }

    #[test]
    fn test_parallel_search() {
        let ctx = GroupContext::<K256>::new();
        let config = SearchConfig {
            bound: 100_000,
            parallel_threshold: 0,
        };
        for k in [0, 1, 316, 317, 99_999, 100_000] {
            assert_eq!(
                solve_bounded(&ctx, &multiple(&ctx, k), &config).unwrap(),
                Some(k)
            );
        }
        assert_eq!(
            solve_bounded(&ctx, &multiple(&ctx, 100_001), &config).unwrap(),
            None
        );
    }
}
