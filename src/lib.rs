//! Deniable Dual-Recipient Encryption
//!
//! This library implements a two-recipient encryption over a prime-order
//! elliptic-curve group: one ciphertext `(c0, c1)` carries an integer `x`
//! for the "dictator" and, at the same time, a small index `cm` that only
//! "Alice" can recover.
//!
//! ## Overview
//!
//! With dictator key `sk`, Alice key `t` and `r = cm + t (mod n)`:
//!
//! - `c1 = r * G`
//! - `c0 = value(r * sk * G) + x`, where `value` reads the uncompressed SEC1
//!   encoding of a point as a big-endian integer and the sum is over the
//!   integers.
//!
//! The dictator recomputes the mask from `sk * c1`. Alice computes
//! `c1 - t * G = cm * G` and solves a bounded discrete logarithm with
//! baby-step giant-step, after which she holds the derived key `r`.
//!
//! ## Key Components
//!
//! - **Group**: [`group::GroupContext`], curve parameters and SEC1 encodings
//! - **Key Generation**: dictator and Alice keypairs
//! - **Encryption**: the dual encoding
//! - **Decryption**: dictator decryption and Alice's bounded search
//!
//! ## Example
//!
//! ```rust,no_run
//! use num_bigint::BigInt;
//! use deniable_encryption::{
//!     decryption::{decrypt_alice, decrypt_dictator},
//!     discrete_log::SearchConfig,
//!     encryption::encrypt,
//!     group::GroupContext,
//!     keygen::generate_keys,
//! };
//!
//! let ctx = GroupContext::<ark_secp256k1::Config>::new();
//! let keys = generate_keys(&ctx).unwrap();
//!
//! let ct = encrypt(&ctx, &keys.dictator.secret, &keys.alice.secret, &BigInt::from(42), 5).unwrap();
//!
//! assert_eq!(decrypt_dictator(&ctx, &keys.dictator.secret, &ct).unwrap(), BigInt::from(42));
//!
//! let recovery = decrypt_alice(&ctx, &keys.alice.secret, &ct, &SearchConfig::with_bound(10))
//!     .unwrap()
//!     .expect("index is within the bound");
//! assert_eq!(recovery.index, 5);
//! ```

pub mod decryption;
pub mod discrete_log;
pub mod encryption;
pub mod error;
pub mod group;
pub mod keygen;
pub mod record;
pub mod security;

pub use error::DeniableError;
