//! Construction parameters
//!
//! A build needs a prime modulus `p`, a base `x` in `[1, p)` and a block
//! length `B >= 1`. Collision probability over all comparisons made during
//! construction stays negligible when `p >= n^(3 + c)`.
//!
//! - [`Params::new`] validates caller-supplied values
//! - [`Params::generate`] searches for a random prime and base

pub mod prime;

pub use prime::{choose_base, is_probable_prime, suggest_prime, small_primes};

use anyhow::{ensure, Result};
use num_bigint::BigUint;
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Default collision exponent `c` in `p >= n^(3 + c)`
pub const DEFAULT_EXPONENT_C: f64 = 1.0;

/// Modulus, base and block length for one construction
#[derive(Clone, PartialEq, Eq)]
pub struct Params {
    p: BigUint,
    x: BigUint,
    block_len: usize,
}

impl Params {
    /// Validate and bundle construction parameters.
    ///
    /// Primality of `p` is the caller's responsibility; only its range is
    /// checked here.
    pub fn new(p: BigUint, x: BigUint, block_len: usize) -> Result<Self> {
        ensure!(p >= BigUint::from(2u32), "modulus p must be at least 2, got {}", p);
        ensure!(
            x >= BigUint::from(1u32) && x < p,
            "base x must lie in [1, p), got x = {} with p = {}",
            x,
            p
        );
        ensure!(block_len >= 1, "block length must be at least 1");
        Ok(Self { p, x, block_len })
    }

    /// Convenience constructor for word-sized parameters
    pub fn from_u64(p: u64, x: u64, block_len: usize) -> Result<Self> {
        Self::new(BigUint::from(p), BigUint::from(x), block_len)
    }

    /// Pick a random prime `p > max(alphabet_size + 1, n^ceil(3 + c))` and a
    /// random base `x` in `[1, p)`.
    pub fn generate<R: Rng + ?Sized>(
        text_len: usize,
        alphabet_size: u16,
        exponent_c: f64,
        block_len: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let bound = prime_bound(text_len, alphabet_size, exponent_c)?;
        let p = suggest_prime(&bound, rng);
        let x = choose_base(&p, rng);
        debug!(%p, %x, block_len, "generated parameters");
        Self::new(p, x, block_len)
    }

    #[inline]
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    #[inline]
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Block ("supercharacter") length `B`
    #[inline]
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Same modulus and base with a different block length
    pub fn with_block_len(&self, block_len: usize) -> Result<Self> {
        Self::new(self.p.clone(), self.x.clone(), block_len)
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params")
            .field("p", &self.p.to_string())
            .field("x", &self.x.to_string())
            .field("block_len", &self.block_len)
            .finish()
    }
}

/// Lower bound for the modulus: `max(alphabet_size + 1, n^ceil(3 + c))`.
///
/// Symbols are fingerprinted as `symbol + 1`, so the largest symbol value is
/// `alphabet_size + 1` and must stay below `p`.
pub fn prime_bound(text_len: usize, alphabet_size: u16, exponent_c: f64) -> Result<BigUint> {
    ensure!(
        exponent_c.is_finite() && exponent_c >= 0.0,
        "collision exponent c must be a non-negative number, got {}",
        exponent_c
    );
    let exponent = (3.0 + exponent_c).ceil() as u32;
    let power = BigUint::from(text_len).pow(exponent);
    Ok(power.max(BigUint::from(alphabet_size) + 1u32))
}

/// Block length that splits `text_len` into `blocks` blocks: `ceil(n / b)`,
/// never below 1.
pub fn block_len_for_blocks(text_len: usize, blocks: usize) -> Result<usize> {
    ensure!(blocks >= 1, "block count must be at least 1");
    Ok(text_len.div_ceil(blocks).max(1))
}
