//! Substring fingerprint oracle
//!
//! Derives the fingerprint of any `text[i..j)` from two table lookups:
//!
//! ```text
//! fp(i, j) = (f(i) - x^(j-i) * f(j)) mod p      with f(j) = 0 for j >= n
//! ```
//!
//! Equal substrings always produce equal fingerprints. Unequal substrings
//! collide with probability bounded by the size of `p`; matches are not
//! re-verified here.

use super::modular::mod_pow_usize;
use super::table::FingerprintTable;
use crate::params::Params;
use crate::text::Text;
use num_bigint::BigUint;
use rustc_hash::FxHashMap;

/// Karp-Rabin fingerprints of arbitrary substrings of one text
pub struct Fingerprinter {
    table: FingerprintTable,
    p: BigUint,
    x: BigUint,
    /// `x^len mod p` memoised by `len`
    powers: FxHashMap<usize, BigUint>,
}

impl Fingerprinter {
    /// Precompute the suffix table for `text`
    pub fn new(text: &Text, params: &Params) -> Self {
        Self {
            table: FingerprintTable::build(text, params),
            p: params.p().clone(),
            x: params.x().clone(),
            powers: FxHashMap::default(),
        }
    }

    /// Length of the underlying text
    #[inline]
    pub fn text_len(&self) -> usize {
        self.table.len()
    }

    /// Fingerprint of the suffix starting at `index`
    ///
    /// # Panics
    /// Panics if `index >= n`.
    #[inline]
    pub fn suffix(&self, index: usize) -> &BigUint {
        self.table.get(index)
    }

    /// Fingerprint of `text[start..end)`; an `end` past the text is clamped to `n`.
    ///
    /// # Panics
    /// Panics if `start >= n` or `start >= end`.
    pub fn substring(&mut self, start: usize, end: usize) -> BigUint {
        assert!(start < end, "empty substring [{}, {})", start, end);
        let head = self.table.get(start);

        if end >= self.table.len() {
            return head.clone();
        }

        let tail = self.table.get(end);
        let shifted = (power(&mut self.powers, &self.x, &self.p, end - start) * tail) % &self.p;

        // Both operands are already reduced, so adding p once keeps the
        // difference non-negative
        if *head >= shifted {
            head - shifted
        } else {
            head + &self.p - shifted
        }
    }

    /// Fingerprint of the block `[start, start + block_len)` clamped to `n`
    #[inline]
    pub fn block(&mut self, start: usize, block_len: usize) -> BigUint {
        self.substring(start, start.saturating_add(block_len))
    }

    /// Fingerprint of the whole text
    pub fn text_fingerprint(&self) -> BigUint {
        self.table.text_fingerprint()
    }
}

fn power<'a>(
    cache: &'a mut FxHashMap<usize, BigUint>,
    x: &BigUint,
    p: &BigUint,
    len: usize,
) -> &'a BigUint {
    cache.entry(len).or_insert_with(|| mod_pow_usize(x, len, p))
}
