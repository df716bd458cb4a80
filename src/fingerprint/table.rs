//! Per-suffix fingerprint table
//!
//! Holds `f(i)`, the Karp-Rabin fingerprint of `text[i..n)`, for every
//! suffix start. Built once by a single backward pass:
//!
//! ```text
//! f(n-1) = v(text[n-1]) mod p
//! f(i)   = (f(i+1) * x + v(text[i])) mod p
//! ```
//!
//! where `v(s) = s + 1`. No symbol is worth zero, so a trailing run of
//! `0x00` bytes still changes the fingerprint.

use crate::params::Params;
use crate::text::Text;
use num_bigint::BigUint;
use num_traits::Zero;

/// Fingerprints of every suffix of a text
#[derive(Debug, Clone)]
pub struct FingerprintTable {
    prints: Vec<BigUint>,
}

impl FingerprintTable {
    /// Compute the table for `text` under the modulus and base in `params`
    pub fn build(text: &Text, params: &Params) -> Self {
        let bytes = text.as_bytes();
        let mut prints = vec![BigUint::zero(); bytes.len()];

        let mut prev = BigUint::zero();
        for (i, &symbol) in bytes.iter().enumerate().rev() {
            // For i = n-1 prev is zero, so this reduces to v(text[n-1]) mod p
            prev = (&prev * params.x() + symbol_value(symbol)) % params.p();
            prints[i] = prev.clone();
        }

        Self { prints }
    }

    /// Fingerprint of the suffix starting at `index`
    ///
    /// # Panics
    /// Panics if `index >= n`. Asking for a suffix past the end of the text
    /// is a caller bug, not a recoverable condition.
    #[inline]
    pub fn get(&self, index: usize) -> &BigUint {
        assert!(
            index < self.prints.len(),
            "suffix index {} out of range for text of length {}",
            index,
            self.prints.len()
        );
        &self.prints[index]
    }

    /// Fingerprint of the whole text, zero for the empty text
    pub fn text_fingerprint(&self) -> BigUint {
        self.prints.first().cloned().unwrap_or_default()
    }

    /// Number of suffixes covered
    pub fn len(&self) -> usize {
        self.prints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prints.is_empty()
    }
}

/// Value a symbol contributes to a fingerprint
#[inline]
pub fn symbol_value(symbol: u8) -> BigUint {
    BigUint::from(u32::from(symbol) + 1)
}
