//! Modular arithmetic helpers over arbitrary-precision integers

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Compute `base^exp (mod modulus)` by square-and-multiply.
///
/// Scans the exponent from its least significant bit, squaring the running
/// base at every step and folding it into the result on set bits.
///
/// # Panics
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "modulus must be non-zero");
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut square = base % modulus;

    for bit in 0..exp.bits() {
        if exp.bit(bit) {
            result = (&result * &square) % modulus;
        }
        if bit + 1 < exp.bits() {
            square = (&square * &square) % modulus;
        }
    }

    result
}

/// [`mod_pow`] with a machine-word exponent
#[inline]
pub fn mod_pow_usize(base: &BigUint, exp: usize, modulus: &BigUint) -> BigUint {
    mod_pow(base, &BigUint::from(exp), modulus)
}
