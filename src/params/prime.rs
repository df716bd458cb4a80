//! Random prime search
//!
//! Candidates are drawn uniformly from `(bound, 2 * bound]`, screened by
//! trial division against every prime below [`SIEVE_LIMIT`], then accepted
//! after [`MILLER_RABIN_ROUNDS`] rounds of Miller-Rabin with random
//! witnesses. Bertrand's postulate guarantees the interval holds a prime.

use crate::fingerprint::mod_pow;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;
use std::sync::OnceLock;
use tracing::trace;

/// Primes below this are used for trial division
pub const SIEVE_LIMIT: usize = 5000;

/// Witness rounds per candidate
pub const MILLER_RABIN_ROUNDS: usize = 5;

static SMALL_PRIMES: OnceLock<Vec<u32>> = OnceLock::new();

/// All primes below [`SIEVE_LIMIT`] (sieve of Eratosthenes, computed once)
pub fn small_primes() -> &'static [u32] {
    SMALL_PRIMES.get_or_init(|| sieve(SIEVE_LIMIT))
}

fn sieve(limit: usize) -> Vec<u32> {
    let mut is_prime = vec![true; limit];
    for flag in is_prime.iter_mut().take(2) {
        *flag = false;
    }

    let mut i = 2;
    while i * i < limit {
        if is_prime[i] {
            for multiple in (i * i..limit).step_by(i) {
                is_prime[multiple] = false;
            }
        }
        i += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(n, &prime)| prime.then_some(n as u32))
        .collect()
}

/// Trial division by the small primes.
///
/// Returns `Some(verdict)` when the small primes settle the question and
/// `None` when a probabilistic test is still required.
fn trial_division(n: &BigUint) -> Option<bool> {
    if let Some(small) = n.to_u32() {
        if (small as usize) < SIEVE_LIMIT {
            return Some(small_primes().binary_search(&small).is_ok());
        }
    }

    for &prime in small_primes() {
        if (n % prime).is_zero() {
            return Some(false);
        }
    }
    None
}

/// One Miller-Rabin round for odd `n > 3` with `n - 1 = d * 2^s`
fn witness_passes(n: &BigUint, n_minus_one: &BigUint, d: &BigUint, s: u64, a: &BigUint) -> bool {
    let mut check = mod_pow(a, d, n);
    if check.is_one() || check == *n_minus_one {
        return true;
    }

    for _ in 1..s {
        check = (&check * &check) % n;
        if check == *n_minus_one {
            return true;
        }
        if check.is_one() {
            return false;
        }
    }
    false
}

/// Probabilistic primality test: trial division, then `rounds` Miller-Rabin
/// rounds with witnesses drawn uniformly from `[2, n - 2]`.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
    if let Some(verdict) = trial_division(n) {
        return verdict;
    }

    // n is odd and larger than every sieve prime here
    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    let low = BigUint::from(2u32);
    let high = n - 1u32;
    (0..rounds).all(|_| {
        let a = rng.gen_biguint_range(&low, &high);
        witness_passes(n, &n_minus_one, &d, s, &a)
    })
}

/// Draw a probable prime from `(bound, 2 * bound]`.
pub fn suggest_prime<R: Rng + ?Sized>(bound: &BigUint, rng: &mut R) -> BigUint {
    let bound = if bound.is_zero() { BigUint::one() } else { bound.clone() };
    let low = &bound + 1u32;
    let high = &bound * 2u32 + 1u32;

    let mut attempts = 0u64;
    loop {
        attempts += 1;
        let mut candidate = rng.gen_biguint_range(&low, &high);
        // Even candidates can only be prime when equal to 2
        if candidate.is_even() && candidate != BigUint::from(2u32) {
            candidate += 1u32;
            if candidate >= high {
                continue;
            }
        }

        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, rng) {
            trace!(attempts, digits = candidate.to_string().len(), "prime found");
            return candidate;
        }
    }
}

/// Draw the fingerprint base uniformly from `[1, p)`.
///
/// # Panics
/// Panics if `p < 2`.
pub fn choose_base<R: Rng + ?Sized>(p: &BigUint, rng: &mut R) -> BigUint {
    assert!(*p >= BigUint::from(2u32), "modulus must be at least 2");
    rng.gen_biguint_range(&BigUint::one(), p)
}
