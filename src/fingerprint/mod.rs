//! Karp-Rabin fingerprinting
//!
//! ## Architecture
//!
//! - `table`: `f(i)` for every suffix start, built by one backward pass
//! - `oracle`: fingerprint of any substring from two table lookups
//! - `modular`: square-and-multiply modular exponentiation

pub mod modular;
pub mod oracle;
pub mod table;

// Re-exports for convenience
pub use modular::{mod_pow, mod_pow_usize};
pub use oracle::Fingerprinter;
pub use table::FingerprintTable;
