//! lsh-hamming - Packed binary strings with Hamming distance
//!
//! A fixed-capacity bit vector stored as 64-bit groups, meant as the signature
//! primitive underneath a locality-sensitive hashing system. Signatures are
//! populated bit by bit, compared for exact equality, and ranked by Hamming
//! distance (XOR + population count per group).
//!
//! # Examples
//!
//! ```
//! use lsh_hamming::BinaryString;
//!
//! // 128-bit signature
//! let mut a = BinaryString::with_bits(128);
//! let mut b = BinaryString::with_bits(128);
//! a.set_bit(3, true);
//! a.set_bit(100, true);
//! b.set_bit(100, true);
//!
//! assert_eq!(a.hamming_distance(&b), 1);
//! assert!(!a.is_same(&b));
//!
//! // Reads past capacity are zero
//! assert!(!a.get_bit(4096));
//!
//! // Checked forms report precondition violations
//! assert!(a.try_set_bit(128, true).is_err());
//! assert!(a.try_hamming_distance(&BinaryString::new(1)).is_err());
//! ```
//!
//! # Safety
//!
//! Preconditions (`set_bit` within capacity, equal group counts for
//! `hamming_distance`) are checked in every build mode. Violations panic, or
//! return [`HammingError`] from the `try_*` forms.

pub mod binary_string;
pub mod error;

pub use binary_string::{groups_for_bits, hamming_distance, BinaryString, Group, BITS_PER_GROUP};
pub use error::{HammingError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
