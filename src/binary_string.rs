//! BinaryString - Fixed-capacity bit vector packed into 64-bit groups.
//!
//! A `BinaryString` is the signature type used for Hamming-space similarity:
//! bits are packed into `u64` groups and compared with XOR + popcount.
//!
//! # Design
//!
//! - Uses `Box<[u64]>` for storage; the group count is fixed at construction
//! - Bit indexing: group_idx = bit_idx / 64, bit_offset = bit_idx % 64
//! - Offset 0 is the least-significant bit of its group
//! - Reads past capacity return `false`; writes past capacity are rejected
//!
//! # Precondition policy
//!
//! `set_bit` and `hamming_distance` always validate their preconditions and
//! panic with a descriptive message, in every build mode. The `try_*` forms
//! check the same conditions and return [`HammingError`] instead.
//!
//! # Examples
//!
//! ```
//! use lsh_hamming::BinaryString;
//!
//! let mut s = BinaryString::new(1);
//! s.set_bit(0, true);
//! s.set_bit(5, true);
//!
//! let mut t = BinaryString::new(1);
//! t.set_bit(5, true);
//! t.set_bit(63, true);
//!
//! assert_eq!(s.hamming_distance(&t), 2);
//! assert!(!s.get_bit(1000));
//! ```

use bitvec::order::Lsb0;
use bitvec::slice::BitSlice;
use itertools::Itertools;
use rand::Rng;
use std::fmt;
use std::ops::BitXor;

use crate::error::{HammingError, Result};

/// Group type for bit storage (64-bit unsigned integer)
pub type Group = u64;

/// Number of bits per group
pub const BITS_PER_GROUP: usize = 64;

/// Get group index from bit position
#[inline(always)]
const fn get_group_idx(bit_pos: usize) -> usize {
    bit_pos >> 6 // bit_pos / 64
}

/// Get bit offset within group from bit position
#[inline(always)]
const fn get_bit_offset(bit_pos: usize) -> usize {
    bit_pos & 63 // bit_pos % 64
}

/// Single-bit mask for an offset in 0..64
#[inline(always)]
const fn bit_mask(offset: usize) -> Group {
    1u64 << offset
}

/// Number of groups needed to hold `num_bits` bits.
///
/// ```
/// use lsh_hamming::groups_for_bits;
///
/// assert_eq!(groups_for_bits(0), 0);
/// assert_eq!(groups_for_bits(64), 1);
/// assert_eq!(groups_for_bits(65), 2);
/// ```
#[inline]
pub const fn groups_for_bits(num_bits: usize) -> usize {
    (num_bits + BITS_PER_GROUP - 1) / BITS_PER_GROUP
}

/// Fixed-capacity binary string stored as 64-bit groups.
///
/// Capacity is always a whole number of groups: `num_groups() * 64` bits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BinaryString {
    groups: Box<[Group]>,
}

impl BinaryString {
    /// Create a BinaryString with `num_groups` groups, all bits 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use lsh_hamming::BinaryString;
    ///
    /// let s = BinaryString::new(2);
    /// assert_eq!(s.num_bits(), 128);
    /// assert_eq!(s.num_set(), 0);
    /// ```
    pub fn new(num_groups: usize) -> Self {
        Self {
            groups: vec![0; num_groups].into_boxed_slice(),
        }
    }

    /// Create a BinaryString large enough for `num_bits` bits.
    ///
    /// The capacity is rounded up to a whole number of groups.
    pub fn with_bits(num_bits: usize) -> Self {
        Self::new(groups_for_bits(num_bits))
    }

    /// Wrap existing group values.
    pub fn from_groups(groups: Vec<Group>) -> Self {
        Self {
            groups: groups.into_boxed_slice(),
        }
    }

    /// Build from a vector of 0/1 values, one per bit.
    ///
    /// Any non-zero value is treated as 1.
    pub fn from_bits(vals: &[u8]) -> Self {
        let mut s = Self::with_bits(vals.len());
        for (i, &val) in vals.iter().enumerate() {
            if val > 0 {
                s.groups[get_group_idx(i)] |= bit_mask(get_bit_offset(i));
            }
        }
        s
    }

    /// Build a string of `num_groups` groups with the bits at `idxs` set.
    ///
    /// Indices past capacity are silently ignored.
    pub fn from_acts(num_groups: usize, idxs: &[usize]) -> Self {
        let mut s = Self::new(num_groups);
        let num_bits = s.num_bits();
        for &idx in idxs.iter().filter(|&&idx| idx < num_bits) {
            s.groups[get_group_idx(idx)] |= bit_mask(get_bit_offset(idx));
        }
        s
    }

    /// Copy the bits of a `bitvec` slice, rounding up to whole groups.
    pub fn from_bitslice(bits: &BitSlice<Group, Lsb0>) -> Self {
        let mut s = Self::with_bits(bits.len());
        for idx in bits.iter_ones() {
            s.groups[get_group_idx(idx)] |= bit_mask(get_bit_offset(idx));
        }
        s
    }

    // =========================================================================
    // Single Bit Operations
    // =========================================================================

    /// Get bit at position `idx`.
    ///
    /// Positions at or beyond `num_bits()` read as `false`, so a shorter
    /// string behaves as if padded with zeros.
    #[inline]
    pub fn get_bit(&self, idx: usize) -> bool {
        match self.groups.get(get_group_idx(idx)) {
            Some(group) => group & bit_mask(get_bit_offset(idx)) != 0,
            None => false,
        }
    }

    /// Set bit at position `idx` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= num_bits()`. Use [`try_set_bit`](Self::try_set_bit)
    /// for a non-panicking form.
    #[inline]
    pub fn set_bit(&mut self, idx: usize, value: bool) {
        if let Err(e) = self.try_set_bit(idx, value) {
            panic!("{}", e);
        }
    }

    /// Set bit at position `idx` to `value`, rejecting positions past capacity.
    #[inline]
    pub fn try_set_bit(&mut self, idx: usize, value: bool) -> Result<()> {
        let capacity = self.num_bits();
        let group = self
            .groups
            .get_mut(get_group_idx(idx))
            .ok_or(HammingError::IndexOutOfBounds {
                index: idx,
                capacity,
            })?;

        let mask = bit_mask(get_bit_offset(idx));
        if value {
            *group |= mask;
        } else {
            *group &= !mask;
        }
        Ok(())
    }

    /// Toggle bit at position `idx` (0 -> 1, 1 -> 0).
    ///
    /// # Panics
    ///
    /// Panics if `idx >= num_bits()`.
    #[inline]
    pub fn toggle_bit(&mut self, idx: usize) {
        let value = !self.get_bit(idx);
        self.set_bit(idx, value);
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Set all bits to 1.
    pub fn set_all(&mut self) {
        self.groups.fill(Group::MAX);
    }

    /// Clear all bits to 0.
    pub fn clear_all(&mut self) {
        self.groups.fill(0);
    }

    /// Get all bit values as a vector of 0s and 1s, covering full capacity.
    pub fn get_bits(&self) -> Vec<u8> {
        (0..self.num_bits()).map(|b| self.get_bit(b) as u8).collect()
    }

    /// Get indices of all set bits in ascending order.
    pub fn get_acts(&self) -> Vec<usize> {
        let mut acts = Vec::with_capacity(self.num_set());
        for (group_idx, &group) in self.groups.iter().enumerate() {
            let base = group_idx * BITS_PER_GROUP;
            let mut remaining = group;
            while remaining != 0 {
                acts.push(base + remaining.trailing_zeros() as usize);
                remaining &= remaining - 1;
            }
        }
        acts
    }

    // =========================================================================
    // Comparison Operations
    // =========================================================================

    /// Check whether two strings hold the same bits.
    ///
    /// Strings with different group counts are never the same, even if the
    /// extra groups are all zero. Stops at the first differing group.
    pub fn is_same(&self, other: &BinaryString) -> bool {
        if self.groups.len() != other.groups.len() {
            return false;
        }
        self.groups
            .iter()
            .zip(other.groups.iter())
            .all(|(a, b)| a == b)
    }

    /// Count bit positions at which `self` and `other` differ.
    ///
    /// # Panics
    ///
    /// Panics if the strings have different group counts. Use
    /// [`try_hamming_distance`](Self::try_hamming_distance) for a
    /// non-panicking form.
    ///
    /// # Examples
    ///
    /// ```
    /// use lsh_hamming::BinaryString;
    ///
    /// let ones = BinaryString::from_groups(vec![u64::MAX]);
    /// let zeros = BinaryString::new(1);
    /// assert_eq!(ones.hamming_distance(&zeros), 64);
    /// ```
    #[inline]
    pub fn hamming_distance(&self, other: &BinaryString) -> u64 {
        match self.try_hamming_distance(other) {
            Ok(distance) => distance,
            Err(e) => panic!("{}", e),
        }
    }

    /// Count differing bit positions, rejecting strings of unequal group count.
    pub fn try_hamming_distance(&self, other: &BinaryString) -> Result<u64> {
        if self.groups.len() != other.groups.len() {
            return Err(HammingError::GroupCountMismatch {
                left: self.groups.len(),
                right: other.groups.len(),
            });
        }
        Ok(self
            .groups
            .iter()
            .zip_eq(other.groups.iter())
            .map(|(a, b)| (a ^ b).count_ones() as u64)
            .sum())
    }

    // =========================================================================
    // Counting Operations
    // =========================================================================

    /// Count number of set bits (population count).
    #[inline]
    pub fn num_set(&self) -> usize {
        self.groups.iter().map(|g| g.count_ones() as usize).sum()
    }

    // =========================================================================
    // Random Operations
    // =========================================================================

    /// Randomly set exactly `num` bits to 1, clearing all others.
    ///
    /// # Panics
    ///
    /// Panics if `num > num_bits()`.
    pub fn random_set_num<R: Rng>(&mut self, rng: &mut R, num: usize) {
        self.clear_all();
        for idx in rand::seq::index::sample(rng, self.num_bits(), num).iter() {
            self.groups[get_group_idx(idx)] |= bit_mask(get_bit_offset(idx));
        }
    }

    /// Randomly set `pct * num_bits()` bits to 1 (rounded down).
    ///
    /// `pct` should be in range [0.0, 1.0].
    pub fn random_set_pct<R: Rng>(&mut self, rng: &mut R, pct: f64) {
        debug_assert!((0.0..=1.0).contains(&pct));
        let num = (self.num_bits() as f64 * pct) as usize;
        self.random_set_num(rng, num);
    }

    // =========================================================================
    // Information and Access
    // =========================================================================

    /// Get number of groups in storage.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Get bit capacity (`num_groups() * 64`).
    #[inline]
    pub fn num_bits(&self) -> usize {
        self.groups.len() * BITS_PER_GROUP
    }

    /// Get direct read-only access to group storage.
    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Get direct mutable access to group storage.
    ///
    /// The slice cannot be resized, so capacity is preserved.
    #[inline]
    pub fn groups_mut(&mut self) -> &mut [Group] {
        &mut self.groups
    }

    /// View the string as a `bitvec` slice; index `i` matches `get_bit(i)`.
    #[inline]
    pub fn as_bitslice(&self) -> &BitSlice<Group, Lsb0> {
        BitSlice::from_slice(&self.groups[..])
    }
}

/// Hamming distance between two strings of equal group count.
///
/// # Panics
///
/// Panics if the group counts differ.
#[inline]
pub fn hamming_distance(left: &BinaryString, right: &BinaryString) -> u64 {
    left.hamming_distance(right)
}

// =============================================================================
// Operators
// =============================================================================

impl BitXor for &BinaryString {
    type Output = BinaryString;

    /// Bits set where the operands differ.
    fn bitxor(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.groups.len(),
            rhs.groups.len(),
            "BinaryStrings must have same group count"
        );
        let groups: Vec<Group> = self
            .groups
            .iter()
            .zip(rhs.groups.iter())
            .map(|(a, b)| a ^ b)
            .collect();
        BinaryString::from_groups(groups)
    }
}

impl BitXor for BinaryString {
    type Output = BinaryString;

    fn bitxor(self, rhs: Self) -> Self::Output {
        &self ^ &rhs
    }
}

impl fmt::Display for BinaryString {
    /// Bits as `0`/`1` characters, bit 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in 0..self.num_bits() {
            f.write_str(if self.get_bit(idx) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new() {
        let s = BinaryString::new(16);
        assert_eq!(s.num_groups(), 16);
        assert_eq!(s.num_bits(), 1024);
        assert_eq!(s.num_set(), 0);
    }

    #[test]
    fn test_with_bits_rounds_up() {
        assert_eq!(BinaryString::with_bits(0).num_groups(), 0);
        assert_eq!(BinaryString::with_bits(1).num_groups(), 1);
        assert_eq!(BinaryString::with_bits(64).num_groups(), 1);
        assert_eq!(BinaryString::with_bits(129).num_groups(), 3);
    }

    #[test]
    fn test_set_get_bit() {
        let mut s = BinaryString::new(1);
        assert!(!s.get_bit(5));
        s.set_bit(5, true);
        assert!(s.get_bit(5));
        s.set_bit(5, false);
        assert!(!s.get_bit(5));
    }

    #[test]
    fn test_high_offsets() {
        // Offsets 32..64 need a 64-bit mask.
        let mut s = BinaryString::new(1);
        s.set_bit(31, true);
        s.set_bit(32, true);
        s.set_bit(63, true);
        assert_eq!(s.groups()[0], (1 << 31) | (1 << 32) | (1 << 63));
        assert!(s.get_bit(63));
        assert!(!s.get_bit(33));
    }

    #[test]
    fn test_group_boundary() {
        let mut s = BinaryString::new(2);
        s.set_bit(63, true);
        s.set_bit(64, true);
        assert_eq!(s.groups(), &[1u64 << 63, 1]);

        s.set_bit(63, false);
        assert_eq!(s.groups(), &[0, 1]);
    }

    #[test]
    fn test_get_bit_out_of_range() {
        let mut s = BinaryString::new(1);
        s.set_all();
        assert!(!s.get_bit(64));
        assert!(!s.get_bit(usize::MAX));
        assert!(!BinaryString::new(0).get_bit(0));
    }

    #[test]
    fn test_try_set_bit_out_of_range() {
        let mut s = BinaryString::new(1);
        let err = s.try_set_bit(64, true).unwrap_err();
        assert!(matches!(
            err,
            HammingError::IndexOutOfBounds {
                index: 64,
                capacity: 64
            }
        ));
        assert_eq!(s.num_set(), 0);
    }

    #[test]
    #[should_panic(expected = "Index out of bounds")]
    fn test_set_bit_out_of_range_panics() {
        let mut s = BinaryString::new(1);
        s.set_bit(64, true);
    }

    #[test]
    fn test_toggle_bit() {
        let mut s = BinaryString::new(1);
        s.toggle_bit(7);
        assert!(s.get_bit(7));
        s.toggle_bit(7);
        assert!(!s.get_bit(7));
    }

    #[test]
    fn test_from_bits() {
        let s = BinaryString::from_bits(&[0, 1, 0, 1, 0, 1, 0, 7]);
        assert_eq!(s.num_groups(), 1);
        assert_eq!(s.get_acts(), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_from_acts_ignores_out_of_range() {
        let s = BinaryString::from_acts(1, &[2, 4, 64, 100]);
        assert_eq!(s.get_acts(), vec![2, 4]);
    }

    #[test]
    fn test_get_bits() {
        let s = BinaryString::from_acts(1, &[1, 3]);
        let bits = s.get_bits();
        assert_eq!(bits.len(), 64);
        assert_eq!(&bits[..5], &[0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_get_acts_across_groups() {
        let s = BinaryString::from_acts(3, &[0, 63, 64, 127, 191]);
        assert_eq!(s.get_acts(), vec![0, 63, 64, 127, 191]);
    }

    #[test]
    fn test_is_same() {
        let a = BinaryString::from_acts(2, &[5, 70]);
        let b = BinaryString::from_acts(2, &[5, 70]);
        let c = BinaryString::from_acts(2, &[5]);
        assert!(a.is_same(&b));
        assert!(!a.is_same(&c));
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_same_group_count_mismatch() {
        let a = BinaryString::new(1);
        let b = BinaryString::new(2);
        assert!(!a.is_same(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_hamming_distance() {
        let s = BinaryString::from_acts(1, &[0, 5]);
        let t = BinaryString::from_acts(1, &[5, 63]);
        assert_eq!(s.hamming_distance(&t), 2);
        assert_eq!(hamming_distance(&t, &s), 2);
    }

    #[test]
    fn test_hamming_distance_all_ones() {
        let s = BinaryString::from_groups(vec![u64::MAX]);
        let t = BinaryString::new(1);
        assert_eq!(s.hamming_distance(&t), 64);
    }

    #[test]
    fn test_try_hamming_distance_mismatch() {
        let a = BinaryString::new(1);
        let b = BinaryString::new(3);
        let err = a.try_hamming_distance(&b).unwrap_err();
        assert!(matches!(
            err,
            HammingError::GroupCountMismatch { left: 1, right: 3 }
        ));
    }

    #[test]
    #[should_panic(expected = "Group count mismatch")]
    fn test_hamming_distance_mismatch_panics() {
        let a = BinaryString::new(1);
        let b = BinaryString::new(2);
        a.hamming_distance(&b);
    }

    #[test]
    fn test_bitwise_xor() {
        let a = BinaryString::from_acts(1, &[2, 3]);
        let b = BinaryString::from_acts(1, &[1, 3]);
        let diff = &a ^ &b;
        assert_eq!(diff.get_acts(), vec![1, 2]);
        assert_eq!(diff.num_set() as u64, a.hamming_distance(&b));
    }

    #[test]
    fn test_random_set_num() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let mut s = BinaryString::new(16);
        s.random_set_num(&mut rng, 100);
        assert_eq!(s.num_set(), 100);

        s.random_set_pct(&mut rng, 0.5);
        assert_eq!(s.num_set(), 512);
    }

    #[test]
    fn test_bitslice_view() {
        let s = BinaryString::from_acts(2, &[0, 63, 64]);
        let bits = s.as_bitslice();
        assert_eq!(bits.len(), 128);
        assert!(bits[0] && bits[63] && bits[64]);
        assert_eq!(bits.count_ones(), 3);

        let copy = BinaryString::from_bitslice(&bits[..65]);
        assert_eq!(copy.num_groups(), 2);
        assert_eq!(copy.get_acts(), vec![0, 63, 64]);
    }

    #[test]
    fn test_display() {
        let s = BinaryString::from_acts(1, &[0, 2]);
        let text = s.to_string();
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("1010"));
    }
}
