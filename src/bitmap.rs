//! Dense membership set over the 32-bit address space.
//!
//! One bit per possible IPv4 address: 2^32 bits = 512 MiB, allocated once per
//! scan (or once per worker in the parallel case). Bit `k` lives in byte
//! `k / 8` at offset `k % 8`. Deduplication therefore costs O(1) memory per
//! observed address and zero per-element allocation.
//!
//! A set is exclusively owned by the scan that fills it: `test_and_set` takes
//! `&mut self`, which makes unsynchronized cross-thread mutation unrepresentable.
//! Parallel scans give each worker its own set and fold them together with
//! [`MembershipSet::merge_or`] after the join.

use crate::error::{Result, UniqipError};

/// Number of bits needed to cover every possible IPv4 address.
pub const ADDRESS_SPACE_BITS: u64 = 1 << 32;

/// Fixed-size bit vector indexed directly by address key.
pub struct MembershipSet {
    bytes: Vec<u8>,
    bits: u64,
}

impl MembershipSet {
    /// Allocate a zeroed set covering `size_bits` bits.
    ///
    /// Fails with [`UniqipError::Allocation`] when the backing buffer cannot
    /// be reserved. Callers treat that as fatal: the algorithm's memory
    /// budget depends on this single allocation succeeding.
    pub fn new(size_bits: u64) -> Result<Self> {
        let len = size_bits.div_ceil(8) as usize;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| UniqipError::allocation(len))?;
        bytes.resize(len, 0);
        Ok(MembershipSet {
            bytes,
            bits: size_bits,
        })
    }

    /// The 2^32-bit instance used by the scan engines.
    pub fn for_address_space() -> Result<Self> {
        Self::new(ADDRESS_SPACE_BITS)
    }

    /// Capacity in bits.
    pub fn size_bits(&self) -> u64 {
        self.bits
    }

    /// Record `key` as observed. Returns true if the bit was already set
    /// (duplicate), false if this call just set it (first observation).
    #[inline]
    pub fn test_and_set(&mut self, key: u32) -> bool {
        debug_assert!((key as u64) < self.bits, "key {} outside set domain", key);
        let index = (key >> 3) as usize;
        let mask = 1u8 << (key & 7);
        let seen = self.bytes[index] & mask != 0;
        self.bytes[index] |= mask;
        seen
    }

    /// Population count over the whole vector.
    ///
    /// 64-bit accumulator: the theoretical maximum (2^32) has zero headroom
    /// in a u32.
    pub fn count_set(&self) -> u64 {
        self.bytes.iter().map(|b| b.count_ones() as u64).sum()
    }

    /// Bitwise-OR `other` into `self`, byte by byte.
    ///
    /// Associative and commutative, so per-worker sets can be folded in any
    /// order. Both sets must cover the same domain.
    pub fn merge_or(&mut self, other: &MembershipSet) {
        assert_eq!(
            self.bits, other.bits,
            "cannot merge membership sets of different sizes"
        );
        for (dst, src) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *dst |= src;
        }
    }
}
