/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bits::BitVec;
use crate::hash::{bucket, split, xorshift_mult64};
use crate::mph::BBHashBuilder;
use crate::rank_sel::Rank512;
use crate::traits::{BitCount, Rank};
use anyhow::Result;
use dsi_progress_logger::no_logging;
use mem_dbg::*;

/// A BBHash minimal perfect hash function over 64-bit keys.
///
/// The function is a sequence of levels, each made of a bit vector and of a
/// [ranking structure](Rank512). A key is placed at the first level at which
/// its bucket is set; its value is then the number of ones preceding the
/// bucket in the concatenation of all bit vectors, plus one. Thus, the keys of
/// the construction set are mapped bijectively onto [1 . . *n*].
///
/// Instances are built by a [`BBHashBuilder`] or by [`BBHash::new`], and
/// cannot be modified afterwards: all methods take `&self`, and the structure
/// is [`Send`] and [`Sync`], so a single instance can be shared, for
/// example through an [`Arc`](std::sync::Arc), and queried concurrently by
/// any number of threads.
///
/// The value returned for a key outside the construction set is either zero,
/// if no level claims the key's bucket, or an arbitrary value in
/// [1 . . *n*]. Membership cannot be tested with this structure.
#[derive(Debug, Clone, MemDbg, MemSize)]
pub struct BBHash {
    levels: Vec<Rank512>,
    num_keys: usize,
}

impl BBHash {
    /// Build a function over the given keys with the given γ and default
    /// settings, without logging.
    ///
    /// See [`BBHashBuilder`] for more options.
    pub fn new(gamma: f64, keys: impl IntoIterator<Item = u64>) -> Result<Self> {
        BBHashBuilder::default()
            .gamma(gamma)
            .try_build(keys, no_logging![])
    }

    /// Assemble a function from the bit vectors of its levels, computing the
    /// ranking structures.
    ///
    /// The ranks of each level start from the total number of ones of the
    /// preceding levels.
    pub(crate) fn from_level_bits(level_bits: Vec<BitVec>) -> Self {
        let mut base = 0;
        let levels = level_bits
            .into_iter()
            .map(|bits| {
                let rank = Rank512::with_base(bits, base);
                base = rank.end_rank();
                rank
            })
            .collect::<Vec<_>>();
        Self {
            levels,
            num_keys: base as usize,
        }
    }

    /// Return the value associated with `key`, in the range [1 . . *n*], or
    /// zero if `key` is not placed at any level.
    ///
    /// If `key` was not in the construction set, the result is either zero
    /// or an arbitrary value in the range.
    #[inline]
    pub fn get(&self, key: u64) -> u64 {
        let (h1, h2) = split(xorshift_mult64(key));

        for (level, rank) in self.levels.iter().enumerate() {
            let pos = bucket(h1, h2, level as u32, rank.len());
            // Buckets are always smaller than the level length
            if unsafe { rank.bits().get_unchecked(pos) } {
                return unsafe { rank.rank_unchecked(pos) } as u64 + 1;
            }
        }

        0
    }

    /// Return the number of keys.
    pub fn len(&self) -> usize {
        self.num_keys
    }

    /// Return whether the function was built over an empty set of keys.
    pub fn is_empty(&self) -> bool {
        self.num_keys == 0
    }

    /// Return the number of levels.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Return the levels.
    pub fn levels(&self) -> &[Rank512] {
        &self.levels
    }

    /// Return the number of keys placed at each level.
    pub fn keys_per_level(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels.iter().map(|rank| rank.count())
    }

    /// Return the size in bytes of the bit vectors and of the rank counters.
    pub fn size_in_bytes(&self) -> usize {
        self.levels
            .iter()
            .map(|rank| rank.num_words() * core::mem::size_of::<u64>())
            .sum()
    }

    /// Return the number of bits per key used by the bit vectors and the rank
    /// counters.
    pub fn bits_per_key(&self) -> f64 {
        if self.num_keys == 0 {
            return 0.0;
        }
        (self.size_in_bytes() * 8) as f64 / self.num_keys as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton() -> Result<()> {
        let mph = BBHash::new(2.0, [42])?;
        assert_eq!(mph.len(), 1);
        assert_eq!(mph.num_levels(), 1);
        assert_eq!(mph.get(42), 1);
        // One word of bits and one counter
        assert_eq!(mph.size_in_bytes(), 16);
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<()> {
        let mph = BBHash::new(2.0, std::iter::empty())?;
        assert!(mph.is_empty());
        assert_eq!(mph.num_levels(), 0);
        assert_eq!(mph.size_in_bytes(), 0);
        assert_eq!(mph.bits_per_key(), 0.0);
        assert_eq!(mph.get(0), 0);
        assert_eq!(mph.get(42), 0);
        Ok(())
    }

    #[test]
    fn test_from_level_bits() {
        let mut first = BitVec::new(64);
        first.set(3, true);
        first.set(60, true);
        let mut second = BitVec::new(64);
        second.set(0, true);
        let mph = BBHash::from_level_bits(vec![first, second]);
        assert_eq!(mph.len(), 3);
        assert_eq!(mph.keys_per_level().collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(mph.levels()[1].base(), 2);
        assert_eq!(mph.levels()[1].rank(0), 2);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BBHash>();
    }
}
