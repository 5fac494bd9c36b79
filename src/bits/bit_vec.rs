/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

A word-packed bit vector with a `Vec<u64>` as underlying storage.

The vector has a fixed length set at construction time. It is used both as
scratch space (occupancy and collision marks) during the construction of a
[`BBHash`](crate::mph::BBHash), where it is [recycled](BitVec::reset) from
one level to the next, and as the final, immutable per-level bit array.

 */
use crate::traits::*;
use mem_dbg::*;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::ops::Index;

/// Number of bits in a word of the backend.
pub const BITS_PER_WORD: usize = u64::BITS as usize;

macro_rules! panic_if_out_of_bounds {
    ($index: expr, $len: expr) => {
        if $index >= $len {
            panic!("Bit index out of bounds: {} >= {}", $index, $len)
        }
    };
}

/// A fixed-length bit vector packed into 64-bit words.
#[derive(Debug, Clone, PartialEq, Eq, MemDbg, MemSize)]
pub struct BitVec {
    data: Vec<u64>,
    len: usize,
}

impl BitLength for BitVec {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}

impl Index<usize> for BitVec {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            false => &false,
            true => &true,
        }
    }
}

impl AsRef<[u64]> for BitVec {
    #[inline(always)]
    fn as_ref(&self) -> &[u64] {
        &self.data
    }
}

impl BitVec {
    /// Create a new zeroed bit vector of length `len`.
    pub fn new(len: usize) -> Self {
        Self::with_value(len, false)
    }

    /// Create a new bit vector of length `len` with all bits set to `value`.
    pub fn with_value(len: usize, value: bool) -> Self {
        let n_of_words = len.div_ceil(BITS_PER_WORD);
        let fill = if value { u64::MAX } else { 0 };
        let mut data = vec![fill; n_of_words];
        // Bits past the end must stay zero, or counts would be wrong
        let residual = len % BITS_PER_WORD;
        if value && residual != 0 {
            data[n_of_words - 1] = (1 << residual) - 1;
        }
        Self { data, len }
    }

    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    /// Return the number of bits in this bit vector.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return the number of words of the backend.
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.data.len()
    }

    /// # Safety
    /// `data` must contain exactly `len.div_ceil(64)` words, and the bits of
    /// the last word past `len` must be zero.
    #[inline(always)]
    pub unsafe fn from_raw_parts(data: Vec<u64>, len: usize) -> Self {
        debug_assert_eq!(data.len(), len.div_ceil(BITS_PER_WORD));
        Self { data, len }
    }

    #[inline(always)]
    pub fn into_raw_parts(self) -> (Vec<u64>, usize) {
        (self.data, self.len)
    }

    pub fn get(&self, index: usize) -> bool {
        panic_if_out_of_bounds!(index, self.len);
        unsafe { self.get_unchecked(index) }
    }

    pub fn set(&mut self, index: usize, value: bool) {
        panic_if_out_of_bounds!(index, self.len);
        unsafe { self.set_unchecked(index, value) }
    }

    /// # Safety
    ///
    /// `index` must be between 0 (included) and [`BitVec::len`] (excluded).
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> bool {
        let word = *self.data.get_unchecked(index / BITS_PER_WORD);
        (word >> (index % BITS_PER_WORD)) & 1 != 0
    }

    /// # Safety
    ///
    /// `index` must be between 0 (included) and [`BitVec::len`] (excluded).
    #[inline(always)]
    pub unsafe fn set_unchecked(&mut self, index: usize, value: bool) {
        let word_index = index / BITS_PER_WORD;
        let bit_index = index % BITS_PER_WORD;

        // For constant values, this should be inlined with no test.
        if value {
            *self.data.get_unchecked_mut(word_index) |= 1 << bit_index;
        } else {
            *self.data.get_unchecked_mut(word_index) &= !(1 << bit_index);
        }
    }

    /// Set all bits to zero, keeping the length.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Return the number of bits set to 1 in this bit vector.
    ///
    /// If the feature "rayon" is enabled, this function is parallelized.
    pub fn count_ones(&self) -> usize {
        #[cfg(feature = "rayon")]
        {
            self.data.par_iter().map(|x| x.count_ones() as usize).sum()
        }

        #[cfg(not(feature = "rayon"))]
        {
            self.data.iter().map(|x| x.count_ones() as usize).sum()
        }
    }

    /// Return an iterator over the bits of this bit vector.
    pub fn iter(&self) -> BitIterator<'_> {
        BitIterator { bits: self, pos: 0 }
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut data = Vec::new();
        let mut len = 0;
        let mut word = 0_u64;
        for bit in iter {
            word |= (bit as u64) << (len % BITS_PER_WORD);
            len += 1;
            if len % BITS_PER_WORD == 0 {
                data.push(word);
                word = 0;
            }
        }
        if len % BITS_PER_WORD != 0 {
            data.push(word);
        }
        Self { data, len }
    }
}

/// An iterator over the bits of a [`BitVec`].
pub struct BitIterator<'a> {
    bits: &'a BitVec,
    pos: usize,
}

impl Iterator for BitIterator<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.bits.len {
            return None;
        }
        let bit = unsafe { self.bits.get_unchecked(self.pos) };
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let residual = self.bits.len - self.pos;
        (residual, Some(residual))
    }
}

impl ExactSizeIterator for BitIterator<'_> {}

impl<'a> IntoIterator for &'a BitVec {
    type Item = bool;
    type IntoIter = BitIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
