/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Level-parameterized hash probes.
//!
//! A key is first scrambled by [`xorshift_mult64`], a bijective
//! xorshift-multiply mixer, and the result is [split](split) into two 32-bit
//! halves. The bucket of the key at level *ℓ* of a bit vector of *m* bits is
//! then (*h*₁ ⊕ rotl(*h*₂, *ℓ*)) mod *m*.
//!
//! Rotations are taken modulo 32, so levels 32 apart share the same
//! rotation; since their bit vectors have different sizes, they do not
//! share the same bucket assignment.
//!
//! # Reference:
//! - [Sebastiano Vigna, An experimental exploration of Marsaglia's xorshift generators, scrambled](http://vigna.di.unimi.it/ftp/papers/xorshift.pdf)

/// The multiplier of the xorshift64* generator.
pub const XORSHIFT_MULT: u64 = 2685821657736338717;

/// Scramble a 64-bit value with three xorshift steps followed by a
/// multiplication by an odd constant.
///
/// The function is a bijection of `u64`, so distinct keys have distinct
/// hashes.
#[inline(always)]
#[must_use]
pub const fn xorshift_mult64(mut x: u64) -> u64 {
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    x.wrapping_mul(XORSHIFT_MULT)
}

/// Split a 64-bit hash into its lower and upper 32-bit halves.
#[inline(always)]
#[must_use]
pub const fn split(hash: u64) -> (u32, u32) {
    (hash as u32, (hash >> 32) as u32)
}

/// Return the bucket associated with the given halves at a level
/// whose bit vector has `size` bits.
///
/// `size` must be nonzero.
#[inline(always)]
#[must_use]
pub const fn bucket(h1: u32, h2: u32, level: u32, size: usize) -> usize {
    (h1 ^ h2.rotate_left(level)) as usize % size
}

/// Return the bucket of `key` at the given level for a bit vector of
/// `size` bits.
#[inline(always)]
#[must_use]
pub const fn probe(key: u64, level: u32, size: usize) -> usize {
    let (h1, h2) = split(xorshift_mult64(key));
    bucket(h1, h2, level, size)
}
