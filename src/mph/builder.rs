/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bits::*;
use crate::hash::{bucket, split, xorshift_mult64};
use crate::mph::BBHash;
use anyhow::Result;
use derivative::Derivative;
use derive_setters::*;
use dsi_progress_logger::*;

/// A good default value for the ratio between the number of bits of a level
/// and the number of keys it has to place.
pub const DEFAULT_GAMMA: f64 = 2.0;

/// The default bound on the number of levels of a construction.
pub const DEFAULT_MAX_LEVELS: usize = 256;

/// A builder for [`BBHash`].
///
/// Construction proceeds by levels. At each level, the keys still to be
/// placed are hashed onto a bit vector whose size is the number of such keys
/// times [γ](BBHashBuilder::gamma), rounded up to a multiple of 64. Keys that
/// land alone in their bucket are placed at this level, and their bucket is
/// set in the level's bit vector; the remaining keys are deferred to the next
/// level. Construction ends when all keys have been placed.
///
/// Collisions are detected with two scratch bit vectors (occupied and
/// collided buckets) that are allocated once and reset between levels.
///
/// Larger values of γ need fewer levels and build faster, but use more
/// space; smaller values (down to 1) save space at the expense of
/// construction time. Below 1 the number of levels grows quickly and space
/// grows again.
///
/// Unlike the algorithm described in the paper, which loops forever if some
/// keys can never be separated (e.g., duplicate keys), the builder gives up
/// after [`max_levels`](BBHashBuilder::max_levels) levels with a
/// [`BuildError::ConstructionFailed`] error.
///
/// # Examples
///
/// ```rust
/// # fn main() -> anyhow::Result<()> {
/// use bbhash::mph::BBHashBuilder;
/// use dsi_progress_logger::no_logging;
///
/// let mph = BBHashBuilder::default()
///     .gamma(3.0)
///     .try_build(1..=1000_u64, no_logging![])?;
///
/// let mut values = (1..=1000).map(|k| mph.get(k)).collect::<Vec<_>>();
/// values.sort();
/// assert_eq!(values, (1..=1000).collect::<Vec<u64>>());
/// #     Ok(())
/// # }
/// ```
#[derive(Setters, Debug, Clone, Derivative)]
#[derivative(Default)]
#[setters(generate = false)]
pub struct BBHashBuilder {
    /// The ratio between the size of the bit vector of a level and the
    /// number of keys to place at that level. The default is
    /// [`DEFAULT_GAMMA`].
    #[setters(generate = true)]
    #[derivative(Default(value = "DEFAULT_GAMMA"))]
    gamma: f64,

    /// The maximum number of levels. The default is [`DEFAULT_MAX_LEVELS`].
    #[setters(generate = true)]
    #[derivative(Default(value = "DEFAULT_MAX_LEVELS"))]
    max_levels: usize,

    /// Check for duplicated keys before construction. This is not necessary
    /// in general, but if you suspect you might be feeding duplicate keys,
    /// you can enable this check to get a [`BuildError::DuplicateKey`] error
    /// instead of a [`BuildError::ConstructionFailed`] one.
    #[setters(generate = true)]
    check_dups: bool,
}

/// Fatal build errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Invalid argument: {0}")]
    /// A construction parameter is out of range.
    InvalidArgument(String),
    #[error("Duplicate key: {0}")]
    /// A duplicate key was detected.
    DuplicateKey(u64),
    #[error("Construction failed: {remaining} keys still unplaced after {levels} levels")]
    /// The maximum number of levels was reached before placing all keys.
    ConstructionFailed {
        /// The number of levels built.
        levels: usize,
        /// The number of keys that could not be placed.
        remaining: usize,
    },
}

impl BBHashBuilder {
    /// Return the number of bits of a level that has to place `num_keys` keys.
    fn level_size(&self, num_keys: usize) -> Result<usize> {
        if num_keys == 0 {
            return Ok(0);
        }
        let target = self.gamma * num_keys as f64;
        // Buckets are computed from 32-bit hashes; checked before the cast,
        // which saturates
        if target > (1_u64 << 32) as f64 {
            Err(BuildError::InvalidArgument(format!(
                "{} keys with gamma = {} need {} buckets, but at most 2^32 are addressable",
                num_keys, self.gamma, target
            )))?;
        }
        Ok((target as usize).max(1).next_multiple_of(BITS_PER_WORD))
    }

    /// Build a [`BBHash`] over the given keys.
    ///
    /// Keys must be distinct. If they are not, the construction fails with a
    /// [`BuildError::ConstructionFailed`] error, or with a
    /// [`BuildError::DuplicateKey`] error if [duplicate
    /// checking](BBHashBuilder::check_dups) is enabled.
    pub fn try_build(
        &self,
        keys: impl IntoIterator<Item = u64>,
        pl: &mut impl ProgressLog,
    ) -> Result<BBHash> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            Err(BuildError::InvalidArgument(format!(
                "gamma must be a positive finite number, got {}",
                self.gamma
            )))?;
        }
        if self.gamma <= 1.0 {
            pl.warn(format_args!(
                "gamma = {} <= 1: construction will need many levels",
                self.gamma
            ));
        }

        let mut keys = keys.into_iter().collect::<Vec<u64>>();
        let num_keys = keys.len();

        if self.check_dups {
            check_dups(&keys)?;
        }

        pl.info(format_args!(
            "Building over {} keys with gamma = {}",
            num_keys, self.gamma
        ));

        let mut size = self.level_size(num_keys)?;
        // Scratch vectors are sized for the first level and then reused, as
        // level sizes can only decrease
        let mut occupied = BitVec::new(size);
        let mut collided = BitVec::new(size);
        let mut redo = Vec::new();
        let mut level_bits = Vec::new();

        pl.item_name("key");
        pl.expected_updates(Some(num_keys));
        pl.start("Placing keys...");

        while !keys.is_empty() {
            if level_bits.len() >= self.max_levels {
                pl.error(format_args!(
                    "{} keys still unplaced after {} levels; are there duplicate keys?",
                    keys.len(),
                    level_bits.len()
                ));
                Err(BuildError::ConstructionFailed {
                    levels: level_bits.len(),
                    remaining: keys.len(),
                })?;
            }

            let level = level_bits.len() as u32;

            for &key in &keys {
                let (h1, h2) = split(xorshift_mult64(key));
                let pos = bucket(h1, h2, level, size);

                if collided.get(pos) {
                    continue;
                }
                if occupied.get(pos) {
                    collided.set(pos, true);
                    continue;
                }
                occupied.set(pos, true);
            }

            let mut bits = BitVec::new(size);
            for &key in &keys {
                let (h1, h2) = split(xorshift_mult64(key));
                let pos = bucket(h1, h2, level, size);

                if collided.get(pos) {
                    redo.push(key);
                } else {
                    bits.set(pos, true);
                }
            }

            let placed = keys.len() - redo.len();
            debug_assert_eq!(placed, bits.count_ones());
            pl.info(format_args!(
                "Level {}: {} buckets, {} keys placed, {} keys deferred",
                level,
                size,
                placed,
                redo.len()
            ));
            pl.update_with_count(placed);
            level_bits.push(bits);

            std::mem::swap(&mut keys, &mut redo);
            redo.clear();
            size = self.level_size(keys.len())?;
            occupied.reset();
            collided.reset();
        }

        pl.done();

        let mph = BBHash::from_level_bits(level_bits);
        debug_assert_eq!(mph.len(), num_keys);

        pl.info(format_args!(
            "Levels: {} Bits/key: {:.3} Size: {} bytes",
            mph.num_levels(),
            mph.bits_per_key(),
            mph.size_in_bytes()
        ));

        Ok(mph)
    }
}

/// Fail with [`BuildError::DuplicateKey`] if `keys` contains a duplicate.
fn check_dups(keys: &[u64]) -> Result<()> {
    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        Err(BuildError::DuplicateKey(w[0]))?;
    }
    Ok(())
}
