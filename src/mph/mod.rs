/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Minimal perfect hash functions.

A [`BBHash`] maps each key of a fixed set of *n* distinct 64-bit keys onto a
distinct integer of the range [1 . . *n*]. Instances are built by a
[`BBHashBuilder`] (or by the shortcut [`BBHash::new`]) and are immutable
afterwards.

# Reference:
- [Antoine Limasset, Guillaume Rizk, Rayan Chikhi, and Pierre Peterlongo, Fast and scalable minimal perfect hashing for massive key sets](https://arxiv.org/abs/1702.03154)

*/

mod bbhash;
pub use bbhash::*;

mod builder;
pub use builder::*;
