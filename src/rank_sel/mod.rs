/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Support for rank operations.

## Design

A ranking structure wraps a [`BitVec`](crate::bits::BitVec), takes ownership
of it, and adds a table of counters that makes it possible to compute the
[rank](crate::traits::Rank) of any position scanning a bounded number of
words.

Ranking structures can be chained: a structure can be built with a _base_,
which is added to all ranks. By using as the base of a structure the total
number of ones of the previous structures, ranks become global across the
whole chain. This is how the levels of a [`BBHash`](crate::mph::BBHash)
map their buckets onto a dense range.

*/

mod rank512;
pub use rank512::*;
