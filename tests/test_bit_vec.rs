/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use bbhash::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[test]
fn test() {
    let n = 50;
    let n2 = 100;
    let u = 1000;

    let mut rng = SmallRng::seed_from_u64(0);

    let bm = BitVec::with_value(u, true);

    assert_eq!(bm.len(), u);
    assert_eq!(bm.count_ones(), u);

    for i in 0..u {
        assert!(bm[i]);
    }

    let mut bm = BitVec::new(u);

    for _ in 0..10 {
        let mut values = (0..u).collect::<Vec<_>>();
        let (indices, _) = values.partial_shuffle(&mut rng, n2);

        for i in indices[..n].iter().copied() {
            bm.set(i, true);
        }

        for i in 0..u {
            assert_eq!(bm.get(i), indices[..n].contains(&i));
            assert_eq!(bm[i], indices[..n].contains(&i));
        }

        // Setting is idempotent
        for i in indices.iter().copied() {
            bm.set(i, true);
        }
        assert_eq!(bm.count_ones(), n2);

        for i in 0..u {
            assert_eq!(bm.get(i), indices.contains(&i));
        }

        for i in indices[..n].iter().copied() {
            bm.set(i, false);
        }

        for i in 0..u {
            assert_eq!(bm.get(i), indices[n..].contains(&i));
        }

        bm.reset();
        assert_eq!(bm.len(), u);
        assert_eq!(bm.count_ones(), 0);
        for i in 0..u {
            assert!(!bm.get(i));
        }
    }
}

#[test]
fn test_iter() {
    let mut bm = BitVec::new(200);
    for i in (0..200).step_by(3) {
        bm.set(i, true);
    }
    let collected = bm.iter().collect::<BitVec>();
    assert_eq!(collected, bm);
    assert_eq!(bm.iter().len(), 200);
    for (i, bit) in (&bm).into_iter().enumerate() {
        assert_eq!(bit, i % 3 == 0);
    }
    let copy = bm.clone();
    let (words, len) = bm.into_raw_parts();
    assert_eq!(len, 200);
    assert_eq!(words.len(), 4);
    let bm = unsafe { BitVec::from_raw_parts(words, len) };
    assert_eq!(bm, copy);
    assert_eq!(bm.count_ones(), 67);
}

#[test]
fn test_empty() {
    let bm = BitVec::new(0);
    assert_eq!(bm.len(), 0);
    assert_eq!(bm.num_words(), 0);
    assert_eq!(bm.count_ones(), 0);
    assert_eq!(bm.iter().next(), None);
}
