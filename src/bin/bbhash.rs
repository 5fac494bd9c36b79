/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{bail, Context, Result};
use bbhash::prelude::*;
use clap::{ArgGroup, Parser};
use dsi_progress_logger::*;
use mem_dbg::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(about = "Build a BBHash minimal perfect hash function and print statistics", long_about = None)]
#[clap(group(
            ArgGroup::new("input")
                .required(true)
                .args(&["filename", "n", "random"]),
))]
struct Args {
    #[arg(short, long)]
    /// A file containing 64-bit unsigned keys in decimal, one per line.
    filename: Option<String>,
    #[arg(short)]
    /// Use the 64-bit keys [1..n]. Mainly useful for testing and debugging.
    n: Option<u64>,
    #[arg(short, long)]
    /// Use this number of random 64-bit keys.
    random: Option<usize>,
    /// The seed for the generation of random keys.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// The ratio between the number of bits of a level and the number of keys to place.
    #[arg(short, long, default_value_t = DEFAULT_GAMMA)]
    gamma: f64,
    /// The maximum number of levels.
    #[arg(short, long, default_value_t = DEFAULT_MAX_LEVELS)]
    max_levels: usize,
    /// Check for duplicate keys before building.
    #[arg(short, long)]
    check_dups: bool,
    /// Check that the function is a bijection onto [1..n].
    #[arg(short, long)]
    verify: bool,
    /// Print a detailed memory breakdown.
    #[arg(long)]
    mem_dbg: bool,
}

fn read_keys(filename: &str) -> Result<Vec<u64>> {
    let file = File::open(filename).with_context(|| format!("Cannot open {}", filename))?;
    let mut keys = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        keys.push(
            line.parse::<u64>()
                .with_context(|| format!("Invalid key at line {}: {:?}", i + 1, line))?,
        );
    }
    Ok(keys)
}

fn verify(mph: &BBHash, keys: &[u64], pl: &mut impl ProgressLog) -> Result<()> {
    let mut seen = BitVec::new(keys.len() + 1);
    pl.item_name("key");
    pl.expected_updates(Some(keys.len()));
    pl.start("Verifying...");
    for &key in keys {
        let value = mph.get(key) as usize;
        if value == 0 || value > keys.len() {
            bail!("Key {} has out-of-range value {}", key, value);
        }
        if seen.get(value) {
            bail!("Key {} has duplicate value {}", key, value);
        }
        seen.set(value, true);
        pl.light_update();
    }
    pl.done();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;

    let args = Args::parse();

    let keys = if let Some(filename) = &args.filename {
        read_keys(filename)?
    } else if let Some(n) = args.n {
        (1..=n).collect()
    } else {
        let mut rng = SmallRng::seed_from_u64(args.seed);
        (0..args.random.unwrap_or_default())
            .map(|_| rng.random::<u64>())
            .collect()
    };

    let mut pl = ProgressLogger::default();
    pl.display_memory(true);

    let mph = BBHashBuilder::default()
        .gamma(args.gamma)
        .max_levels(args.max_levels)
        .check_dups(args.check_dups)
        .try_build(keys.iter().copied(), &mut pl)?;

    println!("keys:        {}", mph.len());
    println!("levels:      {}", mph.num_levels());
    println!("per level:   {:?}", mph.keys_per_level().collect::<Vec<_>>());
    println!("size:        {} bytes", mph.size_in_bytes());
    println!("bits/key:    {:.3}", mph.bits_per_key());

    if args.mem_dbg {
        mph.mem_dbg(DbgFlags::default())?;
    }

    if args.verify {
        verify(&mph, &keys, &mut pl)?;
    }

    Ok(())
}
