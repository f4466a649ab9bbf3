//! Anti-automation stamp pools
//!
//! The vendor backend rejects device registration and vehicle calls that do
//! not carry a `Stamp` header from the official app. Each brand has a fixed
//! pool of pre-baked stamps embedded in the binary; a stamp is drawn at
//! random, with replacement, for every request that needs one.

use std::sync::OnceLock;

use rand::seq::SliceRandom;

use crate::brand::Brand;
use crate::error::{CoreError, CoreResult};

const HYUNDAI_STAMPS: &str = include_str!("../stamps/hyundai");
const KIA_STAMPS: &str = include_str!("../stamps/kia");

static POOLS: OnceLock<[StampPool; 2]> = OnceLock::new();

/// Immutable set of stamps for one brand
#[derive(Debug, Clone)]
pub struct StampPool {
    brand: Brand,
    tokens: Vec<&'static str>,
}

impl StampPool {
    /// Unpack a pool: one token per line, blank lines and `#` comments skipped
    pub fn parse(brand: Brand, source: &'static str) -> Self {
        let tokens = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        Self { brand, tokens }
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, stamp: &str) -> bool {
        self.tokens.iter().any(|t| *t == stamp)
    }

    /// Draw a stamp uniformly at random
    pub fn draw(&self) -> CoreResult<&'static str> {
        self.tokens
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(CoreError::EmptyStampPool(self.brand))
    }
}

/// Embedded pool of a brand, unpacked on first use
pub fn pool(brand: Brand) -> &'static StampPool {
    let pools = POOLS.get_or_init(|| {
        [
            StampPool::parse(Brand::Hyundai, HYUNDAI_STAMPS),
            StampPool::parse(Brand::Kia, KIA_STAMPS),
        ]
    });
    match brand {
        Brand::Hyundai => &pools[0],
        Brand::Kia => &pools[1],
    }
}

/// Draw a fresh stamp for a brand
pub fn stamp(brand: Brand) -> CoreResult<&'static str> {
    pool(brand).draw()
}
