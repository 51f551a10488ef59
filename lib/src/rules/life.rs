//! Life-like and Generations rule strings, as range-1 Moore HROT rules.

use super::{moore, Hrot};
use crate::error::Error;
use ca_rules::{ParseLife, ParseLifeGen};
use std::str::FromStr;

/// Birth and survival data of a Life-like rule.
struct LifeData {
    b: Vec<u8>,
    s: Vec<u8>,
}

impl ParseLife for LifeData {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        LifeData { b, s }
    }
}

/// Birth and survival data of a Life-like Generations rule.
struct LifeGenData {
    b: Vec<u8>,
    s: Vec<u8>,
    gen: usize,
}

impl ParseLifeGen for LifeGenData {
    fn from_bsg(b: Vec<u8>, s: Vec<u8>, gen: usize) -> Self {
        LifeGenData { b, s, gen }
    }
}

/// Parses Life-like rule strings like `B3/S23` or `23/3`, and
/// Generations rule strings like `/2/3`.
impl FromStr for Hrot {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let LifeGenData { b, s, gen } = match LifeData::parse_rule(input) {
            Ok(LifeData { b, s }) => LifeGenData { b, s, gen: 2 },
            Err(_) => LifeGenData::parse_rule(input)?,
        };
        let b: Vec<u32> = b.into_iter().map(u32::from).collect();
        let s: Vec<u32> = s.into_iter().map(u32::from).collect();
        Hrot::new(moore(), &b, &s, gen)
    }
}
