//! Explicit sets of counts, as used by HROT rules.

use super::CountPredicate;
use std::fmt::{self, Display, Formatter};

/// A set of counts, stored as a bitset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CountSet {
    bits: Vec<u64>,
}

impl CountSet {
    /// The bitset has one bit per count up to the largest one, so the
    /// counts should be checked against the neighborhood size first.
    pub fn new(counts: &[u32]) -> Self {
        let len = counts.iter().max().map_or(0, |&max| max as usize / 64 + 1);
        let mut bits = vec![0; len];
        for &count in counts {
            bits[count as usize / 64] |= 1 << (count % 64);
        }
        CountSet { bits }
    }

    /// The counts in the set, in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.bits.iter().enumerate().flat_map(|(i, &word)| {
            (0..64)
                .filter(move |j| word >> j & 1 == 1)
                .map(move |j| i as u32 * 64 + j)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&word| word == 0)
    }
}

impl CountPredicate for CountSet {
    #[inline]
    fn contains(&self, count: u32) -> bool {
        self.bits
            .get(count as usize / 64)
            .map_or(false, |word| word >> (count % 64) & 1 == 1)
    }

    fn max_count(&self) -> Option<u32> {
        self.iter().last()
    }
}

/// Comma-separated counts; runs of three or more are written as `a-b`.
impl Display for CountSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut runs: Vec<(u32, u32)> = Vec::new();
        for count in self.iter() {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == count => *end = count,
                _ => runs.push((count, count)),
            }
        }
        let mut first = true;
        for (start, end) in runs {
            if !first {
                write!(f, ",")?;
            }
            first = false;
            match end - start {
                0 => write!(f, "{}", start)?,
                1 => write!(f, "{},{}", start, end)?,
                _ => write!(f, "{}-{}", start, end)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits() {
        let set = CountSet::new(&[0, 3, 64, 200, 3]);
        assert!(set.contains(0));
        assert!(set.contains(3));
        assert!(set.contains(64));
        assert!(set.contains(200));
        assert!(!set.contains(4));
        assert!(!set.contains(63));
        assert!(!set.contains(100_000));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 3, 64, 200]);
        assert_eq!(set.max_count(), Some(200));
        assert!(CountSet::new(&[]).is_empty());
        assert_eq!(CountSet::new(&[]).max_count(), None);
    }

    #[test]
    fn display() {
        assert_eq!(CountSet::new(&[2, 3]).to_string(), "2,3");
        assert_eq!(
            CountSet::new(&[1, 5, 6, 7, 8, 10, 11]).to_string(),
            "1,5-8,10,11"
        );
        assert_eq!(CountSet::new(&[]).to_string(), "");
    }
}
