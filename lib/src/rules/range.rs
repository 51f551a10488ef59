//! Inclusive count ranges, as used by Larger than Life rules.

use super::CountPredicate;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// All counts from `min` to `max`, inclusive.
///
/// A range with `min > max` is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        CountRange { min, max }
    }
}

impl CountPredicate for CountRange {
    #[inline]
    fn contains(&self, count: u32) -> bool {
        self.min <= count && count <= self.max
    }

    fn max_count(&self) -> Option<u32> {
        (self.min <= self.max).then(|| self.max)
    }
}

impl Display for CountRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range() {
        let range = CountRange::new(34, 45);
        assert!(range.contains(34));
        assert!(range.contains(45));
        assert!(!range.contains(33));
        assert!(!range.contains(46));
        assert_eq!(range.max_count(), Some(45));
        assert_eq!(range.to_string(), "34..45");

        let empty = CountRange::new(5, 4);
        assert!(!empty.contains(4) && !empty.contains(5));
        assert_eq!(empty.max_count(), None);
    }
}
