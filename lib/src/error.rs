//! All kinds of errors in this crate.

use crate::cells::{Coord, State};
use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Unable to set cell at {0:?}.
    SetCellError(Coord),
    /// Cell at {0:?} has invalid state: {1:?}.
    InvalidState(Coord, State),
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// The range of the neighborhood should be positive.
    ZeroRangeError,
    /// Count {0} is out of range for a neighborhood of {1} cells.
    CountRangeError(u32, u32),
    /// The number of states should be between 2 and 256, got {0}.
    StatesError(usize),
    /// Width / height should be positive.
    NonPositiveError,
    /// The grid would exceed the maximum size {0}.
    GridTooLargeError(u32),
    /// Unable to read the pattern: {0}.
    PatternError(String),
}
