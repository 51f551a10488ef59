//! Cell states and coordinates.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of a cell.
///
/// `State(0)` is dead. For a rule with `n` states the fully alive state is
/// `State(n - 1)`, and the states in between are dying cells which count
/// down to dead one generation at a time.
///
/// For rules with 2 states this means [`DEAD`] and `State(1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State(pub u8);

/// The Dead state.
pub const DEAD: State = State(0);

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`, with `y` growing upwards.
///
/// Coordinates are relative to a fixed origin and stay valid when the
/// underlying grid grows.
pub type Coord = (i32, i32);
