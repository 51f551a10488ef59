//! Outer-totalistic rules of arbitrary range.
//!
//! A rule maps the state of a cell and the number of living cells in its
//! neighborhood to the state of the cell in the next generation.
//! Two families are supported, differing only in how the allowed counts
//! are written down:
//!
//! - [`Hrot`]: Higher-Range Outer Totalistic rules, with explicit sets of
//!   counts;
//! - [`Ltl`]: Larger than Life rules, with inclusive count ranges.
//!
//! Both families may have more than 2 states, in which case they are
//! Generations rules: a cell which fails to survive decays one state per
//! generation until it is dead, whatever its neighbors do.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Larger_than_Life).

mod life;
mod presets;
mod range;
mod set;

use crate::{
    error::Error,
    neighborhood::{Neighborhood, Shape},
};
use std::fmt::{self, Debug, Display, Formatter};

pub use range::CountRange;
pub use set::CountSet;

/// A set of neighbor counts.
pub trait CountPredicate: Clone + Debug {
    /// Whether the count is in the set.
    fn contains(&self, count: u32) -> bool;

    /// The largest count in the set, if any.
    fn max_count(&self) -> Option<u32>;
}

/// An outer-totalistic rule with arbitrary range and number of states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule<P: CountPredicate> {
    /// The neighborhood.
    neighborhood: Neighborhood,
    /// Counts for which a dead cell becomes alive.
    births: P,
    /// Counts for which a living cell stays alive.
    survivals: P,
    /// The fully alive state, i.e., the number of states minus one.
    max_state: u8,
    /// Whether the cell itself is counted as one of its neighbors.
    middle: bool,
}

/// Higher-Range Outer Totalistic rules.
pub type Hrot = Rule<CountSet>;

/// Larger than Life rules.
pub type Ltl = Rule<CountRange>;

impl<P: CountPredicate> Rule<P> {
    /// Constructs a rule, checking the counts against the neighborhood size.
    fn with_predicates(
        neighborhood: Neighborhood,
        births: P,
        survivals: P,
        states: usize,
        middle: bool,
    ) -> Result<Self, Error> {
        if !(2..=256).contains(&states) {
            return Err(Error::StatesError(states));
        }
        let size = neighborhood.size();
        let limit = if middle { size } else { size - 1 };
        for count in births.max_count().into_iter().chain(survivals.max_count()) {
            if count > limit {
                return Err(Error::CountRangeError(count, size));
            }
        }
        Ok(Rule {
            neighborhood,
            births,
            survivals,
            max_state: (states - 1) as u8,
            middle,
        })
    }

    /// The neighborhood.
    pub fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    /// Counts for which a dead cell becomes alive.
    pub fn births(&self) -> &P {
        &self.births
    }

    /// Counts for which a living cell stays alive.
    pub fn survivals(&self) -> &P {
        &self.survivals
    }

    /// The number of states.
    pub fn states(&self) -> usize {
        self.max_state as usize + 1
    }

    /// The fully alive state.
    pub fn max_state(&self) -> u8 {
        self.max_state
    }

    /// Whether the rule is a Generations rule.
    pub fn is_gen(&self) -> bool {
        self.max_state > 1
    }

    /// Whether a living cell counts itself as a neighbor.
    pub fn middle(&self) -> bool {
        self.middle
    }

    /// Whether the rule contains `B0`.
    ///
    /// In other words, whether a dead cell surrounded by dead cells becomes
    /// alive in the next generation.
    pub fn has_b0(&self) -> bool {
        self.births.contains(0)
    }

    /// The state of a cell in the next generation.
    ///
    /// `count` is the number of fully alive cells in the neighborhood,
    /// the cell itself included.
    #[inline]
    pub fn next_state(&self, state: u8, count: u32) -> u8 {
        if state == 0 {
            if self.births.contains(count) {
                self.max_state
            } else {
                0
            }
        } else if state == self.max_state {
            let count = if self.middle { count } else { count - 1 };
            if self.survivals.contains(count) {
                self.max_state
            } else {
                self.max_state - 1
            }
        } else {
            state - 1
        }
    }

    /// Writes the common prefix `R..,C..` of a rule string.
    fn fmt_range_states(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let states = if self.is_gen() { self.states() } else { 0 };
        write!(f, "R{},C{}", self.neighborhood.radius(), states)
    }
}

impl Hrot {
    /// Constructs a new HROT rule from the birth and survival counts and
    /// the number of states.
    ///
    /// Counts do not include the cell itself.
    pub fn new(
        neighborhood: Neighborhood,
        births: &[u32],
        survivals: &[u32],
        states: usize,
    ) -> Result<Self, Error> {
        let size = neighborhood.size();
        if let Some(count) = births.iter().chain(survivals).copied().max() {
            if count >= size {
                return Err(Error::CountRangeError(count, size));
            }
        }
        Rule::with_predicates(
            neighborhood,
            CountSet::new(births),
            CountSet::new(survivals),
            states,
            false,
        )
    }
}

impl Ltl {
    /// Constructs a new Larger than Life rule from the birth and survival
    /// ranges and the number of states.
    ///
    /// If `middle` is true, a living cell is counted in its own neighborhood.
    pub fn new(
        neighborhood: Neighborhood,
        births: CountRange,
        survivals: CountRange,
        states: usize,
        middle: bool,
    ) -> Result<Self, Error> {
        Rule::with_predicates(neighborhood, births, survivals, states, middle)
    }
}

/// Rule strings in the HROT notation, e.g., `R1,C0,S2,3,B3,NM`.
impl Display for Hrot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_range_states(f)?;
        write!(
            f,
            ",S{},B{},N{}",
            self.survivals,
            self.births,
            self.neighborhood.shape()
        )
    }
}

/// Rule strings in the Larger than Life notation, e.g., `R5,C0,M1,S34..58,B34..45,NM`.
impl Display for Ltl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_range_states(f)?;
        write!(
            f,
            ",M{},S{},B{},N{}",
            u8::from(self.middle),
            self.survivals,
            self.births,
            self.neighborhood.shape()
        )
    }
}

/// The range-1 Moore neighborhood.
pub(crate) fn moore() -> Neighborhood {
    Neighborhood::build(Shape::Square, 1)
}
