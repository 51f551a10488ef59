//! World configuration.

use crate::{
    counting::Algorithm, error::Error, history::HistoryConfig, topology::BoundedGrid,
    traits::Simulate,
};
use educe::Educe;

mod rule;

pub use rule::{Preset, RuleConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World configuration.
///
/// The world will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Initial width of the grid.
    ///
    /// For unbounded rules the grid grows as the pattern grows.
    #[educe(Default = 64)]
    pub width: i32,

    /// Initial height of the grid.
    #[educe(Default = 64)]
    pub height: i32,

    /// The grid never grows beyond this size in either dimension.
    ///
    /// At most [`MAX_GRID_SIZE`](crate::MAX_GRID_SIZE).
    #[educe(Default = 8192)]
    pub max_grid_size: i32,

    /// The rule of the cellular automaton.
    pub rule: RuleConfig,

    /// Bounded grid.
    ///
    /// `None` means that the plane is unbounded.
    pub bounded_grid: Option<BoundedGrid>,

    /// Display history.
    pub history: HistoryConfig,

    /// The algorithm to count neighbors.
    ///
    /// An algorithm which does not support the neighborhood is replaced by
    /// the automatic choice.
    pub algorithm: Algorithm,
}

impl Config {
    /// Sets up a new configuration with given initial size.
    pub fn new(width: i32, height: i32) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the initial size of the grid.
    pub fn set_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the maximum size of the grid.
    pub fn set_max_grid_size(mut self, max_grid_size: i32) -> Self {
        self.max_grid_size = max_grid_size;
        self
    }

    /// Sets the rule.
    pub fn set_rule(mut self, rule: RuleConfig) -> Self {
        self.rule = rule;
        self
    }

    /// Sets a Life-like or Generations rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule = RuleConfig::Life {
            rule: rule_string.to_string(),
        };
        self
    }

    /// Sets the bounded grid.
    pub fn set_bounded_grid<T: Into<Option<BoundedGrid>>>(mut self, bounded_grid: T) -> Self {
        self.bounded_grid = bounded_grid.into();
        self
    }

    /// Sets the display history.
    pub fn set_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }

    /// Sets the counting algorithm.
    pub fn set_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Creates a new world from the configuration.
    /// Returns an error if the rule or the sizes are invalid.
    pub fn world(&self) -> Result<Box<dyn Simulate>, Error> {
        self.rule.world(self)
    }
}
