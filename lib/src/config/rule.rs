use crate::{
    config::Config,
    error::Error,
    neighborhood::{Neighborhood, Shape},
    rules::{CountRange, Hrot, Ltl},
    traits::Simulate,
    world::World,
};
use educe::Educe;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Well-known rules.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Preset {
    /// Conway's Game of Life.
    #[educe(Default)]
    Life,
    /// Brian's Brain.
    BriansBrain,
    /// Bosco's Rule, also known as Bugs.
    Bosco,
    Waffle,
    Majority,
    Globe,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Life,
        Preset::BriansBrain,
        Preset::Bosco,
        Preset::Waffle,
        Preset::Majority,
        Preset::Globe,
    ];

    fn name(self) -> &'static str {
        match self {
            Preset::Life => "life",
            Preset::BriansBrain => "brians-brain",
            Preset::Bosco => "bosco",
            Preset::Waffle => "waffle",
            Preset::Majority => "majority",
            Preset::Globe => "globe",
        }
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ();

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input
            .to_ascii_lowercase()
            .replace('\'', "")
            .replace(&['_', ' '][..], "-");
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name() == input || (input == "bugs" && *preset == Preset::Bosco))
            .ok_or(())
    }
}

fn default_states() -> usize {
    2
}

/// How to build the rule of the world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum RuleConfig {
    /// A Life-like or Generations rule string, like `B3/S23` or `/2/3`.
    Life { rule: String },

    /// A well-known rule.
    Preset { preset: Preset },

    /// A Higher-Range Outer Totalistic rule.
    ///
    /// Counts do not include the cell itself.
    Hrot {
        #[cfg_attr(feature = "serde", serde(default))]
        shape: Shape,
        range: u32,
        births: Vec<u32>,
        survivals: Vec<u32>,
        #[cfg_attr(feature = "serde", serde(default = "default_states"))]
        states: usize,
    },

    /// A Larger than Life rule.
    Ltl {
        #[cfg_attr(feature = "serde", serde(default))]
        shape: Shape,
        range: u32,
        births: CountRange,
        survivals: CountRange,
        #[cfg_attr(feature = "serde", serde(default = "default_states"))]
        states: usize,
        /// Whether a living cell counts itself.
        #[cfg_attr(feature = "serde", serde(default))]
        middle: bool,
    },
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig::Life {
            rule: String::from("B3/S23"),
        }
    }
}

impl RuleConfig {
    /// Builds the rule, and a world with it.
    pub(crate) fn world(&self, config: &Config) -> Result<Box<dyn Simulate>, Error> {
        match self {
            RuleConfig::Life { rule } => {
                let rule = rule.parse::<Hrot>()?;
                Ok(Box::new(World::new(config, rule)?))
            }
            RuleConfig::Preset { preset } => match preset {
                Preset::Life => Ok(Box::new(World::new(config, Hrot::life())?)),
                Preset::BriansBrain => Ok(Box::new(World::new(config, Hrot::brians_brain())?)),
                Preset::Bosco => Ok(Box::new(World::new(config, Ltl::bosco())?)),
                Preset::Waffle => Ok(Box::new(World::new(config, Ltl::waffle())?)),
                Preset::Majority => Ok(Box::new(World::new(config, Ltl::majority())?)),
                Preset::Globe => Ok(Box::new(World::new(config, Ltl::globe())?)),
            },
            RuleConfig::Hrot {
                shape,
                range,
                births,
                survivals,
                states,
            } => {
                let neighborhood = Neighborhood::new(*shape, *range)?;
                let rule = Hrot::new(neighborhood, births, survivals, *states)?;
                Ok(Box::new(World::new(config, rule)?))
            }
            RuleConfig::Ltl {
                shape,
                range,
                births,
                survivals,
                states,
                middle,
            } => {
                let neighborhood = Neighborhood::new(*shape, *range)?;
                let rule = Ltl::new(neighborhood, *births, *survivals, *states, *middle)?;
                Ok(Box::new(World::new(config, rule)?))
            }
        }
    }
}

/// Parses a preset name, or else a Life-like or Generations rule string.
impl FromStr for RuleConfig {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if let Ok(preset) = input.parse::<Preset>() {
            return Ok(RuleConfig::Preset { preset });
        }
        input.parse::<Hrot>()?;
        Ok(RuleConfig::Life {
            rule: input.to_string(),
        })
    }
}
