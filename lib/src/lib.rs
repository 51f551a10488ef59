//! __rhrot__ steps cellular automata with large neighborhoods:
//! [Higher-Range Outer Totalistic](https://conwaylife.com/wiki/Higher-range_outer-totalistic_cellular_automaton)
//! and [Larger than Life](https://conwaylife.com/wiki/Larger_than_Life) rules,
//! with square, diamond and circular neighborhoods, Generations rules,
//! and bounded planes or tori.
//!
//! # Example
//!
//! ```rust
//! use rhrot_lib::{Config, Simulate, State, Status};
//!
//! // A blinker in Conway's Game of Life.
//! let config = Config::default().set_rule_string("B3/S23");
//! let mut world = config.world().unwrap();
//! for x in -1..=1 {
//!     world.set_cell((x, 0), State(1)).unwrap();
//! }
//!
//! assert_eq!(world.step(), Status::Running);
//! assert_eq!(world.get_cell((0, 1)), State(1));
//! assert_eq!(world.get_cell((1, 0)), State(0));
//! assert_eq!(world.population(), 3);
//! ```

mod bbox;
mod cells;
mod config;
pub mod counting;
mod error;
mod grid;
mod history;
mod neighborhood;
pub mod rules;
mod topology;
mod traits;
mod world;

pub use bbox::BoundingBox;
pub use cells::{Coord, State, DEAD};
pub use config::{Config, Preset, RuleConfig};
pub use counting::Algorithm;
pub use error::Error;
pub use grid::{Grid, MAX_GRID_SIZE};
pub use history::{HistoryConfig, HistoryTable, MAX_TRAIL};
pub use neighborhood::{Neighborhood, Shape};
pub use topology::{BoundedGrid, Topology};
pub use traits::Simulate;
pub use world::{Status, World};
