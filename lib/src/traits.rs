//! A trait for `World`.
use crate::{
    bbox::BoundingBox,
    cells::{Coord, State, DEAD},
    config::Config,
    error::Error,
    rules::{CountPredicate, Rule},
    world::{Status, World},
};
use std::fmt::{Display, Write};

/// A trait for `World`.
///
/// So that we can switch between different rule types using trait objects.
pub trait Simulate {
    /// Computes the next generation.
    ///
    /// Returns [`Status::GridFull`] without doing anything if the pattern
    /// has outgrown the maximum grid size.
    fn step(&mut self) -> Status;

    /// Computes `n` generations, stopping early if the grid is full.
    fn run(&mut self, n: u64) -> Status;

    /// Number of generations computed so far.
    fn generation(&self) -> u64;

    /// Number of fully alive cells.
    fn population(&self) -> u64;

    /// Number of cells born in the last generation.
    fn births(&self) -> u64;

    /// Number of cells which died in the last generation.
    fn deaths(&self) -> u64;

    /// Whether there is any fully alive cell.
    fn anything_alive(&self) -> bool;

    /// The bounding box of all cells which are not dead or carry a history
    /// mark.
    fn zoom_box(&self) -> Option<BoundingBox>;

    /// The bounding box of all fully alive cells.
    fn live_box(&self) -> Option<BoundingBox>;

    /// The state of a cell.
    fn get_cell(&self, coord: Coord) -> State;

    /// Sets the state of a cell.
    fn set_cell(&mut self, coord: Coord, state: State) -> Result<(), Error>;

    /// The history mark of a cell.
    fn get_mark(&self, coord: Coord) -> u8;

    /// Kills every cell and erases all history.
    fn clear(&mut self);

    /// Fills a box with random cells.
    ///
    /// With a seed the result is reproducible.
    fn randomize(&mut self, bbox: BoundingBox, density: f64, seed: Option<u64>)
        -> Result<(), Error>;

    /// Reads a pattern in RLE format, centred on the origin.
    #[cfg(feature = "read-rle")]
    fn read_rle(&mut self, text: &str) -> Result<(), Error>;

    /// The fully alive state.
    fn alive_state(&self) -> State;

    /// The number of states.
    fn states(&self) -> usize;

    /// Whether the rule is a Generations rule.
    fn is_gen_rule(&self) -> bool;

    /// The rule string, in HROT or LTL notation.
    fn rule_string(&self) -> String;

    /// World configuration.
    fn config(&self) -> &Config;

    /// The smallest box containing all non-dead cells.
    fn pattern_box(&self) -> Option<BoundingBox> {
        let zoom = self.zoom_box()?;
        let mut cells = (zoom.min_y..=zoom.max_y)
            .flat_map(|y| (zoom.min_x..=zoom.max_x).map(move |x| (x, y)))
            .filter(|&coord| self.get_cell(coord) != DEAD);
        let first = cells.next()?;
        Some(cells.fold(BoundingBox::cell(first), |bbox, coord| {
            bbox.union(BoundingBox::cell(coord))
        }))
    }

    /// Displays the pattern in [RLE](https://conwaylife.com/wiki/Rle)
    /// format, without run-length compression.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o` for rules with 2 states,
    ///   `A` for rules with more states;
    /// * **Dying** cells are represented by uppercase letters starting from `B`.
    ///
    /// The first row is the top one.
    fn rle(&self) -> String {
        let mut str = String::new();
        let bbox = self.pattern_box();
        let (width, height) = bbox.map_or((0, 0), |bbox| (bbox.width(), bbox.height()));
        writeln!(
            str,
            "x = {}, y = {}, rule = {}",
            width,
            height,
            self.rule_string()
        )
        .ok();
        let bbox = match bbox {
            Some(bbox) => bbox,
            None => {
                str.push_str("!\n");
                return str;
            }
        };
        let alive = self.alive_state();
        for y in (bbox.min_y..=bbox.max_y).rev() {
            for x in bbox.min_x..=bbox.max_x {
                match self.get_cell((x, y)) {
                    DEAD => str.push('.'),
                    state if state == alive => {
                        if self.is_gen_rule() {
                            str.push('A')
                        } else {
                            str.push('o')
                        }
                    }
                    State(i) => str.push((b'A' + alive.0 - i) as char),
                }
            }
            if y == bbox.min_y {
                str.push('!')
            } else {
                str.push('$')
            };
            str.push('\n');
        }
        str
    }

    /// Displays the pattern in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** and **Dying** cells are represented by `o`.
    fn plaintext(&self) -> String {
        let mut str = String::new();
        if let Some(bbox) = self.pattern_box() {
            for y in (bbox.min_y..=bbox.max_y).rev() {
                for x in bbox.min_x..=bbox.max_x {
                    match self.get_cell((x, y)) {
                        DEAD => str.push('.'),
                        _ => str.push('o'),
                    }
                }
                str.push('\n');
            }
        }
        str
    }
}

/// The `Simulate` trait is implemented for every `World`.
impl<P: CountPredicate> Simulate for World<P>
where
    Rule<P>: Display,
{
    fn step(&mut self) -> Status {
        self.step()
    }

    fn run(&mut self, n: u64) -> Status {
        self.run(n)
    }

    fn generation(&self) -> u64 {
        self.generation()
    }

    fn population(&self) -> u64 {
        self.population()
    }

    fn births(&self) -> u64 {
        self.births()
    }

    fn deaths(&self) -> u64 {
        self.deaths()
    }

    fn anything_alive(&self) -> bool {
        self.anything_alive()
    }

    fn zoom_box(&self) -> Option<BoundingBox> {
        self.zoom_box()
    }

    fn live_box(&self) -> Option<BoundingBox> {
        self.live_box()
    }

    fn get_cell(&self, coord: Coord) -> State {
        self.get_cell(coord)
    }

    fn set_cell(&mut self, coord: Coord, state: State) -> Result<(), Error> {
        self.set_cell(coord, state)
    }

    fn get_mark(&self, coord: Coord) -> u8 {
        self.get_mark(coord)
    }

    fn clear(&mut self) {
        self.clear()
    }

    fn randomize(
        &mut self,
        bbox: BoundingBox,
        density: f64,
        seed: Option<u64>,
    ) -> Result<(), Error> {
        self.randomize(bbox, density, seed)
    }

    #[cfg(feature = "read-rle")]
    fn read_rle(&mut self, text: &str) -> Result<(), Error> {
        self.read_rle(text)
    }

    fn alive_state(&self) -> State {
        State(self.rule.max_state())
    }

    fn states(&self) -> usize {
        self.rule.states()
    }

    fn is_gen_rule(&self) -> bool {
        self.rule.is_gen()
    }

    fn rule_string(&self) -> String {
        self.rule.to_string()
    }

    fn config(&self) -> &Config {
        &self.config
    }
}
