//! Display history.
//!
//! Each cell carries a mark next to its simulation state. The mark says
//! how recently the cell was alive, so that a renderer can draw fading
//! trails. It is computed from the previous mark and the new state only,
//! and never feeds back into the simulation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The longest supported trail.
pub const MAX_TRAIL: u8 = 63;

/// How marks are kept after a cell dies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HistoryConfig {
    /// Number of generations a dead cell keeps a fading mark.
    ///
    /// Values above [`MAX_TRAIL`] are clamped.
    pub trail: u8,

    /// Whether cells that were ever alive keep the faintest mark forever.
    pub persistent: bool,
}

/// Lookup table for the next mark of a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryTable {
    alive_mark: u8,
    /// Indexed by `previous_mark * 2 + alive`.
    table: Vec<u8>,
}

impl HistoryTable {
    pub fn new(config: HistoryConfig) -> Self {
        let trail = config.trail.min(MAX_TRAIL);
        let alive_mark = trail + 1;
        let floor = u8::from(config.persistent);
        let mut table = Vec::with_capacity(2 * (alive_mark as usize + 1));
        for prev in 0..=alive_mark {
            let faded = match prev {
                0 => 0,
                _ => (prev - 1).max(floor),
            };
            table.push(faded);
            table.push(alive_mark);
        }
        HistoryTable { alive_mark, table }
    }

    /// The mark of a living cell.
    pub fn alive_mark(&self) -> u8 {
        self.alive_mark
    }

    /// The mark of a cell after a generation, given its previous mark and
    /// whether it is alive now.
    #[inline]
    pub fn next(&self, prev: u8, alive: bool) -> u8 {
        self.table[prev as usize * 2 + alive as usize]
    }
}
