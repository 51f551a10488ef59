//! The world.

use crate::{
    bbox::{union, BoundingBox, BoxTracker},
    cells::{Coord, State, DEAD},
    config::Config,
    counting::{Algorithm, CountGrid},
    error::Error,
    grid::{Grid, MAX_GRID_SIZE},
    history::HistoryTable,
    rules::{CountPredicate, Rule},
    topology::BoundedGrid,
};
use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};
use tracing::{debug, trace, warn};

/// Status after a generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// There are still living cells.
    Running,
    /// Nothing is alive, and nothing will ever be born again.
    Extinct,
    /// The pattern outgrew the maximum grid size. Nothing was done.
    GridFull,
}

/// The world.
pub struct World<P: CountPredicate> {
    /// World configuration.
    pub(crate) config: Config,

    /// The rule of the cellular automaton.
    pub(crate) rule: Rule<P>,

    /// Cell states and history marks.
    grid: Grid,

    /// Neighbor counts of the active region.
    counts: CountGrid,

    /// Lookup table for history marks.
    history: HistoryTable,

    /// The counting algorithm, already resolved for the neighborhood.
    algorithm: Algorithm,

    bounded: Option<BoundedGrid>,

    /// Number of generations computed so far.
    generation: u64,

    /// Number of fully alive cells.
    population: u64,

    /// Number of cells born in the last generation.
    births: u64,

    /// Number of cells which died in the last generation.
    deaths: u64,

    /// Cells which are not dead or carry a history mark, in public coordinates.
    zoom_box: Option<BoundingBox>,

    /// Fully alive cells, in public coordinates.
    live_box: Option<BoundingBox>,
}

impl<P: CountPredicate> World<P> {
    /// Creates a new empty world from the configuration and the rule.
    pub fn new(config: &Config, rule: Rule<P>) -> Result<Self, Error> {
        if config.width <= 0 || config.height <= 0 || config.max_grid_size <= 0 {
            return Err(Error::NonPositiveError);
        }
        if config.max_grid_size > MAX_GRID_SIZE {
            return Err(Error::GridTooLargeError(MAX_GRID_SIZE as u32));
        }
        let r = rule.neighborhood().radius() as i32;
        let mut grid = Grid::new(
            config.width.min(config.max_grid_size),
            config.height.min(config.max_grid_size),
        );
        match config.bounded_grid {
            Some(bounded) => {
                bounded.validate()?;
                grid.grow_to_fit(bounded.rect().expand(r), config.max_grid_size)?;
            }
            None => grid.grow_to_fit(BoundingBox::cell((0, 0)).expand(r), config.max_grid_size)?,
        }
        let algorithm = config.algorithm.resolve(rule.neighborhood());

        debug!(
            width = grid.width(),
            height = grid.height(),
            ?algorithm,
            bounded = ?config.bounded_grid,
            "World created"
        );

        Ok(World {
            config: config.clone(),
            rule,
            grid,
            counts: CountGrid::new(),
            history: HistoryTable::new(config.history),
            algorithm,
            bounded: config.bounded_grid,
            generation: 0,
            population: 0,
            births: 0,
            deaths: 0,
            zoom_box: None,
            live_box: None,
        })
    }

    fn radius(&self) -> i32 {
        self.rule.neighborhood().radius() as i32
    }

    /// The rule.
    pub fn rule(&self) -> &Rule<P> {
        &self.rule
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The counting algorithm in use.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn births(&self) -> u64 {
        self.births
    }

    pub fn deaths(&self) -> u64 {
        self.deaths
    }

    pub fn zoom_box(&self) -> Option<BoundingBox> {
        self.zoom_box
    }

    pub fn live_box(&self) -> Option<BoundingBox> {
        self.live_box
    }

    /// Whether there is any fully alive cell.
    pub fn anything_alive(&self) -> bool {
        self.population > 0
    }

    /// The state of a cell. Cells outside the grid are dead.
    pub fn get_cell(&self, coord: Coord) -> State {
        let (gx, gy) = self.grid.to_grid(coord);
        if self.in_universe(coord) && self.grid.contains((gx, gy)) {
            State(self.grid.state(gx, gy))
        } else {
            DEAD
        }
    }

    /// The history mark of a cell.
    pub fn get_mark(&self, coord: Coord) -> u8 {
        let (gx, gy) = self.grid.to_grid(coord);
        if self.in_universe(coord) && self.grid.contains((gx, gy)) {
            self.grid.mark(gx, gy)
        } else {
            0
        }
    }

    /// Whether a cell may hold a non-dead state.
    fn in_universe(&self, coord: Coord) -> bool {
        self.bounded
            .map_or(true, |bounded| bounded.rect().contains(coord))
    }

    /// Makes sure that the cells of a box in public coordinates can be set.
    ///
    /// The grid grows when needed. Returns the part of the box that can be
    /// set, in public coordinates.
    fn make_room(&mut self, bbox: BoundingBox) -> Result<Option<BoundingBox>, Error> {
        let r = self.radius();
        if let Some(bounded) = self.bounded {
            return Ok(bbox.intersect(bounded.rect()));
        }
        if self.rule.has_b0() {
            return Ok(self
                .grid
                .interior(r)
                .and_then(|interior| bbox.intersect(self.grid.box_to_public(interior))));
        }
        self.grid.grow_to_fit(bbox.expand(2 * r), self.config.max_grid_size)?;
        Ok(Some(bbox))
    }

    /// Sets the state of a cell.
    pub fn set_cell(&mut self, coord: Coord, state: State) -> Result<(), Error> {
        if state.0 > self.rule.max_state() {
            return Err(Error::InvalidState(coord, state));
        }
        match self.make_room(BoundingBox::cell(coord)) {
            Ok(Some(_)) => {}
            _ => return Err(Error::SetCellError(coord)),
        }

        let max_state = self.rule.max_state();
        let (gx, gy) = self.grid.to_grid(coord);
        let old = self.grid.state(gx, gy);
        self.grid.set_state(gx, gy, state.0);

        if state.0 == max_state {
            self.grid.set_mark(gx, gy, self.history.alive_mark());
            if old != max_state {
                self.population += 1;
            }
            self.live_box = union(self.live_box, Some(BoundingBox::cell(coord)));
        } else if old == max_state {
            self.population -= 1;
        }

        let removed = (old == max_state && state.0 != max_state) || (old != 0 && state.0 == 0);
        if removed {
            // Every non-dead or marked cell lies in the zoom box.
            if let Some(zoom) = self.zoom_box {
                self.recount_in(self.grid.box_to_grid(zoom));
            }
        } else if state != DEAD {
            self.zoom_box = union(self.zoom_box, Some(BoundingBox::cell(coord)));
        }
        Ok(())
    }

    /// Kills every cell and erases all history.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.population = 0;
        self.births = 0;
        self.deaths = 0;
        self.zoom_box = None;
        self.live_box = None;
    }

    /// Fills a box in public coordinates with random cells.
    ///
    /// Each cell is fully alive with probability `density`, and dead otherwise.
    /// The part of the box outside a bounded grid is ignored.
    pub fn randomize(
        &mut self,
        bbox: BoundingBox,
        density: f64,
        seed: Option<u64>,
    ) -> Result<(), Error> {
        match seed {
            Some(seed) => self.fill_random(bbox, density, &mut StdRng::seed_from_u64(seed)),
            None => self.fill_random(bbox, density, &mut thread_rng()),
        }
    }

    fn fill_random<R: Rng>(
        &mut self,
        bbox: BoundingBox,
        density: f64,
        rng: &mut R,
    ) -> Result<(), Error> {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let public = match self.make_room(bbox)? {
            Some(bbox) => bbox,
            None => return Ok(()),
        };
        let bbox = self.grid.box_to_grid(public);
        let max_state = self.rule.max_state();
        let alive_mark = self.history.alive_mark();
        for gy in bbox.min_y..=bbox.max_y {
            let (states, marks) = self.grid.row_mut(bbox.min_x, bbox.max_x, gy);
            for (state, mark) in states.iter_mut().zip(marks.iter_mut()) {
                if rng.gen_bool(density) {
                    *state = max_state;
                    *mark = alive_mark;
                } else {
                    *state = 0;
                }
            }
        }
        debug!(?bbox, density, "Randomized");
        let scan = self.zoom_box.map_or(public, |zoom| zoom.union(public));
        self.recount_in(self.grid.box_to_grid(scan));
        Ok(())
    }

    /// Recomputes the population and the bounding boxes from the grid.
    pub fn recount(&mut self) {
        self.recount_in(self.grid.bounds());
    }

    /// Recomputes the population and the bounding boxes, scanning only a
    /// box in grid coordinates.
    ///
    /// Every non-dead or marked cell must lie in the box.
    fn recount_in(&mut self, bounds: BoundingBox) {
        let max_state = self.rule.max_state();
        let mut zoom = BoxTracker::new();
        let mut live = BoxTracker::new();
        let mut population = 0;
        for gy in bounds.min_y..=bounds.max_y {
            let states = self.grid.states_row(bounds.min_x, bounds.max_x, gy);
            for (gx, &state) in (bounds.min_x..).zip(states) {
                if state == max_state {
                    population += 1;
                    live.include(gx, gy);
                }
                if state != 0 || self.grid.mark(gx, gy) != 0 {
                    zoom.include(gx, gy);
                }
            }
        }
        self.population = population;
        self.zoom_box = zoom.finish().map(|bbox| self.grid.box_to_public(bbox));
        self.live_box = live.finish().map(|bbox| self.grid.box_to_public(bbox));
    }

    /// The region to be updated in the next generation, in grid coordinates.
    ///
    /// `rect` is the bounded grid in grid coordinates.
    fn active_region(&self, rect: Option<BoundingBox>) -> Option<BoundingBox> {
        let r = self.radius();
        let b0 = self.rule.has_b0();
        match (self.bounded, rect) {
            (Some(bounded), Some(rect)) if bounded.is_torus() || b0 => Some(rect),
            (None, _) if b0 => self.grid.interior(r),
            _ => {
                let marked = union(self.zoom_box, self.live_box.map(|bbox| bbox.expand(r)))?;
                let limit = match rect {
                    Some(rect) => Some(rect),
                    None => self.grid.interior(r),
                }?;
                self.grid.box_to_grid(marked).intersect(limit)
            }
        }
    }

    /// Computes the next generation.
    pub fn step(&mut self) -> Status {
        let r = self.radius();
        let b0 = self.rule.has_b0();

        if self.bounded.is_none() && !b0 {
            if let Some(live) = self.live_box {
                if let Err(error) = self
                    .grid
                    .grow_to_fit(live.expand(2 * r), self.config.max_grid_size)
                {
                    warn!(%error, generation = self.generation, "Unable to grow the grid");
                    return Status::GridFull;
                }
            }
        }

        let rect = self
            .bounded
            .map(|bounded| self.grid.box_to_grid(bounded.rect()));
        if let (Some(bounded), Some(rect)) = (self.bounded, rect) {
            bounded.prepare(&mut self.grid, rect, r);
        }

        match self.active_region(rect) {
            Some(region) => {
                self.counts.fill(
                    &self.grid,
                    self.rule.max_state(),
                    self.rule.neighborhood(),
                    self.algorithm,
                    region,
                );
                self.apply(region);
            }
            None => {
                self.births = 0;
                self.deaths = 0;
            }
        }

        if let (Some(bounded), Some(rect)) = (self.bounded, rect) {
            bounded.finish(&mut self.grid, rect, r);
        }
        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.population,
            births = self.births,
            deaths = self.deaths,
            "Step"
        );

        if self.population == 0 && !b0 {
            Status::Extinct
        } else {
            Status::Running
        }
    }

    /// Computes `n` generations, stopping early if the grid is full.
    pub fn run(&mut self, n: u64) -> Status {
        let mut status = Status::Running;
        for _ in 0..n {
            status = self.step();
            if status == Status::GridFull {
                break;
            }
        }
        status
    }

    /// Applies the rule to every cell of the region, using the counts.
    ///
    /// Cells outside the region are dead and unmarked, and stay so.
    fn apply(&mut self, region: BoundingBox) {
        let max_state = self.rule.max_state();
        let mut zoom = BoxTracker::new();
        let mut live = BoxTracker::new();
        let mut population = 0;
        let mut births = 0;
        let mut deaths = 0;

        for gy in region.min_y..=region.max_y {
            let counts = self.counts.row(gy);
            let (states, marks) = self.grid.row_mut(region.min_x, region.max_x, gy);
            let cells = states.iter_mut().zip(marks.iter_mut()).zip(counts);
            for (gx, ((state, mark), &count)) in (region.min_x..).zip(cells) {
                let old = *state;
                let new = self.rule.next_state(old, count);
                *state = new;
                let alive = new == max_state;
                if alive {
                    population += 1;
                    live.include(gx, gy);
                    if old != max_state {
                        births += 1;
                    }
                } else if old == max_state {
                    deaths += 1;
                }
                *mark = self.history.next(*mark, alive);
                if new != 0 || *mark != 0 {
                    zoom.include(gx, gy);
                }
            }
        }

        self.population = population;
        self.births = births;
        self.deaths = deaths;
        self.zoom_box = zoom.finish().map(|bbox| self.grid.box_to_public(bbox));
        self.live_box = live.finish().map(|bbox| self.grid.box_to_public(bbox));
    }

    /// Reads a pattern in [RLE](https://conwaylife.com/wiki/Rle) format,
    /// centred on the origin.
    ///
    /// In RLE the first row is the top one. State `1` (`o` or `A`) is fully
    /// alive; `B`, `C`, ... are dying states.
    #[cfg(feature = "read-rle")]
    pub fn read_rle(&mut self, text: &str) -> Result<(), Error> {
        use ca_formats::rle::Rle;

        let rle = Rle::new(text).map_err(|error| Error::PatternError(error.to_string()))?;
        let (width, height) = rle
            .header_data()
            .map_or((0, 0), |header| (header.x as i64, header.y as i64));
        let max_state = self.rule.max_state();
        for cell in rle {
            let cell = cell.map_err(|error| Error::PatternError(error.to_string()))?;
            let (px, py) = cell.position;
            let coord = ((px - width / 2) as i32, (height / 2 - py) as i32);
            let state = match cell.state {
                0 => DEAD,
                s if s <= max_state => State(max_state + 1 - s),
                s => return Err(Error::InvalidState(coord, State(s))),
            };
            self.set_cell(coord, state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        neighborhood::{Neighborhood, Shape},
        rules::{Hrot, Ltl},
        topology::Topology,
    };

    fn life(config: &Config) -> World<crate::rules::CountSet> {
        World::new(config, Hrot::life()).unwrap()
    }

    #[test]
    fn set_cell_updates_boxes() -> Result<(), Error> {
        let mut world = life(&Config::default());
        world.set_cell((3, -2), State(1))?;
        world.set_cell((-1, 4), State(1))?;
        assert_eq!(world.population(), 2);
        assert_eq!(
            world.live_box(),
            Some(BoundingBox {
                min_x: -1,
                max_x: 3,
                min_y: -2,
                max_y: 4
            })
        );
        world.set_cell((-1, 4), DEAD)?;
        assert_eq!(world.population(), 1);
        assert_eq!(world.live_box(), Some(BoundingBox::cell((3, -2))));
        // The history mark is still there.
        assert_eq!(world.get_mark((-1, 4)), 1);
        assert_eq!(
            world.set_cell((0, 0), State(2)),
            Err(Error::InvalidState((0, 0), State(2)))
        );
        Ok(())
    }

    #[test]
    fn set_cell_far_away() -> Result<(), Error> {
        let mut world = life(&Config::default().set_max_grid_size(256));
        world.set_cell((100, -100), State(1))?;
        assert_eq!(world.get_cell((100, -100)), State(1));
        assert_eq!(
            world.set_cell((1000, 0), State(1)),
            Err(Error::SetCellError((1000, 0)))
        );
        Ok(())
    }

    #[test]
    fn bounded_set_cell() -> Result<(), Error> {
        let config =
            Config::default().set_bounded_grid(BoundedGrid::centred(Topology::Plane, 10, 10));
        let mut world = life(&config);
        world.set_cell((4, 4), State(1))?;
        assert_eq!(
            world.set_cell((5, 0), State(1)),
            Err(Error::SetCellError((5, 0)))
        );
        assert_eq!(world.get_cell((5, 0)), DEAD);
        Ok(())
    }

    #[test]
    fn removing_cells_shrinks_boxes() -> Result<(), Error> {
        let nbhd = Neighborhood::new(Shape::Square, 1)?;
        let mut world = World::new(&Config::default(), Hrot::new(nbhd, &[2], &[], 3)?)?;
        for coord in [(-40, 3), (0, 0), (25, -30), (7, 50)] {
            world.set_cell(coord, State(1))?;
        }
        assert_eq!(world.live_box(), None);
        assert_eq!(
            world.zoom_box(),
            Some(BoundingBox {
                min_x: -40,
                max_x: 25,
                min_y: -30,
                max_y: 50
            })
        );
        world.set_cell((7, 50), DEAD)?;
        world.set_cell((-40, 3), DEAD)?;
        assert_eq!(
            world.zoom_box(),
            Some(BoundingBox {
                min_x: 0,
                max_x: 25,
                min_y: -30,
                max_y: 0
            })
        );
        world.set_cell((0, 0), DEAD)?;
        world.set_cell((25, -30), DEAD)?;
        assert_eq!(world.zoom_box(), None);
        world.set_cell((25, -30), State(2))?;
        assert_eq!(world.live_box(), Some(BoundingBox::cell((25, -30))));
        assert_eq!(world.population(), 1);
        Ok(())
    }

    #[test]
    fn randomize_is_reproducible() -> Result<(), Error> {
        let bbox = BoundingBox::with_size(-10, -10, 20, 20);
        let mut a = life(&Config::default());
        let mut b = life(&Config::default());
        a.randomize(bbox, 0.5, Some(7))?;
        b.randomize(bbox, 0.5, Some(7))?;
        assert!(a.population() > 0);
        for y in -10..10 {
            for x in -10..10 {
                assert_eq!(a.get_cell((x, y)), b.get_cell((x, y)));
            }
        }
        a.run(10);
        b.run(10);
        assert_eq!(a.population(), b.population());
        assert_eq!(a.live_box(), b.live_box());
        Ok(())
    }

    #[test]
    fn grid_full() -> Result<(), Error> {
        // A row of cells grows in both directions under this rule.
        let nbhd = Neighborhood::new(Shape::Square, 1)?;
        let rule = Hrot::new(nbhd, &[1], &[0, 1, 2, 3, 4, 5, 6, 7, 8], 2)?;
        let config = Config::default().set_size(8, 8).set_max_grid_size(32);
        let mut world = World::new(&config, rule)?;
        world.set_cell((0, 0), State(1))?;
        assert_eq!(world.run(100), Status::GridFull);
        assert!(world.generation() < 100);
        let generation = world.generation();
        assert_eq!(world.step(), Status::GridFull);
        assert_eq!(world.generation(), generation);
        Ok(())
    }

    #[test]
    fn ltl_bosco_runs() -> Result<(), Error> {
        let mut world = World::new(&Config::default(), Ltl::bosco())?;
        world.randomize(BoundingBox::with_size(-15, -15, 30, 30), 0.4, Some(1))?;
        world.run(20);
        assert_eq!(world.generation(), 20);
        if let Some(live) = world.live_box() {
            for y in live.min_y - 5..=live.max_y + 5 {
                for x in live.min_x - 5..=live.max_x + 5 {
                    if !live.contains((x, y)) {
                        assert_eq!(world.get_cell((x, y)), DEAD);
                    }
                }
            }
        }
        Ok(())
    }
}
