use rhrot_lib::{Simulate, Status};
use tracing::{info, warn};

/// Runs the world for some generations, and prints the result.
pub(crate) fn run(mut world: Box<dyn Simulate>, generations: u64) {
    match world.run(generations) {
        Status::GridFull => warn!(
            generation = world.generation(),
            "The pattern outgrew the maximum grid size"
        ),
        Status::Extinct => info!(generation = world.generation(), "The pattern died out"),
        Status::Running => {}
    }
    info!(
        generation = world.generation(),
        population = world.population(),
        "Done"
    );
    print!("{}", world.rle());
}
