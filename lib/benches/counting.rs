use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rhrot_lib::{
    counting::CountGrid, rules::Ltl, Algorithm, BoundingBox, Config, Grid, Neighborhood, Shape,
    World,
};

const SIZE: i32 = 256;

fn soup() -> Grid {
    let mut rng = StdRng::seed_from_u64(1);
    let mut grid = Grid::new(SIZE, SIZE);
    for gy in 0..SIZE {
        for gx in 0..SIZE {
            grid.set_state(gx, gy, u8::from(rng.gen_bool(0.4)));
        }
    }
    grid
}

// ============================================================================
// Counting algorithms
// ============================================================================

fn bench_algorithms(c: &mut Criterion) {
    let grid = soup();
    let mut group = c.benchmark_group("counting");

    for shape in [Shape::Square, Shape::Diamond, Shape::Circle] {
        for radius in [2, 8, 20] {
            let nbhd = Neighborhood::new(shape, radius).unwrap();
            let region = grid.interior(radius as i32).unwrap();
            for algorithm in [
                Algorithm::SummedArea,
                Algorithm::Diamond,
                Algorithm::SlidingWindow,
            ] {
                if algorithm.resolve(&nbhd) != algorithm {
                    continue;
                }
                let mut counts = CountGrid::new();
                group.bench_function(format!("{:?}_r{}_{:?}", shape, radius, algorithm), |b| {
                    b.iter(|| {
                        counts.fill(&grid, 1, &nbhd, algorithm, black_box(region));
                        black_box(counts.get(region.min_x, region.min_y));
                    })
                });
            }
        }
    }

    group.finish();
}

// ============================================================================
// Whole generations
// ============================================================================

fn bench_bosco(c: &mut Criterion) {
    let mut world = World::new(&Config::default(), Ltl::bosco()).unwrap();
    world
        .randomize(BoundingBox::with_size(-64, -64, 128, 128), 0.4, Some(2))
        .unwrap();

    c.bench_function("bosco_step", |b| {
        b.iter(|| black_box(world.step()))
    });
}

criterion_group!(benches, bench_algorithms, bench_bosco);

criterion_main!(benches);
