// Null-case demo: a uniform random scatter should classify almost entirely
// as Not Significant, with z-scores hugging zero.

use glam::DVec2;
use grid_hotspot_rust::config::HotspotConfig;
use grid_hotspot_rust::geometry::Polygon;
use grid_hotspot_rust::pipeline::HotspotPipeline;
use grid_hotspot_rust::report;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    let mut rng = StdRng::seed_from_u64(99);
    let size = 6_000.0;

    let region = Polygon::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(size, 0.0),
        DVec2::new(size, size),
        DVec2::new(0.0, size),
    ]);
    let points: Vec<DVec2> = (0..2_000)
        .map(|_| DVec2::new(rng.random_range(0.0..size), rng.random_range(0.0..size)))
        .collect();

    println!("🎲 Uniform scatter: {} points, expecting a quiet map", points.len());

    let mut pipeline = HotspotPipeline::new(HotspotConfig::default().with_seed(1).with_debug());
    match pipeline.run(&points, &region) {
        Ok(results) => report::print_report(&results),
        Err(e) => {
            eprintln!("analysis failed: {}", e);
            std::process::exit(1);
        }
    }
}
