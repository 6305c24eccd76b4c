// Synthetic clustered events over a 10 km square, end to end.
//
// Builds a point set from a few dense cluster pockets on top of a
// Perlin-modulated background field, runs the hot spot pipeline, prints the
// classification summary, and writes the GeoJSON layer for the map viewer.

use glam::DVec2;
use grid_hotspot_rust::config::HotspotConfig;
use grid_hotspot_rust::geojson;
use grid_hotspot_rust::geometry::Polygon;
use grid_hotspot_rust::pipeline::HotspotPipeline;
use grid_hotspot_rust::report;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const REGION_M: f64 = 10_000.0;

fn main() {
    let mut rng = StdRng::seed_from_u64(2024);
    let perlin = Perlin::new(7);

    let region = Polygon::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(REGION_M, 0.0),
        DVec2::new(REGION_M, REGION_M),
        DVec2::new(0.0, REGION_M),
    ]);

    // Dense pockets that should light up as hot spots
    let cluster_centers = [
        DVec2::new(2_200.0, 2_600.0),
        DVec2::new(7_400.0, 6_800.0),
        DVec2::new(4_900.0, 8_300.0),
    ];
    let mut points = Vec::new();
    for center in cluster_centers {
        for _ in 0..400 {
            let dx = rng.random_range(-450.0..450.0);
            let dy = rng.random_range(-450.0..450.0);
            points.push(center + DVec2::new(dx, dy));
        }
    }

    // Background scatter, thinned by a Perlin intensity field so the empty
    // areas are uneven rather than flat
    let mut background = 0;
    while background < 1_500 {
        let p = DVec2::new(
            rng.random_range(0.0..REGION_M),
            rng.random_range(0.0..REGION_M),
        );
        let intensity = (perlin.get([p.x / 3_000.0, p.y / 3_000.0]) + 1.0) / 2.0;
        if rng.random_range(0.0..1.0) < intensity {
            points.push(p);
            background += 1;
        }
    }

    println!("🗺️  Synthetic event field: {} points over {:.0} km²",
        points.len(),
        (REGION_M / 1000.0) * (REGION_M / 1000.0)
    );

    let config = HotspotConfig::default().with_seed(42).with_debug();
    let mut pipeline = HotspotPipeline::new(config);
    let results = match pipeline.run(&points, &region) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("analysis failed: {}", e);
            std::process::exit(1);
        }
    };

    report::print_report(&results);

    let out = "hotspot_results.geojson";
    match geojson::write_file(&results, out) {
        Ok(()) => println!("\n💾 Results GeoJSON → {}", out),
        Err(e) => eprintln!("export failed: {}", e),
    }
}
