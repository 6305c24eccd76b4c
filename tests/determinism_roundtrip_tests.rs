// Reproducibility and serialization properties of the full pipeline

use glam::DVec2;
use grid_hotspot_rust::config::HotspotConfig;
use grid_hotspot_rust::geojson;
use grid_hotspot_rust::geometry::Polygon;
use grid_hotspot_rust::pipeline::HotspotPipeline;
use grid_hotspot_rust::result_set::ResultSet;
use more_asserts::assert_ge;

fn region() -> Polygon {
    Polygon::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(8_000.0, 0.0),
        DVec2::new(8_000.0, 8_000.0),
        DVec2::new(0.0, 8_000.0),
    ])
}

/// Deterministic pseudo-scatter with a dense pocket in one corner
fn scatter() -> Vec<DVec2> {
    let mut points = Vec::new();
    for i in 0..160u64 {
        let x = ((i.wrapping_mul(2654435761)) % 8_000) as f64;
        let y = ((i.wrapping_mul(40503).wrapping_add(17)) % 8_000) as f64;
        points.push(DVec2::new(x, y));
    }
    for i in 0..60 {
        points.push(DVec2::new(
            600.0 + (i % 8) as f64 * 40.0,
            700.0 + (i / 8) as f64 * 45.0,
        ));
    }
    points
}

fn run_with_seed(seed: u64) -> ResultSet {
    let config = HotspotConfig {
        permutations: 199,
        seed: Some(seed),
        ..Default::default()
    };
    HotspotPipeline::new(config)
        .run(&scatter(), &region())
        .unwrap()
}

#[test]
fn test_fixed_seed_runs_are_bit_identical() {
    let first = run_with_seed(20_240_501);
    let second = run_with_seed(20_240_501);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.z.to_bits(), b.z.to_bits());
        assert_eq!(a.p.to_bits(), b.p.to_bits());
        assert_eq!(a.class, b.class);
        assert_eq!(a.count, b.count);
    }
}

#[test]
fn test_different_seeds_agree_on_z_but_not_necessarily_p() {
    // z is analytic and seed-independent; p is a simulation estimate
    let first = run_with_seed(1);
    let second = run_with_seed(2);

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.z.to_bits(), b.z.to_bits());
    }
}

#[test]
fn test_class_counts_partition_the_grid() {
    let results = run_with_seed(99);
    let classified: usize = results.class_counts().iter().map(|(_, n)| n).sum();
    assert_eq!(classified, results.len());
    assert_ge!(results.len(), 100);
}

#[test]
fn test_geojson_file_round_trip() {
    let results = run_with_seed(555);

    let path = std::env::temp_dir().join("grid_hotspot_roundtrip_test.geojson");
    geojson::write_file(&results, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let parsed = geojson::parse(&value).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(parsed.len(), results.len());
    for (original, back) in results.iter().zip(&parsed) {
        assert_eq!(back.count, original.count);
        assert_eq!(back.class, original.class);
        // Statistics survive to at least 4 decimal places
        assert!((back.z - original.z).abs() <= 0.5e-4);
        assert!((back.p - original.p).abs() <= 0.5e-4);
    }
}

#[test]
fn test_result_set_serde_round_trip() {
    // The whole ResultSet also round-trips through plain serde_json
    let results = run_with_seed(8);
    let text = serde_json::to_string(&results).unwrap();
    let back: ResultSet = serde_json::from_str(&text).unwrap();

    assert_eq!(back.len(), results.len());
    for (a, b) in results.iter().zip(back.iter()) {
        assert_eq!(a.z.to_bits(), b.z.to_bits());
        assert_eq!(a.p.to_bits(), b.p.to_bits());
        assert_eq!(a.class, b.class);
        assert_eq!(a.degenerate, b.degenerate);
    }
}
