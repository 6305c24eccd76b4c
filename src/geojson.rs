/// GeoJSON serialization of a ResultSet
///
/// Produces the FeatureCollection consumed by the map renderers: one Polygon
/// feature per cell with `count`, `Gi_z`, `Gi_p`, and `class` properties.
/// Coordinates are rounded to 6 decimals and the statistics to 4, matching
/// the reference export. `parse` reads the same shape back, for consumers
/// that round-trip results through disk.
use crate::classify::SignificanceClass;
use crate::geometry::Polygon;
use crate::result_set::ResultSet;
use glam::DVec2;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// A feature read back from a GeoJSON export
#[derive(Debug, Clone)]
pub struct ParsedFeature {
    pub geometry: Polygon,
    pub count: u32,
    pub z: f64,
    pub p: f64,
    pub class: SignificanceClass,
}

/// Build the FeatureCollection for a ResultSet
pub fn to_value(results: &ResultSet) -> Value {
    let features: Vec<Value> = results
        .iter()
        .map(|r| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [polygon_ring(&r.geometry)],
                },
                "properties": {
                    "count": r.count,
                    "Gi_z": round_to(r.z, 4),
                    "Gi_p": round_to(r.p, 4),
                    "class": r.class.label(),
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Serialize and write a ResultSet to a GeoJSON file
pub fn write_file<P: AsRef<Path>>(results: &ResultSet, path: P) -> Result<(), String> {
    let value = to_value(results);
    let text = serde_json::to_string(&value)
        .map_err(|e| format!("failed to serialize GeoJSON: {}", e))?;
    fs::write(path.as_ref(), text)
        .map_err(|e| format!("failed to write {}: {}", path.as_ref().display(), e))
}

/// Parse a FeatureCollection produced by `to_value`
pub fn parse(value: &Value) -> Result<Vec<ParsedFeature>, String> {
    let features = value
        .get("features")
        .and_then(Value::as_array)
        .ok_or("missing features array")?;

    features.iter().map(parse_feature).collect()
}

fn parse_feature(feature: &Value) -> Result<ParsedFeature, String> {
    let props = feature.get("properties").ok_or("feature has no properties")?;

    let count = props
        .get("count")
        .and_then(Value::as_u64)
        .ok_or("missing count")? as u32;
    let z = props
        .get("Gi_z")
        .and_then(Value::as_f64)
        .ok_or("missing Gi_z")?;
    let p = props
        .get("Gi_p")
        .and_then(Value::as_f64)
        .ok_or("missing Gi_p")?;
    let class_label = props
        .get("class")
        .and_then(Value::as_str)
        .ok_or("missing class")?;
    let class = SignificanceClass::parse(class_label)
        .ok_or_else(|| format!("unknown class '{}'", class_label))?;

    let ring = feature
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)
        .and_then(|rings| rings.first())
        .and_then(Value::as_array)
        .ok_or("missing polygon ring")?;

    // Drop the closing duplicate vertex of the GeoJSON ring
    let mut vertices = Vec::with_capacity(ring.len().saturating_sub(1));
    for coord in &ring[..ring.len().saturating_sub(1)] {
        let pair = coord.as_array().ok_or("coordinate is not a pair")?;
        let x = pair.first().and_then(Value::as_f64).ok_or("bad x")?;
        let y = pair.get(1).and_then(Value::as_f64).ok_or("bad y")?;
        vertices.push(DVec2::new(x, y));
    }

    Ok(ParsedFeature {
        geometry: Polygon::new(vertices),
        count,
        z,
        p,
        class,
    })
}

/// Closed coordinate ring (first vertex repeated) rounded to 6 decimals
fn polygon_ring(polygon: &Polygon) -> Vec<[f64; 2]> {
    let mut ring: Vec<[f64; 2]> = polygon
        .vertices()
        .iter()
        .map(|v| [round_to(v.x, 6), round_to(v.y, 6)])
        .collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    ring
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
