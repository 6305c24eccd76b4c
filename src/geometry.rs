/// Planar geometry primitives for the fishnet grid
///
/// Everything here works in projected (metric) coordinates. The two types are
/// the axis-aligned cell rectangle with its half-open containment test, and a
/// simple polygon used for the study region and for clipped cell geometry.
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Center point of the rectangle
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Half-open containment: lower bounds inclusive, upper bounds exclusive.
    /// A point on an edge shared by two grid cells belongs to exactly one.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Corner points in counter-clockwise order starting at min
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.min.x, self.min.y),
            DVec2::new(self.max.x, self.min.y),
            DVec2::new(self.max.x, self.max.y),
            DVec2::new(self.min.x, self.max.y),
        ]
    }
}

/// Simple polygon stored as a counter-clockwise vertex ring (no closing
/// duplicate vertex). Study regions are expected to be convex; clipped cell
/// geometry produced by `clip_rect` always is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<DVec2>,
}

impl Polygon {
    /// Build a polygon from a vertex ring, normalizing winding to CCW
    pub fn new(mut vertices: Vec<DVec2>) -> Self {
        if signed_area(&vertices) < 0.0 {
            vertices.reverse();
        }
        Self { vertices }
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            vertices: rect.corners().to_vec(),
        }
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }

    /// Area centroid (shoelace formula). Falls back to the vertex mean for
    /// degenerate (zero-area) rings so the result is always finite.
    pub fn centroid(&self) -> DVec2 {
        let a = signed_area(&self.vertices);
        if a.abs() < f64::EPSILON {
            let n = self.vertices.len().max(1) as f64;
            return self.vertices.iter().copied().sum::<DVec2>() / n;
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        let n = self.vertices.len();
        for i in 0..n {
            let p = self.vertices[i];
            let q = self.vertices[(i + 1) % n];
            let cross = p.x * q.y - q.x * p.y;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        DVec2::new(cx, cy) / (6.0 * a)
    }

    /// Clip an axis-aligned rectangle against this (convex) polygon using
    /// Sutherland-Hodgman. Returns None when the intersection is empty or has
    /// effectively zero area.
    pub fn clip_rect(&self, rect: &Rect) -> Option<Polygon> {
        let mut subject: Vec<DVec2> = rect.corners().to_vec();
        let n = self.vertices.len();

        for i in 0..n {
            let edge_a = self.vertices[i];
            let edge_b = self.vertices[(i + 1) % n];
            let input = std::mem::take(&mut subject);
            if input.is_empty() {
                return None;
            }

            let mut prev = input[input.len() - 1];
            for &curr in &input {
                let prev_inside = is_left_of(edge_a, edge_b, prev);
                let curr_inside = is_left_of(edge_a, edge_b, curr);
                if curr_inside {
                    if !prev_inside {
                        subject.push(line_intersection(edge_a, edge_b, prev, curr));
                    }
                    subject.push(curr);
                } else if prev_inside {
                    subject.push(line_intersection(edge_a, edge_b, prev, curr));
                }
                prev = curr;
            }
        }

        if subject.len() < 3 {
            return None;
        }
        let clipped = Polygon::new(subject);
        if clipped.area() < 1e-9 {
            return None;
        }
        Some(clipped)
    }
}

/// Twice-signed shoelace sum halved; positive for CCW rings
fn signed_area(vertices: &[DVec2]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }
    sum * 0.5
}

/// Point strictly left of, or on, the directed line a->b
fn is_left_of(a: DVec2, b: DVec2, p: DVec2) -> bool {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x) >= 0.0
}

/// Intersection of the infinite line a->b with segment p->q.
/// Callers guarantee the segment crosses the line.
fn line_intersection(a: DVec2, b: DVec2, p: DVec2, q: DVec2) -> DVec2 {
    let r = b - a;
    let s = q - p;
    let denom = r.x * s.y - r.y * s.x;
    let t = ((p.x - a.x) * s.y - (p.y - a.y) * s.x) / denom;
    a + r * t
}
