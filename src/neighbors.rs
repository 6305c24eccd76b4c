/// Distance-band spatial weights
///
/// Connects every pair of cells whose centroids lie within the configured
/// threshold, then row-standardizes so each cell's outgoing weights sum to 1.
/// Adjacency is symmetric but the standardized weights are not: each row is
/// divided by its own neighbor count.
///
/// Candidate pairs come from a hash-grid bucket index with bucket edge equal
/// to the threshold, so a query only scans the 3x3 block of buckets around a
/// cell instead of every other cell.
use glam::DVec2;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index of the target cell
    pub index: usize,
    /// Row-standardized weight of the edge
    pub weight: f64,
}

/// Row-standardized distance-band weights for a set of cell centroids
#[derive(Debug, Clone)]
pub struct NeighborGraph {
    rows: Vec<Vec<Neighbor>>,
    threshold_m: f64,
}

impl NeighborGraph {
    /// Build the graph for a centroid set and distance threshold.
    /// Cells whose centroid distance is exactly the threshold qualify.
    pub fn build(centroids: &[DVec2], threshold_m: f64) -> Self {
        let index = BucketIndex::new(centroids, threshold_m);
        let threshold_sq = threshold_m * threshold_m;

        let mut rows = Vec::with_capacity(centroids.len());
        for (i, &c) in centroids.iter().enumerate() {
            let mut hits: Vec<usize> = index
                .candidates(c)
                .filter(|&j| j != i && centroids[j].distance_squared(c) <= threshold_sq)
                .collect();
            hits.sort_unstable();

            let k = hits.len();
            let row = if k == 0 {
                // Degenerate: no outgoing edges, weight sum 0
                Vec::new()
            } else {
                let w = 1.0 / k as f64;
                hits.into_iter()
                    .map(|index| Neighbor { index, weight: w })
                    .collect()
            };
            rows.push(row);
        }

        Self { rows, threshold_m }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn threshold_m(&self) -> f64 {
        self.threshold_m
    }

    /// Outgoing edges of a cell; empty for a degenerate cell
    pub fn neighbors(&self, cell: usize) -> &[Neighbor] {
        &self.rows[cell]
    }

    /// True when the cell has no neighbor within the threshold
    pub fn is_degenerate(&self, cell: usize) -> bool {
        self.rows[cell].is_empty()
    }

    pub fn degenerate_cells(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&i| self.rows[i].is_empty())
            .collect()
    }

    pub fn mean_neighbors(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let total: usize = self.rows.iter().map(|r| r.len()).sum();
        total as f64 / self.rows.len() as f64
    }
}

/// Hash-grid over centroid space; bucket edge equals the distance threshold,
/// so all qualifying neighbors of a point live in its 3x3 bucket block
struct BucketIndex {
    buckets: HashMap<(i64, i64), Vec<usize>>,
    edge: f64,
}

impl BucketIndex {
    fn new(centroids: &[DVec2], edge: f64) -> Self {
        let mut buckets: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, c) in centroids.iter().enumerate() {
            buckets.entry(Self::key(*c, edge)).or_default().push(i);
        }
        Self { buckets, edge }
    }

    fn key(p: DVec2, edge: f64) -> (i64, i64) {
        ((p.x / edge).floor() as i64, (p.y / edge).floor() as i64)
    }

    fn candidates(&self, p: DVec2) -> impl Iterator<Item = usize> + '_ {
        let (bx, by) = Self::key(p, self.edge);
        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                self.buckets
                    .get(&(bx + dx, by + dy))
                    .map(|v| v.iter().copied())
                    .into_iter()
                    .flatten()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 3x3 grid of centroids spaced 500 m apart, row-major
    fn nine_centroids() -> Vec<DVec2> {
        let mut centroids = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                centroids.push(DVec2::new(col as f64 * 500.0, row as f64 * 500.0));
            }
        }
        centroids
    }

    #[test]
    fn test_rook_band_weights_on_three_by_three() {
        // 600 m band: orthogonal neighbors (500 m) qualify, diagonals
        // (707 m) do not
        let graph = NeighborGraph::build(&nine_centroids(), 600.0);

        // Center cell (index 4) has four neighbors at weight 1/4
        let center = graph.neighbors(4);
        assert_eq!(center.len(), 4);
        for n in center {
            assert_relative_eq!(n.weight, 0.25);
        }
        let targets: Vec<usize> = center.iter().map(|n| n.index).collect();
        assert_eq!(targets, vec![1, 3, 5, 7]);

        // Corner cells have two neighbors at weight 1/2
        for corner in [0, 2, 6, 8] {
            let row = graph.neighbors(corner);
            assert_eq!(row.len(), 2);
            for n in row {
                assert_relative_eq!(n.weight, 0.5);
            }
        }
    }

    #[test]
    fn test_rows_sum_to_one_or_zero() {
        let mut centroids = nine_centroids();
        // An isolated cell far outside any band
        centroids.push(DVec2::new(50_000.0, 50_000.0));
        let graph = NeighborGraph::build(&centroids, 1500.0);

        for i in 0..graph.len() {
            let sum: f64 = graph.neighbors(i).iter().map(|n| n.weight).sum();
            if graph.is_degenerate(i) {
                assert_eq!(sum, 0.0);
            } else {
                assert_relative_eq!(sum, 1.0, max_relative = 1e-12);
            }
            for n in graph.neighbors(i) {
                assert!(n.weight > 0.0 && n.weight <= 1.0);
            }
        }
        assert_eq!(graph.degenerate_cells(), vec![9]);
    }

    #[test]
    fn test_adjacency_symmetric_weights_not() {
        let graph = NeighborGraph::build(&nine_centroids(), 600.0);

        // Center (4 neighbors) and corner 0 (2 neighbors) both see the
        // shared edge cell 1, with different weights
        let from_center = graph.neighbors(4).iter().find(|n| n.index == 1).unwrap();
        let from_corner = graph.neighbors(0).iter().find(|n| n.index == 1).unwrap();
        assert_relative_eq!(from_center.weight, 0.25);
        assert_relative_eq!(from_corner.weight, 0.5);

        // Qualification is symmetric
        assert!(graph.neighbors(1).iter().any(|n| n.index == 4));
        assert!(graph.neighbors(1).iter().any(|n| n.index == 0));
    }

    #[test]
    fn test_exact_threshold_distance_qualifies() {
        let centroids = vec![DVec2::new(0.0, 0.0), DVec2::new(1500.0, 0.0)];
        let graph = NeighborGraph::build(&centroids, 1500.0);
        assert_eq!(graph.neighbors(0).len(), 1);
        assert_eq!(graph.neighbors(1).len(), 1);
    }

    #[test]
    fn test_bucket_index_matches_brute_force() {
        // Pseudo-random scatter; compare the bucketed result against an
        // all-pairs scan
        let centroids: Vec<DVec2> = (0..200)
            .map(|i| {
                let x = (i as f64 * 7919.0) % 10_000.0;
                let y = (i as f64 * 104_729.0) % 10_000.0;
                DVec2::new(x, y)
            })
            .collect();
        let threshold = 1500.0;
        let graph = NeighborGraph::build(&centroids, threshold);

        for i in 0..centroids.len() {
            let mut expected: Vec<usize> = (0..centroids.len())
                .filter(|&j| j != i && centroids[i].distance(centroids[j]) <= threshold)
                .collect();
            expected.sort_unstable();
            let actual: Vec<usize> = graph.neighbors(i).iter().map(|n| n.index).collect();
            assert_eq!(actual, expected, "neighbor mismatch for cell {}", i);
        }
    }
}
