/// Immutable per-cell output of the pipeline
///
/// One record per surviving cell, joining the clipped geometry and event
/// count with the Gi* statistic and its significance class. Built once,
/// never mutated; aggregate queries are pure folds over the records.
use crate::classify::{CLASS_ORDER, SignificanceClass};
use crate::geometry::Polygon;
use crate::gi_star::StatisticResult;
use crate::grid::Grid;
use crate::neighbors::NeighborGraph;
use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellRecord {
    pub row: u32,
    pub col: u32,
    pub geometry: Polygon,
    pub centroid: DVec2,
    pub count: u32,
    pub z: f64,
    pub p: f64,
    pub expected: f64,
    pub variance: f64,
    pub class: SignificanceClass,
    /// True when the cell had no neighbor within the distance band and its
    /// statistic fell back to the self-only neighborhood
    pub degenerate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    records: Vec<CellRecord>,
}

impl ResultSet {
    /// Join grid cells with their statistics, classifying each cell.
    /// Inputs must be index-aligned; the pipeline guarantees this.
    pub fn assemble(grid: &Grid, graph: &NeighborGraph, stats: &[StatisticResult]) -> Self {
        let records = grid
            .cells
            .iter()
            .zip(stats)
            .enumerate()
            .map(|(i, (cell, stat))| CellRecord {
                row: cell.row,
                col: cell.col,
                geometry: cell.geometry.clone(),
                centroid: cell.centroid,
                count: cell.count,
                z: stat.z,
                p: stat.p,
                expected: stat.expected,
                variance: stat.variance,
                class: SignificanceClass::from_statistic(stat.z, stat.p),
                degenerate: graph.is_degenerate(i),
            })
            .collect();
        Self { records }
    }

    pub fn from_records(records: Vec<CellRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[CellRecord] {
        &self.records
    }

    /// Cell count per class in display order (hot to cold)
    pub fn class_counts(&self) -> [(SignificanceClass, usize); 7] {
        CLASS_ORDER.map(|class| {
            let count = self.records.iter().filter(|r| r.class == class).count();
            (class, count)
        })
    }

    /// Total event count across cells of one class
    pub fn events_in_class(&self, class: SignificanceClass) -> u64 {
        self.records
            .iter()
            .filter(|r| r.class == class)
            .map(|r| r.count as u64)
            .sum()
    }

    pub fn total_events(&self) -> u64 {
        self.records.iter().map(|r| r.count as u64).sum()
    }

    /// (min, max) of the z-scores as a pure fold; None when empty
    pub fn z_extrema(&self) -> Option<(f64, f64)> {
        self.records.iter().fold(None, |acc, r| match acc {
            None => Some((r.z, r.z)),
            Some((lo, hi)) => Some((lo.min(r.z), hi.max(r.z))),
        })
    }

    /// Indices of the top `n` cells by z-score, descending
    pub fn top_by_z(&self, n: usize) -> Vec<&CellRecord> {
        let mut refs: Vec<&CellRecord> = self.records.iter().collect();
        refs.sort_by(|a, b| b.z.total_cmp(&a.z));
        refs.truncate(n);
        refs
    }

    pub fn degenerate_count(&self) -> usize {
        self.records.iter().filter(|r| r.degenerate).count()
    }
}
