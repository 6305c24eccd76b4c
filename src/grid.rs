/// Fishnet grid construction and per-cell event counting
///
/// Tessellates the bounding box of the input points into regular square
/// cells, counts the points falling in each cell with a half-open
/// point-in-rectangle predicate, then clips the tessellation to the study
/// region. Counting always runs against the pre-clip rectangle; clipping
/// only restricts the reported geometry.
use crate::config::HotspotConfig;
use crate::error::{HotspotError, Result};
use crate::geometry::{Polygon, Rect};
use glam::DVec2;

/// One fishnet cell with its event count
#[derive(Debug, Clone)]
pub struct Cell {
    /// Row index within the tessellation (y axis)
    pub row: u32,
    /// Column index within the tessellation (x axis)
    pub col: u32,
    /// Pre-clip rectangle; membership of points is decided against this
    pub rect: Rect,
    /// Geometry after clipping to the study region
    pub geometry: Polygon,
    /// Centroid of the clipped geometry, used for neighbor distances
    pub centroid: DVec2,
    /// Number of events assigned to this cell
    pub count: u32,
}

/// The clipped tessellation
#[derive(Debug, Clone)]
pub struct Grid {
    pub cells: Vec<Cell>,
    pub cell_size_m: f64,
}

impl Grid {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Event counts in cell order
    pub fn counts(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.count as f64).collect()
    }

    /// Cell centroids in cell order
    pub fn centroids(&self) -> Vec<DVec2> {
        self.cells.iter().map(|c| c.centroid).collect()
    }

    pub fn total_events(&self) -> u64 {
        self.cells.iter().map(|c| c.count as u64).sum()
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.count > 0).count()
    }
}

/// Builds the counted, clipped fishnet grid from raw points
pub struct GridBuilder<'a> {
    config: &'a HotspotConfig,
}

impl<'a> GridBuilder<'a> {
    pub fn new(config: &'a HotspotConfig) -> Self {
        Self { config }
    }

    /// Build the grid for a point set and study region.
    ///
    /// Fails with InsufficientData when fewer than the configured minimum
    /// number of points arrive, or when fewer than 2 cells survive clipping.
    pub fn build(&self, points: &[DVec2], region: &Polygon) -> Result<Grid> {
        // At least one point is needed for a bounding box even if the
        // configured minimum is lower
        let required = self.config.min_points.max(1);
        if points.len() < required {
            return Err(HotspotError::InsufficientData {
                observed: points.len(),
                required,
                what: "points",
            });
        }

        let cell = self.config.cell_size_m;
        let (min, max) = bounding_box(points);

        // Extend at least one cell past the max in each axis so every point,
        // including one exactly on the max bound, lands inside a cell.
        let n_cols = ((max.x - min.x) / cell).floor() as u32 + 1;
        let n_rows = ((max.y - min.y) / cell).floor() as u32 + 1;

        // Count events per pre-clip cell by index arithmetic; the floor of
        // the offset is exactly the half-open rectangle containment.
        let mut counts = vec![0u32; (n_rows * n_cols) as usize];
        for p in points {
            let col = ((p.x - min.x) / cell).floor() as u32;
            let row = ((p.y - min.y) / cell).floor() as u32;
            counts[(row * n_cols + col) as usize] += 1;
        }

        let mut cells = Vec::new();
        for row in 0..n_rows {
            for col in 0..n_cols {
                let rect = Rect::new(
                    DVec2::new(min.x + col as f64 * cell, min.y + row as f64 * cell),
                    DVec2::new(
                        min.x + (col + 1) as f64 * cell,
                        min.y + (row + 1) as f64 * cell,
                    ),
                );
                // Cells entirely outside the study region drop out here
                let Some(geometry) = region.clip_rect(&rect) else {
                    continue;
                };
                let centroid = geometry.centroid();
                cells.push(Cell {
                    row,
                    col,
                    rect,
                    geometry,
                    centroid,
                    count: counts[(row * n_cols + col) as usize],
                });
            }
        }

        if cells.len() < 2 {
            return Err(HotspotError::InsufficientData {
                observed: cells.len(),
                required: 2,
                what: "cells",
            });
        }

        Ok(Grid {
            cells,
            cell_size_m: cell,
        })
    }
}

fn bounding_box(points: &[DVec2]) -> (DVec2, DVec2) {
    let mut min = DVec2::splat(f64::INFINITY);
    let mut max = DVec2::splat(f64::NEG_INFINITY);
    for p in points {
        min = min.min(*p);
        max = max.max(*p);
    }
    (min, max)
}
