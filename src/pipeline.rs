/// End-to-end hot spot pipeline
///
/// Runs the stages in order: grid aggregation, neighbor weights, Gi* with
/// permutation significance, classification into the ResultSet. Each stage
/// receives immutable input and returns a new structure; wall-clock timing is
/// recorded per stage and printed when debug is on.
use crate::config::HotspotConfig;
use crate::error::Result;
use crate::geometry::Polygon;
use crate::gi_star::LocalStatisticEngine;
use crate::grid::GridBuilder;
use crate::neighbors::NeighborGraph;
use crate::result_set::ResultSet;
use glam::DVec2;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StageTiming {
    pub stage: &'static str,
    pub elapsed: Duration,
}

pub struct HotspotPipeline {
    config: HotspotConfig,
    timings: Vec<StageTiming>,
}

impl HotspotPipeline {
    pub fn new(config: HotspotConfig) -> Self {
        Self {
            config,
            timings: Vec::new(),
        }
    }

    pub fn config(&self) -> &HotspotConfig {
        &self.config
    }

    /// Timings recorded by the most recent run
    pub fn timings(&self) -> &[StageTiming] {
        &self.timings
    }

    /// Run the whole analysis over a point set and study region.
    ///
    /// Configuration is validated first; any stage failure aborts the run
    /// with no partial ResultSet.
    pub fn run(&mut self, points: &[DVec2], region: &Polygon) -> Result<ResultSet> {
        self.config.validate()?;
        self.timings.clear();
        let config = self.config.clone();

        let grid = self.timed("grid aggregation", || {
            GridBuilder::new(&config).build(points, region)
        })?;

        let graph = self.timed("neighbor weights", || {
            Ok(NeighborGraph::build(&grid.centroids(), config.threshold_m))
        })?;

        let stats = self.timed("gi* statistic", || {
            LocalStatisticEngine::new(&graph, config.permutations, config.seed)
                .compute(&grid.counts())
        })?;

        let results = self.timed("classification", || {
            Ok(ResultSet::assemble(&grid, &graph, &stats))
        })?;

        if self.config.debug {
            self.print_timing_report();
        }
        Ok(results)
    }

    fn timed<T, F: FnOnce() -> Result<T>>(&mut self, stage: &'static str, f: F) -> Result<T> {
        let start = Instant::now();
        let out = f();
        self.timings.push(StageTiming {
            stage,
            elapsed: start.elapsed(),
        });
        out
    }

    pub fn print_timing_report(&self) {
        let total: Duration = self.timings.iter().map(|t| t.elapsed).sum();
        println!("\n⏱️  === PIPELINE TIMING ===");
        for timing in &self.timings {
            let share = if total.as_nanos() > 0 {
                100.0 * timing.elapsed.as_nanos() as f64 / total.as_nanos() as f64
            } else {
                0.0
            };
            println!(
                "   {:<18} {:>9.2}ms  {:>5.1}%",
                timing.stage,
                timing.elapsed.as_secs_f64() * 1000.0,
                share
            );
        }
        println!(
            "   {:<18} {:>9.2}ms",
            "total",
            total.as_secs_f64() * 1000.0
        );
    }
}
