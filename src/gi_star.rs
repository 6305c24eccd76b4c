/// Getis-Ord Gi* local statistic with permutation significance
///
/// For each cell i with row-standardized neighbor weights w_ij and a self
/// weight of 1 (the star form includes the focal cell in its own
/// neighborhood):
///
/// ```text
/// z_i = (sum_j w_ij * y_j - W_i * mean) / (s * sqrt((n*S1_i - W_i^2)/(n-1)))
/// ```
///
/// with W_i the self-inclusive weight sum, S1_i the sum of squared weights,
/// and mean/s the global mean and population standard deviation of the
/// counts. The z-score is exact and deterministic; the p-value comes from a
/// permutation simulation and is stochastic unless a seed is fixed.
///
/// The simulation relabels the whole count vector (Fisher-Yates shuffle,
/// neighbor structure held fixed) and counts permutations whose weighted
/// local sum strictly exceeds the observed one. The tail count is folded to
/// the smaller side and corrected by +1/(P+1), so p is never exactly zero
/// and ties land in the complement rather than inflating significance.
use crate::error::{HotspotError, Result};
use crate::neighbors::NeighborGraph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Weight the focal cell carries in its own neighborhood (star form)
const SELF_WEIGHT: f64 = 1.0;

/// Per-cell output of the statistic engine
#[derive(Debug, Clone, Copy)]
pub struct StatisticResult {
    /// Gi* z-score
    pub z: f64,
    /// Simulated p-value in (0, 1]
    pub p: f64,
    /// Expected weighted local sum under the analytic null
    pub expected: f64,
    /// Variance of the weighted local sum under the analytic null
    pub variance: f64,
}

pub struct LocalStatisticEngine<'a> {
    graph: &'a NeighborGraph,
    permutations: usize,
    seed: Option<u64>,
}

impl<'a> LocalStatisticEngine<'a> {
    pub fn new(graph: &'a NeighborGraph, permutations: usize, seed: Option<u64>) -> Self {
        Self {
            graph,
            permutations,
            seed,
        }
    }

    /// Compute z, p, and the analytic moments for every cell.
    ///
    /// Fails with NumericInstability when the statistic is undefined (all
    /// counts identical, or a non-positive variance term) instead of letting
    /// a NaN through.
    pub fn compute(&self, counts: &[f64]) -> Result<Vec<StatisticResult>> {
        let n = counts.len();
        if n < 2 {
            return Err(HotspotError::InsufficientData {
                observed: n,
                required: 2,
                what: "cells",
            });
        }
        if n != self.graph.len() {
            return Err(HotspotError::Configuration(format!(
                "count vector ({}) and neighbor graph ({}) disagree on cell count",
                n,
                self.graph.len()
            )));
        }

        let mean = counts.iter().sum::<f64>() / n as f64;
        let variance = counts.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / n as f64;
        if variance <= 0.0 {
            return Err(HotspotError::NumericInstability(
                "global variance of cell counts is zero; every cell has the same count"
                    .to_string(),
            ));
        }
        let s = variance.sqrt();

        let observed_lags = self.local_lags(counts);

        let mut results = Vec::with_capacity(n);
        for i in 0..n {
            let mut w_sum = SELF_WEIGHT;
            let mut s1 = SELF_WEIGHT * SELF_WEIGHT;
            for nb in self.graph.neighbors(i) {
                w_sum += nb.weight;
                s1 += nb.weight * nb.weight;
            }

            let denom_term = (n as f64 * s1 - w_sum * w_sum) / (n as f64 - 1.0);
            if denom_term <= 0.0 {
                return Err(HotspotError::NumericInstability(format!(
                    "non-positive variance term {denom_term:.6} for cell {i} (n = {n})"
                )));
            }

            let expected = w_sum * mean;
            results.push(StatisticResult {
                z: (observed_lags[i] - expected) / (s * denom_term.sqrt()),
                p: f64::NAN, // filled by the simulation below
                expected,
                variance: variance * denom_term,
            });
        }

        let greater = self.simulate_exceedances(counts, &observed_lags);
        let p_total = self.permutations as f64;
        for (result, &count_greater) in results.iter_mut().zip(&greater) {
            let folded = count_greater.min(self.permutations as u32 - count_greater);
            result.p = (folded as f64 + 1.0) / (p_total + 1.0);
        }

        Ok(results)
    }

    /// Weighted local sum (self-inclusive) per cell for a given labeling
    fn local_lags(&self, values: &[f64]) -> Vec<f64> {
        (0..values.len())
            .map(|i| {
                let mut lag = SELF_WEIGHT * values[i];
                for nb in self.graph.neighbors(i) {
                    lag += nb.weight * values[nb.index];
                }
                lag
            })
            .collect()
    }

    /// Count, per cell, how many permuted labelings produce a strictly
    /// greater local sum than the observed one. Ties with the observed sum
    /// land in the complement, so an arrangement that can only be tied,
    /// never beaten, folds to the floor p-value.
    ///
    /// Parallel across permutations: every permutation owns a seed derived
    /// from the base seed and its index, so the merged counts are identical
    /// regardless of thread scheduling.
    fn simulate_exceedances(&self, counts: &[f64], observed: &[f64]) -> Vec<u32> {
        let base_seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let n = counts.len();

        (0..self.permutations)
            .into_par_iter()
            .fold(
                || (vec![0u32; n], counts.to_vec()),
                |(mut acc, mut shuffled), perm_index| {
                    let mut rng = StdRng::seed_from_u64(derive_seed(base_seed, perm_index as u64));
                    shuffled.copy_from_slice(counts);
                    shuffled.shuffle(&mut rng);

                    for i in 0..n {
                        let mut lag = SELF_WEIGHT * shuffled[i];
                        for nb in self.graph.neighbors(i) {
                            lag += nb.weight * shuffled[nb.index];
                        }
                        if lag > observed[i] {
                            acc[i] += 1;
                        }
                    }
                    (acc, shuffled)
                },
            )
            .map(|(acc, _)| acc)
            .reduce(
                || vec![0u32; n],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            )
    }
}

/// splitmix64 step over the base seed and permutation index; gives every
/// permutation an uncorrelated RNG stream
fn derive_seed(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
