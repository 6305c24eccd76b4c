use crate::error::{HotspotError, Result};

/// Parameters for a hot spot analysis run
///
/// Defaults mirror the reference analysis: 500 m cells, a 1 500 m distance
/// band (about three cell widths), 999 permutations, and a 10-point minimum.
#[derive(Debug, Clone)]
pub struct HotspotConfig {
    /// Fishnet cell edge length in metres
    pub cell_size_m: f64,
    /// Neighborhood radius for the distance-band weights, in metres
    pub threshold_m: f64,
    /// Number of permutations for the significance simulation
    pub permutations: usize,
    /// Minimum viable number of input points
    pub min_points: usize,
    /// Fixed seed for the permutation RNG; None draws a fresh seed per run
    pub seed: Option<u64>,
    /// Print per-stage timing after a run
    pub debug: bool,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            cell_size_m: 500.0,
            threshold_m: 1500.0,
            permutations: 999,
            min_points: 10,
            seed: None,
            debug: false,
        }
    }
}

impl HotspotConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Reject non-positive parameters before any computation begins
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size_m > 0.0) {
            return Err(HotspotError::Configuration(format!(
                "cell size must be positive, got {}",
                self.cell_size_m
            )));
        }
        if !(self.threshold_m > 0.0) {
            return Err(HotspotError::Configuration(format!(
                "distance threshold must be positive, got {}",
                self.threshold_m
            )));
        }
        if self.permutations == 0 {
            return Err(HotspotError::Configuration(
                "permutation count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_analysis() {
        let config = HotspotConfig::default();
        assert_eq!(config.cell_size_m, 500.0);
        assert_eq!(config.threshold_m, 1500.0);
        assert_eq!(config.permutations, 999);
        assert_eq!(config.min_points, 10);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        let bad_cell = HotspotConfig {
            cell_size_m: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_cell.validate(),
            Err(HotspotError::Configuration(_))
        ));

        let bad_threshold = HotspotConfig {
            threshold_m: -100.0,
            ..Default::default()
        };
        assert!(bad_threshold.validate().is_err());

        let bad_perms = HotspotConfig {
            permutations: 0,
            ..Default::default()
        };
        assert!(bad_perms.validate().is_err());

        // NaN cell size must not sneak through the comparison
        let nan_cell = HotspotConfig {
            cell_size_m: f64::NAN,
            ..Default::default()
        };
        assert!(nan_cell.validate().is_err());
    }
}
