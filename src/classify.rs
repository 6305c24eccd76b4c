/// Significance classification of (z, p) pairs
///
/// Seven ordered tiers, hot to cold. The mapping is a total pure function:
/// the p-value picks the confidence tier (first match wins) and the z sign
/// picks hot versus cold. z = 0 with a significant p routes to the cold
/// branch; that combination is numerically improbable but must still map
/// somewhere.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignificanceClass {
    #[serde(rename = "Hot Spot 99%")]
    HotSpot99,
    #[serde(rename = "Hot Spot 95%")]
    HotSpot95,
    #[serde(rename = "Hot Spot 90%")]
    HotSpot90,
    #[serde(rename = "Not Significant")]
    NotSignificant,
    #[serde(rename = "Cold Spot 90%")]
    ColdSpot90,
    #[serde(rename = "Cold Spot 95%")]
    ColdSpot95,
    #[serde(rename = "Cold Spot 99%")]
    ColdSpot99,
}

/// Display order used by legends and summary tables, hot to cold
pub const CLASS_ORDER: [SignificanceClass; 7] = [
    SignificanceClass::HotSpot99,
    SignificanceClass::HotSpot95,
    SignificanceClass::HotSpot90,
    SignificanceClass::NotSignificant,
    SignificanceClass::ColdSpot90,
    SignificanceClass::ColdSpot95,
    SignificanceClass::ColdSpot99,
];

impl SignificanceClass {
    /// Map a z-score and simulated p-value to a tier
    pub fn from_statistic(z: f64, p: f64) -> Self {
        if p < 0.01 {
            if z > 0.0 {
                Self::HotSpot99
            } else {
                Self::ColdSpot99
            }
        } else if p < 0.05 {
            if z > 0.0 {
                Self::HotSpot95
            } else {
                Self::ColdSpot95
            }
        } else if p < 0.10 {
            if z > 0.0 {
                Self::HotSpot90
            } else {
                Self::ColdSpot90
            }
        } else {
            Self::NotSignificant
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HotSpot99 => "Hot Spot 99%",
            Self::HotSpot95 => "Hot Spot 95%",
            Self::HotSpot90 => "Hot Spot 90%",
            Self::NotSignificant => "Not Significant",
            Self::ColdSpot90 => "Cold Spot 90%",
            Self::ColdSpot95 => "Cold Spot 95%",
            Self::ColdSpot99 => "Cold Spot 99%",
        }
    }

    /// Reference map colors, shared with downstream renderers
    pub fn color_hex(&self) -> &'static str {
        match self {
            Self::HotSpot99 => "#d7191c",
            Self::HotSpot95 => "#f87c40",
            Self::HotSpot90 => "#fed789",
            Self::NotSignificant => "#eeeeee",
            Self::ColdSpot90 => "#abd9e9",
            Self::ColdSpot95 => "#4db3d7",
            Self::ColdSpot99 => "#2c7bb6",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        CLASS_ORDER.into_iter().find(|c| c.label() == label)
    }

    pub fn is_hot(&self) -> bool {
        matches!(self, Self::HotSpot99 | Self::HotSpot95 | Self::HotSpot90)
    }

    pub fn is_cold(&self) -> bool {
        matches!(self, Self::ColdSpot99 | Self::ColdSpot95 | Self::ColdSpot90)
    }
}

impl fmt::Display for SignificanceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_first_match_wins() {
        assert_eq!(
            SignificanceClass::from_statistic(3.0, 0.009),
            SignificanceClass::HotSpot99
        );
        assert_eq!(
            SignificanceClass::from_statistic(2.1, 0.01),
            SignificanceClass::HotSpot95
        );
        assert_eq!(
            SignificanceClass::from_statistic(1.8, 0.049),
            SignificanceClass::HotSpot95
        );
        assert_eq!(
            SignificanceClass::from_statistic(1.7, 0.05),
            SignificanceClass::HotSpot90
        );
        assert_eq!(
            SignificanceClass::from_statistic(1.7, 0.099),
            SignificanceClass::HotSpot90
        );
        assert_eq!(
            SignificanceClass::from_statistic(1.6, 0.10),
            SignificanceClass::NotSignificant
        );
        assert_eq!(
            SignificanceClass::from_statistic(-2.8, 0.004),
            SignificanceClass::ColdSpot99
        );
        assert_eq!(
            SignificanceClass::from_statistic(-2.0, 0.03),
            SignificanceClass::ColdSpot95
        );
        assert_eq!(
            SignificanceClass::from_statistic(-1.7, 0.08),
            SignificanceClass::ColdSpot90
        );
    }

    #[test]
    fn test_zero_z_routes_cold() {
        assert_eq!(
            SignificanceClass::from_statistic(0.0, 0.001),
            SignificanceClass::ColdSpot99
        );
    }

    #[test]
    fn test_total_and_idempotent() {
        let inputs = [
            (f64::MAX, 0.0),
            (f64::MIN, 1.0),
            (0.0, 0.5),
            (-1e-300, 0.02),
            (4.2, 0.0011),
        ];
        for (z, p) in inputs {
            let first = SignificanceClass::from_statistic(z, p);
            let second = SignificanceClass::from_statistic(z, p);
            assert_eq!(first, second);
            assert!(CLASS_ORDER.contains(&first));
        }
    }

    #[test]
    fn test_labels_round_trip() {
        for class in CLASS_ORDER {
            assert_eq!(SignificanceClass::parse(class.label()), Some(class));
            // serde uses the exact same strings
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{}\"", class.label()));
            let back: SignificanceClass = serde_json::from_str(&json).unwrap();
            assert_eq!(back, class);
        }
        assert_eq!(SignificanceClass::parse("Lukewarm Spot"), None);
    }

    #[test]
    fn test_hot_cold_partitions() {
        let hot = CLASS_ORDER.iter().filter(|c| c.is_hot()).count();
        let cold = CLASS_ORDER.iter().filter(|c| c.is_cold()).count();
        assert_eq!(hot, 3);
        assert_eq!(cold, 3);
        assert!(!SignificanceClass::NotSignificant.is_hot());
        assert!(!SignificanceClass::NotSignificant.is_cold());
    }
}
