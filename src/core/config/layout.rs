//! Configuration for the layout algorithms.

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigValidator};

/// Configuration for column edge detection.
///
/// The detector scans the page left to right in windows sized as a fraction
/// of the page width, collecting lines whose leftmost baseline point falls in
/// the current window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDetectionConfig {
    /// Width of the scan window as a fraction of the page width.
    /// Default: 0.2
    #[serde(default = "EdgeDetectionConfig::default_window")]
    pub window: f64,

    /// Tolerance for lines of a column being slightly offset from each
    /// other, as a fraction of the page width. Smaller is stricter.
    /// Default: 0.03
    #[serde(default = "EdgeDetectionConfig::default_gap")]
    pub gap: f64,
}

impl EdgeDetectionConfig {
    fn default_window() -> f64 {
        0.2
    }

    fn default_gap() -> f64 {
        0.03
    }
}

impl Default for EdgeDetectionConfig {
    fn default() -> Self {
        Self {
            window: Self::default_window(),
            gap: Self::default_gap(),
        }
    }
}

impl ConfigValidator for EdgeDetectionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_fraction(self.window, "window")?;
        self.validate_fraction(self.gap, "gap")?;
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Configuration for the greedy slice planner.
///
/// The planner walks down each column sizing vertical bands so that the
/// accumulated transcription length lands inside
/// `[min_len_fraction * target_len, target_len]`. The margin and padding
/// fields are fractions of the page height; their defaults reproduce the
/// tuned production behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlicePlannerConfig {
    /// Target transcription length per slice, in characters.
    /// Default: 140
    #[serde(default = "SlicePlannerConfig::default_target_len")]
    pub target_len: usize,

    /// Lower bound of the acceptable length band, as a fraction of
    /// `target_len`. Default: 0.1
    #[serde(default = "SlicePlannerConfig::default_min_len_fraction")]
    pub min_len_fraction: f64,

    /// Initial growth rate: the first candidate band height as a fraction of
    /// the page height. Default: 0.1
    #[serde(default = "SlicePlannerConfig::default_initial_growth")]
    pub initial_growth: f64,

    /// Multiplicative growth applied when a band holds no text.
    /// Default: 1.2
    #[serde(default = "SlicePlannerConfig::default_empty_band_growth")]
    pub empty_band_growth: f64,

    /// Lower bound of the random jitter added to the empty-band growth
    /// factor. Default: -0.1
    #[serde(default = "SlicePlannerConfig::default_jitter_low")]
    pub jitter_low: f64,

    /// Upper bound of the random jitter added to the empty-band growth
    /// factor. Default: 0.05
    #[serde(default = "SlicePlannerConfig::default_jitter_high")]
    pub jitter_high: f64,

    /// How far above the slice bottom a stray baseline must sit to become
    /// the slice's effective top, as a fraction of page height.
    /// Default: 0.01
    #[serde(default = "SlicePlannerConfig::default_reconcile_margin")]
    pub reconcile_margin: f64,

    /// Extra padding added below each emitted slice, as a fraction of page
    /// height. Default: 0.005
    #[serde(default = "SlicePlannerConfig::default_bottom_padding")]
    pub bottom_padding: f64,
}

impl SlicePlannerConfig {
    fn default_target_len() -> usize {
        140
    }

    fn default_min_len_fraction() -> f64 {
        0.1
    }

    fn default_initial_growth() -> f64 {
        0.1
    }

    fn default_empty_band_growth() -> f64 {
        1.2
    }

    fn default_jitter_low() -> f64 {
        -0.1
    }

    fn default_jitter_high() -> f64 {
        0.05
    }

    fn default_reconcile_margin() -> f64 {
        0.01
    }

    fn default_bottom_padding() -> f64 {
        0.005
    }

    /// The minimum acceptable transcription length per slice, in characters.
    pub fn min_len(&self) -> f64 {
        self.min_len_fraction * self.target_len as f64
    }
}

impl Default for SlicePlannerConfig {
    fn default() -> Self {
        Self {
            target_len: Self::default_target_len(),
            min_len_fraction: Self::default_min_len_fraction(),
            initial_growth: Self::default_initial_growth(),
            empty_band_growth: Self::default_empty_band_growth(),
            jitter_low: Self::default_jitter_low(),
            jitter_high: Self::default_jitter_high(),
            reconcile_margin: Self::default_reconcile_margin(),
            bottom_padding: Self::default_bottom_padding(),
        }
    }
}

impl ConfigValidator for SlicePlannerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.target_len == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "target_len must be greater than 0".to_string(),
            });
        }

        self.validate_fraction(self.min_len_fraction, "min_len_fraction")?;
        self.validate_fraction(self.initial_growth, "initial_growth")?;

        if !self.empty_band_growth.is_finite() || self.empty_band_growth <= 0.0 {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "empty_band_growth must be positive, got: {}",
                    self.empty_band_growth
                ),
            });
        }

        if self.jitter_low >= self.jitter_high {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "jitter range is empty: [{}, {})",
                    self.jitter_low, self.jitter_high
                ),
            });
        }

        // The empty-band multiplier must stay positive even at the lowest
        // jitter, or the growth rate could collapse to zero or flip sign.
        if self.empty_band_growth + self.jitter_low <= 0.0 {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "empty_band_growth + jitter_low must be positive, got: {}",
                    self.empty_band_growth + self.jitter_low
                ),
            });
        }

        if !(0.0..1.0).contains(&self.reconcile_margin) {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "reconcile_margin must be in [0, 1), got: {}",
                    self.reconcile_margin
                ),
            });
        }

        if !(0.0..1.0).contains(&self.bottom_padding) {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "bottom_padding must be in [0, 1), got: {}",
                    self.bottom_padding
                ),
            });
        }

        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_detection_defaults_valid() {
        assert!(EdgeDetectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_edge_detection_rejects_bad_window() {
        let config = EdgeDetectionConfig {
            window: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EdgeDetectionConfig {
            window: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_planner_defaults_valid() {
        assert!(SlicePlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_planner_rejects_zero_target() {
        let config = SlicePlannerConfig {
            target_len: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_planner_rejects_empty_jitter_range() {
        let config = SlicePlannerConfig {
            jitter_low: 0.1,
            jitter_high: 0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_planner_rejects_collapsing_growth() {
        let config = SlicePlannerConfig {
            empty_band_growth: 0.05,
            jitter_low: -0.1,
            jitter_high: 0.05,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_len() {
        let config = SlicePlannerConfig::default();
        assert_eq!(config.min_len(), 14.0);
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: SlicePlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.target_len, 140);
        assert_eq!(config.initial_growth, 0.1);
    }
}
