//! Data processing for daily temperature records.
//!
//! This crate turns an unordered sequence of daily records into the dense
//! year x month [`grid::Grid`] consumed by the chart crate.

pub mod aggregation;
pub mod grid;

/// Aggregation settings.
pub mod config {
    use serde::{Deserialize, Serialize};

    /// Default number of trailing calendar years kept in the grid.
    pub const WINDOW_YEARS_DEFAULT: usize = 10;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AggregateConfig {
        /// How many of the most recent distinct years to keep.
        pub window_years: usize,
    }

    impl Default for AggregateConfig {
        fn default() -> Self {
            AggregateConfig {
                window_years: WINDOW_YEARS_DEFAULT,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::AggregateConfig;

        #[test]
        fn test_default_window() {
            assert_eq!(AggregateConfig::default().window_years, 10);
        }

        #[test]
        fn test_partial_json_uses_defaults() {
            let config: AggregateConfig = serde_json::from_str("{}").unwrap();
            assert_eq!(config, AggregateConfig::default());
            let config: AggregateConfig = serde_json::from_str(r#"{"window_years": 3}"#).unwrap();
            assert_eq!(config.window_years, 3);
        }
    }
}
