use crate::movement::MovementPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for agent/food placement.
    pub seed: u64,
    /// Grid width in cells. The x axis wraps at this value.
    pub width: usize,
    /// Grid height in cells. The y axis wraps at this value.
    pub height: usize,
    /// Number of episodes run on the shared controller.
    pub simulations: usize,
    /// Maximum number of steps per episode.
    pub step_budget: usize,
    /// Width of the controller's hidden layer.
    pub hidden_count: usize,
    /// Gradient step size.
    pub learning_rate: f64,
    /// Point at which the standard normal density is evaluated for the bias vectors.
    pub bias_deviation: f64,
    /// Constant every weight starts at.
    pub initial_weight: f64,
    /// How controller outputs are turned into grid moves.
    pub movement: MovementPolicy,
    /// Notify the text visualizer after every step.
    pub render: bool,
    /// Pause between rendered frames, in seconds.
    pub frame_delay_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 30,
            height: 10,
            simulations: 5,
            step_budget: 20,
            hidden_count: 10,
            learning_rate: 0.01,
            bias_deviation: 0.01,
            initial_weight: 0.5,
            movement: MovementPolicy::Truncate,
            render: false,
            frame_delay_secs: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimConfigError {
    #[error("width and height must be positive (got {width}x{height})")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid must have more than one cell so food can be placed away from the agent")]
    SingleCellGrid,
    #[error("grid cell count ({actual}) exceeds supported maximum ({max})")]
    GridTooLarge { max: usize, actual: usize },
    #[error("step_budget must be positive")]
    ZeroStepBudget,
    #[error("hidden_count must be positive")]
    ZeroHiddenCount,
    #[error("learning_rate must be positive and finite")]
    InvalidLearningRate,
    #[error("bias_deviation must be finite")]
    InvalidBiasDeviation,
    #[error("initial_weight must be finite")]
    InvalidInitialWeight,
    #[error("frame_delay_secs must be non-negative and finite")]
    InvalidFrameDelay,
    #[error("failed to read config: {0}")]
    Io(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl SimConfig {
    pub const MAX_GRID_CELLS: usize = 1 << 20;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(SimConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        let cells = self
            .width
            .checked_mul(self.height)
            .ok_or(SimConfigError::GridTooLarge {
                max: Self::MAX_GRID_CELLS,
                actual: usize::MAX,
            })?;
        if cells > Self::MAX_GRID_CELLS {
            return Err(SimConfigError::GridTooLarge {
                max: Self::MAX_GRID_CELLS,
                actual: cells,
            });
        }
        if cells < 2 {
            return Err(SimConfigError::SingleCellGrid);
        }
        if self.step_budget == 0 {
            return Err(SimConfigError::ZeroStepBudget);
        }
        if self.hidden_count == 0 {
            return Err(SimConfigError::ZeroHiddenCount);
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(SimConfigError::InvalidLearningRate);
        }
        if !self.bias_deviation.is_finite() {
            return Err(SimConfigError::InvalidBiasDeviation);
        }
        if !self.initial_weight.is_finite() {
            return Err(SimConfigError::InvalidInitialWeight);
        }
        if !(self.frame_delay_secs.is_finite() && self.frame_delay_secs >= 0.0) {
            return Err(SimConfigError::InvalidFrameDelay);
        }
        Ok(())
    }

    /// Parse a JSON config. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, SimConfigError> {
        serde_json::from_str(json).map_err(|e| SimConfigError::Parse(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SimConfigError::Io(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_single_cell_grid() {
        let config = SimConfig {
            width: 1,
            height: 1,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::SingleCellGrid));
    }

    #[test]
    fn rejects_empty_grid() {
        let config = SimConfig {
            width: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::EmptyGrid { width: 0, .. })
        ));
    }

    #[test]
    fn rejects_oversized_grid() {
        let config = SimConfig {
            width: usize::MAX,
            height: 2,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_bad_learning_rate() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                learning_rate: lr,
                ..SimConfig::default()
            };
            assert_eq!(config.validate(), Err(SimConfigError::InvalidLearningRate));
        }
    }

    #[test]
    fn rejects_zero_budget_and_hidden() {
        let config = SimConfig {
            step_budget: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::ZeroStepBudget));
        let config = SimConfig {
            hidden_count: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::ZeroHiddenCount));
    }

    #[test]
    fn small_simulation_count_is_left_to_the_trend() {
        let config = SimConfig {
            simulations: 1,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config =
            SimConfig::from_json_str(r#"{"seed": 7, "movement": "scale_shift"}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.movement, MovementPolicy::ScaleShift);
        assert_eq!(config.width, 30);
        assert_eq!(config.step_budget, 20);
    }

    #[test]
    fn bundled_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/scale_shift.json");
        let config = SimConfig::load(path).unwrap();
        assert_eq!(config.movement, MovementPolicy::ScaleShift);
        assert_eq!(config.simulations, 50);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn json_parse_errors_are_reported() {
        assert!(matches!(
            SimConfig::from_json_str("{not json"),
            Err(SimConfigError::Parse(_))
        ));
    }
}
