use crate::nn::OUTPUT_SIZE;
use serde::{Deserialize, Serialize};

/// How controller outputs in (0, 1) become grid moves, and how directional
/// targets in {-1, 0, 1} are expressed in output space for training.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPolicy {
    /// Clamp to [-1, 1] and truncate. Sigmoid outputs always truncate to 0,
    /// so the agent never moves. Targets are used as-is.
    #[default]
    Truncate,
    /// Read an output `o` as `2o - 1` and round to the nearest step. Targets
    /// are mapped to `(t + 1) / 2` so that "stay" sits at 0.5.
    ScaleShift,
}

impl MovementPolicy {
    pub const MOVE_LOWER_BOUND: f64 = -1.0;
    pub const MOVE_UPPER_BOUND: f64 = 1.0;

    pub fn delta(self, output: &[f64; OUTPUT_SIZE]) -> (i64, i64) {
        let axis = |o: f64| -> i64 {
            let v = match self {
                MovementPolicy::Truncate => o,
                MovementPolicy::ScaleShift => (2.0 * o - 1.0).round(),
            };
            v.clamp(Self::MOVE_LOWER_BOUND, Self::MOVE_UPPER_BOUND) as i64
        };
        (axis(output[0]), axis(output[1]))
    }

    pub fn training_target(self, target: [f64; OUTPUT_SIZE]) -> [f64; OUTPUT_SIZE] {
        match self {
            MovementPolicy::Truncate => target,
            MovementPolicy::ScaleShift => target.map(|t| (t + 1.0) / 2.0),
        }
    }
}
