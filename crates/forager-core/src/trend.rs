use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Least-squares line through `(i, series[i])`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
    /// Fitted value at the first index.
    pub start_level: f64,
    /// Fitted value at the last index.
    pub end_level: f64,
    /// `end_level - start_level`. Negative means episodes got shorter.
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("regression needs at least two distinct points, got {points}")]
    DegenerateRegression { points: usize },
}

pub fn linear_regression(series: &[f64]) -> Result<Trend, TrendError> {
    let len = series.len();
    if len < 2 {
        return Err(TrendError::DegenerateRegression { points: len });
    }
    let n = len as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in series.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 || !denom.is_finite() {
        return Err(TrendError::DegenerateRegression { points: len });
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    let start_level = intercept;
    let end_level = intercept + slope * (n - 1.0);
    Ok(Trend {
        slope,
        intercept,
        start_level,
        end_level,
        improvement: end_level - start_level,
    })
}
