//! Online-trained feedforward controller: 2 inputs → H hidden (sigmoid) → 2 outputs (sigmoid).
//!
//! Inputs:  food position (2)
//! Outputs: movement x, movement y, each in (0, 1)

use crate::config::SimConfig;
use crate::matrix::Matrix;

pub const INPUT_SIZE: usize = 2;
pub const OUTPUT_SIZE: usize = 2;

/// Pre-activations are clamped to this magnitude so the sigmoid never rounds to 0 or 1.
pub const SIGMOID_INPUT_LIMIT: f64 = 30.0;

pub fn sigmoid(x: f64) -> f64 {
    let x = x.clamp(-SIGMOID_INPUT_LIMIT, SIGMOID_INPUT_LIMIT);
    1.0 / (1.0 + (-x).exp())
}

/// Normal probability density at `x`.
pub fn gaussian_density(x: f64, mean: f64, std_dev: f64) -> f64 {
    let exponent = -((x - mean).powi(2) / (2.0 * std_dev.powi(2)));
    exponent.exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}

pub fn squared_error(output: &[f64; OUTPUT_SIZE], target: &[f64; OUTPUT_SIZE]) -> f64 {
    output
        .iter()
        .zip(target)
        .map(|(o, t)| (o - t).powi(2))
        .sum()
}

/// Layer activations from one forward pass. Consumed by the matching `update`.
#[derive(Clone, Debug, PartialEq)]
pub struct Activations {
    pub hidden: Vec<f64>,
    pub output: [f64; OUTPUT_SIZE],
}

#[derive(Clone, Debug)]
pub struct Controller {
    w_ih: Matrix, // INPUT_SIZE × hidden
    w_ho: Matrix, // hidden × OUTPUT_SIZE
    // Fixed offsets added to every pre-activation. Not trained.
    b_h: Vec<f64>,
    b_o: [f64; OUTPUT_SIZE],
    learning_rate: f64,
}

impl Controller {
    pub fn new(
        hidden_count: usize,
        learning_rate: f64,
        initial_weight: f64,
        bias_deviation: f64,
    ) -> Self {
        let bias = gaussian_density(bias_deviation, 0.0, 1.0);
        Self {
            w_ih: Matrix::filled(INPUT_SIZE, hidden_count, initial_weight),
            w_ho: Matrix::filled(hidden_count, OUTPUT_SIZE, initial_weight),
            b_h: vec![bias; hidden_count],
            b_o: [bias; OUTPUT_SIZE],
            learning_rate,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.hidden_count,
            config.learning_rate,
            config.initial_weight,
            config.bias_deviation,
        )
    }

    pub fn hidden_count(&self) -> usize {
        self.b_h.len()
    }

    pub fn weights_ih(&self) -> &Matrix {
        &self.w_ih
    }

    pub fn weights_ho(&self) -> &Matrix {
        &self.w_ho
    }

    pub fn bias_hidden(&self) -> &[f64] {
        &self.b_h
    }

    pub fn bias_output(&self) -> &[f64; OUTPUT_SIZE] {
        &self.b_o
    }

    /// Forward pass. Pure: reads weights, returns both layers' activations.
    pub fn forward(&self, input: &[f64; INPUT_SIZE]) -> Activations {
        // Hidden layer
        let mut hidden = self.w_ih.vec_mul(input);
        for (h, b) in hidden.iter_mut().zip(&self.b_h) {
            *h = sigmoid(*h + b);
        }

        // Output layer
        let pre_output = self.w_ho.vec_mul(&hidden);
        let mut output = self.b_o;
        for (o, p) in output.iter_mut().zip(&pre_output) {
            *o = sigmoid(*o + p);
        }

        Activations { hidden, output }
    }

    /// One squared-error gradient step on both weight matrices.
    ///
    /// `act` must come from `forward(input)` on the current weights.
    pub fn update(
        &mut self,
        input: &[f64; INPUT_SIZE],
        act: &Activations,
        target: &[f64; OUTPUT_SIZE],
    ) {
        assert_eq!(
            act.hidden.len(),
            self.hidden_count(),
            "dimension mismatch: hidden activations of length {} for {} hidden units",
            act.hidden.len(),
            self.hidden_count()
        );

        let mut output_delta = [0.0; OUTPUT_SIZE];
        for ((d, &o), &t) in output_delta.iter_mut().zip(&act.output).zip(target) {
            // error ⊙ sigmoid'
            *d = (o - t) * o * (1.0 - o);
        }

        // Back through the output weights before they change.
        let hidden_error = self.w_ho.mul_vec(&output_delta);
        let hidden_delta: Vec<f64> = hidden_error
            .iter()
            .zip(&act.hidden)
            .map(|(e, &h)| e * h * (1.0 - h))
            .collect();

        self.w_ho
            .sub_scaled_outer(self.learning_rate, &act.hidden, &output_delta);
        self.w_ih
            .sub_scaled_outer(self.learning_rate, input, &hidden_delta);
    }
}
