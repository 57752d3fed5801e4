//! Feed-forward network evaluator.
//!
//! Weights live in a JSON file holding a list of dense layers. Each layer maps
//! its input vector through `activation(weights * x + bias)`; the final layer
//! must produce a single value, which is multiplied by `output_scale` to get
//! pawn units.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chess_rules::ChessPosition;
use game_core::{Evaluator, GameState, Outcome, Side};

use crate::features::{encode_board, NUM_INPUTS};
use crate::heuristic::WIN_SCORE;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("failed to read weights: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed weights file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("weights have the wrong shape: {0}")]
    Shape(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Tanh,
    Linear,
}

impl Activation {
    fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Relu => x.max(0.0),
            Activation::Tanh => x.tanh(),
            Activation::Linear => x,
        }
    }
}

/// One dense layer. `weights[i]` is the row of input weights for output `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerWeights {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    pub activation: Activation,
}

impl LayerWeights {
    fn inputs(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn outputs(&self) -> usize {
        self.weights.len()
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                let sum: f32 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                self.activation.apply(sum + b)
            })
            .collect()
    }
}

fn default_output_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkWeights {
    pub layers: Vec<LayerWeights>,
    #[serde(default = "default_output_scale")]
    pub output_scale: f64,
}

/// Evaluates positions with a small dense network over the 774-input board
/// encoding. Finished games score `±WIN_SCORE` or zero without running the
/// network.
#[derive(Debug, Clone)]
pub struct LearnedEvaluator {
    network: NetworkWeights,
}

impl LearnedEvaluator {
    /// Checks that the layers chain from `NUM_INPUTS` down to one output.
    pub fn from_weights(network: NetworkWeights) -> Result<Self, EvalError> {
        if network.layers.is_empty() {
            return Err(EvalError::Shape("network has no layers".into()));
        }

        let mut width = NUM_INPUTS;
        for (i, layer) in network.layers.iter().enumerate() {
            if layer.outputs() == 0 {
                return Err(EvalError::Shape(format!("layer {i} has no outputs")));
            }
            if let Some(row) = layer.weights.iter().position(|r| r.len() != width) {
                return Err(EvalError::Shape(format!(
                    "layer {i} row {row} has {} inputs, expected {width}",
                    layer.weights[row].len()
                )));
            }
            if layer.bias.len() != layer.outputs() {
                return Err(EvalError::Shape(format!(
                    "layer {i} has {} biases for {} outputs",
                    layer.bias.len(),
                    layer.outputs()
                )));
            }
            width = layer.outputs();
        }

        if width != 1 {
            return Err(EvalError::Shape(format!(
                "final layer has {width} outputs, expected 1"
            )));
        }

        Ok(Self { network })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EvalError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let network: NetworkWeights = serde_json::from_str(&text)?;
        let evaluator = Self::from_weights(network)?;

        tracing::info!(
            path = %path.display(),
            layers = evaluator.network.layers.len(),
            "loaded evaluation network"
        );
        Ok(evaluator)
    }

    pub fn network(&self) -> &NetworkWeights {
        &self.network
    }

    /// Raw network output for an encoded board, before scaling.
    pub fn forward(&self, inputs: &[f32]) -> f32 {
        debug_assert_eq!(inputs.len(), self.network.layers[0].inputs());
        let mut activations = inputs.to_vec();
        for layer in &self.network.layers {
            activations = layer.forward(&activations);
        }
        activations.first().copied().unwrap_or(0.0)
    }
}

impl Evaluator<ChessPosition> for LearnedEvaluator {
    fn score(&self, pos: &ChessPosition) -> f64 {
        match pos.outcome() {
            Some(Outcome::Win(Side::White)) => WIN_SCORE,
            Some(Outcome::Win(Side::Black)) => -WIN_SCORE,
            Some(Outcome::Draw) => 0.0,
            None => {
                let output = self.forward(&encode_board(pos));
                f64::from(output) * self.network.output_scale
            }
        }
    }
}

#[cfg(test)]
#[path = "learned_tests.rs"]
mod learned_tests;
