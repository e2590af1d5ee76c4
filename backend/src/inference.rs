use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use log::info;
use serde::Deserialize;
use tract_onnx::prelude::*;

use crate::models::FEATURE_COUNT;

/// A pre-trained regression model over the eight housing features.
///
/// Implementations are immutable after load and queried concurrently.
pub trait Regressor: Send + Sync {
    /// Raw model output, in units of 100,000 dollars.
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> anyhow::Result<f64>;

    /// Short backend name used in logs.
    fn kind(&self) -> &'static str;
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX graph (for instance a scikit-learn pipeline exported with skl2onnx) run through tract.
pub struct OnnxRegressor {
    model: OnnxPlan,
}

impl OnnxRegressor {
    pub fn load<P: AsRef<Path>>(model_path: P) -> TractResult<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_COUNT)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model })
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> anyhow::Result<f64> {
        let input: Vec<f32> = features.iter().map(|v| *v as f32).collect();
        let input_tensor = Tensor::from_shape(&[1, FEATURE_COUNT], input.as_slice())?;
        let outputs = self.model.run(tvec!(input_tensor.into()))?;

        first_value(&outputs)
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}

/// First element of the first output tensor.
fn first_value(outputs: &[TValue]) -> anyhow::Result<f64> {
    let first = outputs
        .first()
        .ok_or_else(|| anyhow!("model produced no outputs"))?;
    // Regressors exported in double precision emit f64.
    let output = first.cast_to::<f32>()?;
    let value = output
        .as_slice::<f32>()?
        .first()
        .copied()
        .ok_or_else(|| anyhow!("model output tensor is empty"))?;

    Ok(value as f64)
}

/// Ordinary least squares model stored as plain JSON:
/// `{"coefficients": [..8 numbers..], "intercept": number}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: [f64; FEATURE_COUNT],
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn load<P: AsRef<Path>>(model_path: P) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(model_path.as_ref())?;
        let model = serde_json::from_str::<Self>(&raw).context("invalid linear model file")?;
        Ok(model)
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> anyhow::Result<f64> {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum();
        Ok(self.intercept + dot)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

impl fmt::Debug for dyn Regressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Regressor({})", self.kind())
    }
}

/// Load a model artifact, picking the backend from the file extension.
pub fn load_model<P: AsRef<Path>>(model_path: P) -> anyhow::Result<Arc<dyn Regressor>> {
    let path = model_path.as_ref();
    if !path.is_file() {
        bail!("model file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let model: Arc<dyn Regressor> = match extension.as_deref() {
        Some("onnx") => Arc::new(
            OnnxRegressor::load(path)
                .with_context(|| format!("failed to load ONNX model {}", path.display()))?,
        ),
        Some("json") => Arc::new(
            LinearRegressor::load(path)
                .with_context(|| format!("failed to load linear model {}", path.display()))?,
        ),
        _ => bail!(
            "unsupported model format for {} (expected .onnx or .json)",
            path.display()
        ),
    };

    info!("Loaded {} model from {}", model.kind(), path.display());
    Ok(model)
}
