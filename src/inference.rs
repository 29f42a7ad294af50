use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tract_onnx::prelude::*;

use crate::models::{IrisFeatures, FEATURE_FIELDS};

/// Class labels in the encoding order of the trained artifact.
pub const CLASS_LABELS: [&str; 3] = ["setosa", "versicolor", "virginica"];

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {path}")]
    ArtifactNotFound { path: String },
    #[error("model artifact could not be loaded: {reason}")]
    ArtifactCorrupt { reason: String },
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Read-only handle to a loaded classifier. Object-safe so request handlers
/// can run against a stub in tests.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &IrisFeatures) -> Result<String, ModelError>;

    fn info(&self) -> ModelInfo;
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ModelInfo {
    pub input_shape: Vec<usize>,
    pub features: Vec<String>,
    pub labels: Vec<String>,
}

impl ModelInfo {
    pub fn iris() -> Self {
        ModelInfo {
            input_shape: vec![1, 4],
            features: FEATURE_FIELDS.iter().map(|f| f.to_string()).collect(),
            labels: CLASS_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

type RunnablePlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

#[derive(Debug)]
pub struct OnnxClassifier {
    plan: RunnablePlan,
}

impl OnnxClassifier {
    /// Loads the ONNX artifact and optimizes it into a runnable plan. Called
    /// once at startup, before the server binds.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::ArtifactNotFound {
                path: path.display().to_string(),
            });
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| {
                m.with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 4)))
            })
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| ModelError::ArtifactCorrupt {
                reason: e.to_string(),
            })?;

        Ok(OnnxClassifier { plan })
    }

    /// sklearn exports emit either an i64 class index or a score vector,
    /// depending on the converter. Both decode to the same label table.
    fn decode_label(output: &Tensor) -> Result<String, ModelError> {
        if let Ok(indices) = output.to_array_view::<i64>() {
            let index = *indices
                .iter()
                .next()
                .ok_or_else(|| ModelError::Inference("empty model output".to_string()))?;
            return Self::label_for(index as usize);
        }

        let scores = output
            .to_array_view::<f32>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let mut best = None;
        let mut best_score = f32::NEG_INFINITY;
        for (i, &score) in scores.iter().enumerate() {
            if score > best_score {
                best = Some(i);
                best_score = score;
            }
        }

        match best {
            Some(index) => Self::label_for(index),
            None => Err(ModelError::Inference("empty model output".to_string())),
        }
    }

    fn label_for(index: usize) -> Result<String, ModelError> {
        CLASS_LABELS
            .get(index)
            .map(|label| label.to_string())
            .ok_or_else(|| ModelError::Inference(format!("class index {} out of range", index)))
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &IrisFeatures) -> Result<String, ModelError> {
        let input = Tensor::from_shape(&[1, 4], &features.to_array())
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        Self::decode_label(&outputs[0])
    }

    fn info(&self) -> ModelInfo {
        ModelInfo::iris()
    }
}
