use async_trait::async_trait;
use serde::Serialize;

use crate::{domain::request::PredictionRequest, errors::AppError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub prediction: i64,
    pub prediction_probability: f64,
}

impl PredictionResult {
    /// Placeholder answer returned while no model is wired in.
    pub const fn stub() -> Self {
        Self {
            prediction: 1,
            prediction_probability: 0.5,
        }
    }
}

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, AppError>;
}

#[derive(Debug, Default)]
pub struct StubPredictor;

impl StubPredictor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Predictor for StubPredictor {
    async fn predict(&self, _request: &PredictionRequest) -> Result<PredictionResult, AppError> {
        Ok(PredictionResult::stub())
    }
}
