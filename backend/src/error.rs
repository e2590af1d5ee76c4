use thiserror::Error;

/// Shown to clients for every failure that is not a validation error.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Failure of a single prediction request.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("All numeric fields must be positive.")]
    InvalidInput,

    #[error("Prediction resulted in negative price—check inputs.")]
    NegativePrice,

    #[error("model inference failed: {0:#}")]
    Inference(#[from] anyhow::Error),

    #[error("inference worker failed: {0}")]
    Worker(String),
}

impl PredictionError {
    /// Message placed in the `error` field of the response body.
    ///
    /// Internal failures never leak their cause.
    pub fn client_message(&self) -> String {
        match self {
            PredictionError::InvalidInput | PredictionError::NegativePrice => self.to_string(),
            PredictionError::Inference(_) | PredictionError::Worker(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PredictionError::InvalidInput | PredictionError::NegativePrice
        )
    }
}
