//! House price prediction service.
//!
//! A single regression model is loaded at startup and wrapped in a [`Predictor`],
//! which the HTTP layer in [`routes`] shares across workers as read-only app data.

pub mod config;
pub mod docs;
pub mod error;
pub mod inference;
pub mod models;
pub mod predictor;
pub mod routes;

pub use config::ServerConfig;
pub use error::PredictionError;
pub use inference::{load_model, LinearRegressor, OnnxRegressor, Regressor};
pub use models::{HousingFeatures, PredictionResponse};
pub use predictor::Predictor;
