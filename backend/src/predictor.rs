use std::sync::Arc;

use anyhow::anyhow;

use crate::error::PredictionError;
use crate::inference::Regressor;
use crate::models::HousingFeatures;

/// The model's target is expressed in hundreds of thousands of dollars.
pub const PRICE_SCALE: f64 = 100_000.0;

/// Read-only handle to the loaded model, shared by every request.
#[derive(Clone, Debug)]
pub struct Predictor {
    model: Arc<dyn Regressor>,
}

impl Predictor {
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self { model }
    }

    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }

    /// Validate, run the model and convert its output to a price in dollars.
    pub fn predict_price(&self, features: &HousingFeatures) -> Result<f64, PredictionError> {
        features.validate()?;

        let raw = self.model.predict(&features.to_array())?;
        if !raw.is_finite() {
            return Err(PredictionError::Inference(anyhow!(
                "model returned a non-finite value: {raw}"
            )));
        }
        if raw < 0.0 {
            return Err(PredictionError::NegativePrice);
        }

        Ok(round_cents(raw * PRICE_SCALE))
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FEATURE_COUNT;

    struct Fixed(f64);

    impl Regressor for Fixed {
        fn predict(&self, _: &[f64; FEATURE_COUNT]) -> anyhow::Result<f64> {
            Ok(self.0)
        }

        fn kind(&self) -> &'static str {
            "fixed"
        }
    }

    struct Broken;

    impl Regressor for Broken {
        fn predict(&self, _: &[f64; FEATURE_COUNT]) -> anyhow::Result<f64> {
            Err(anyhow!("input dimension mismatch"))
        }

        fn kind(&self) -> &'static str {
            "broken"
        }
    }

    fn predictor(model: impl Regressor + 'static) -> Predictor {
        Predictor::new(Arc::new(model))
    }

    fn block() -> HousingFeatures {
        HousingFeatures {
            median_income: 8.3252,
            house_age: 41.0,
            average_rooms: 6.984127,
            average_bedrooms: 1.02381,
            population: 322.0,
            average_occupancy: 2.555556,
            latitude: 37.88,
            longitude: -122.23,
        }
    }

    #[test]
    fn scales_and_rounds_to_cents() {
        let price = predictor(Fixed(4.526)).predict_price(&block()).unwrap();
        assert!((price - 452_600.0).abs() < 1e-6);

        let price = predictor(Fixed(1.23456789)).predict_price(&block()).unwrap();
        assert!((price - 123_456.79).abs() < 1e-6);
    }

    #[test]
    fn zero_prediction_is_a_valid_price() {
        let price = predictor(Fixed(0.0)).predict_price(&block()).unwrap();
        assert_eq!(price, 0.0);
    }

    #[test]
    fn negative_prediction_is_rejected() {
        let err = predictor(Fixed(-0.5)).predict_price(&block()).unwrap_err();
        assert!(matches!(err, PredictionError::NegativePrice));
    }

    #[test]
    fn validation_runs_before_the_model() {
        let mut features = block();
        features.median_income = 0.0;
        let err = predictor(Broken).predict_price(&features).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidInput));
    }

    #[test]
    fn model_failure_is_internal() {
        let err = predictor(Broken).predict_price(&block()).unwrap_err();
        assert!(matches!(err, PredictionError::Inference(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn non_finite_output_is_internal() {
        for raw in [f64::NAN, f64::INFINITY] {
            let err = predictor(Fixed(raw)).predict_price(&block()).unwrap_err();
            assert!(matches!(err, PredictionError::Inference(_)));
        }
    }
}
