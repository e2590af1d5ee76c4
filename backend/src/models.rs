use serde::{Deserialize, Serialize};

use crate::error::PredictionError;

/// Number of features the model consumes, in the order produced by [`HousingFeatures::to_array`].
pub const FEATURE_COUNT: usize = 8;

/// Column names as they appear on the wire and in the model's training data.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// One block of the California housing dataset, as posted to `/predict`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HousingFeatures {
    /// Median income in the block, in tens of thousands of dollars.
    #[serde(rename = "MedInc")]
    pub median_income: f64,
    #[serde(rename = "HouseAge")]
    pub house_age: f64,
    #[serde(rename = "AveRooms")]
    pub average_rooms: f64,
    #[serde(rename = "AveBedrms")]
    pub average_bedrooms: f64,
    #[serde(rename = "Population")]
    pub population: f64,
    #[serde(rename = "AveOccup")]
    pub average_occupancy: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl HousingFeatures {
    /// Range check applied before the model is queried.
    ///
    /// Counts must be strictly positive; age and bedroom averages may be zero.
    /// Coordinates are not checked.
    pub fn validate(&self) -> Result<(), PredictionError> {
        let strictly_positive = [
            self.median_income,
            self.average_rooms,
            self.population,
            self.average_occupancy,
        ];
        let non_negative = [self.house_age, self.average_bedrooms];

        if strictly_positive.iter().any(|v| *v <= 0.0) || non_negative.iter().any(|v| *v < 0.0) {
            return Err(PredictionError::InvalidInput);
        }

        Ok(())
    }

    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.median_income,
            self.house_age,
            self.average_rooms,
            self.average_bedrooms,
            self.population,
            self.average_occupancy,
            self.latitude,
            self.longitude,
        ]
    }
}

/// Body of a `/predict` response. Serialized without a tag, so clients see
/// either `{"predicted_price": ..}` or `{"error": ..}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PredictionResponse {
    Price { predicted_price: f64 },
    Error { error: String },
}

impl PredictionResponse {
    pub fn price(predicted_price: f64) -> Self {
        PredictionResponse::Price { predicted_price }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PredictionResponse::Error {
            error: message.into(),
        }
    }
}

impl From<Result<f64, PredictionError>> for PredictionResponse {
    fn from(result: Result<f64, PredictionError>) -> Self {
        match result {
            Ok(price) => PredictionResponse::price(price),
            Err(e) => PredictionResponse::error(e.client_message()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WelcomeMessage {
    pub message: String,
}

/// Body returned when the request payload fails to deserialize.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SchemaError {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HousingFeatures {
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
    fn deserializes_wire_names() {
        let json = r#"{
            "MedInc": 8.3252, "HouseAge": 41, "AveRooms": 6.984127, "AveBedrms": 1.02381,
            "Population": 322, "AveOccup": 2.555556, "Latitude": 37.88, "Longitude": -122.23
        }"#;
        let features: HousingFeatures = serde_json::from_str(json).unwrap();
        assert_eq!(features, sample());
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"MedInc": 1.0, "HouseAge": 1.0}"#;
        assert!(serde_json::from_str::<HousingFeatures>(json).is_err());
    }

    #[test]
    fn array_follows_column_order() {
        let features = sample();
        assert_eq!(
            features.to_array(),
            [8.3252, 41.0, 6.984127, 1.02381, 322.0, 2.555556, 37.88, -122.23]
        );
    }

    #[test]
    fn accepts_valid_block() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn zero_age_and_bedrooms_are_allowed() {
        let mut features = sample();
        features.house_age = 0.0;
        features.average_bedrooms = 0.0;
        assert!(features.validate().is_ok());
    }

    #[test]
    fn non_positive_counts_are_rejected() {
        let cases: [fn(&mut HousingFeatures); 4] = [
            |f| f.median_income = 0.0,
            |f| f.average_rooms = -1.0,
            |f| f.population = 0.0,
            |f| f.average_occupancy = -0.1,
        ];
        for mutate in cases {
            let mut features = sample();
            mutate(&mut features);
            assert!(matches!(features.validate(), Err(PredictionError::InvalidInput)));
        }
    }

    #[test]
    fn zero_is_the_boundary_for_counts() {
        let cases: [fn(&mut HousingFeatures); 3] = [
            |f| f.average_rooms = 0.0,
            |f| f.average_occupancy = 0.0,
            |f| f.median_income = -0.0,
        ];
        for mutate in cases {
            let mut features = sample();
            mutate(&mut features);
            assert!(matches!(features.validate(), Err(PredictionError::InvalidInput)));
        }
    }

    #[test]
    fn negative_bedrooms_are_rejected() {
        let mut features = sample();
        features.average_bedrooms = -0.01;
        assert!(matches!(features.validate(), Err(PredictionError::InvalidInput)));
    }

    #[test]
    fn negative_age_is_rejected() {
        let mut features = sample();
        features.house_age = -1.0;
        assert!(matches!(features.validate(), Err(PredictionError::InvalidInput)));
    }

    #[test]
    fn coordinates_are_not_range_checked() {
        let mut features = sample();
        features.latitude = -500.0;
        features.longitude = 500.0;
        assert!(features.validate().is_ok());
    }

    #[test]
    fn response_shapes() {
        let price = serde_json::to_value(PredictionResponse::price(452600.0)).unwrap();
        assert_eq!(price, serde_json::json!({"predicted_price": 452600.0}));

        let error = serde_json::to_value(PredictionResponse::error("nope")).unwrap();
        assert_eq!(error, serde_json::json!({"error": "nope"}));
    }
}
