use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, info, warn};

use crate::config::{ALLOWED_ORIGINS, JSON_PAYLOAD_LIMIT};
use crate::docs;
use crate::error::PredictionError;
use crate::models::{HousingFeatures, PredictionResponse, SchemaError, WelcomeMessage};
use crate::predictor::Predictor;

pub const WELCOME_MESSAGE: &str = "Welcome! Go to /docs to test the API.";

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(WelcomeMessage {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// Every outcome is reported with 200; failures travel in the `error` field.
#[post("/predict")]
pub async fn predict(
    predictor: web::Data<Predictor>,
    features: web::Json<HousingFeatures>,
) -> impl Responder {
    let features = features.into_inner();
    let predictor = predictor.into_inner();

    let result = match web::block(move || predictor.predict_price(&features)).await {
        Ok(result) => result,
        Err(e) => Err(PredictionError::Worker(e.to_string())),
    };

    match &result {
        Ok(price) => info!("Prediction served: {:.2}", price),
        Err(e) if e.is_validation() => warn!("Prediction rejected: {}", e),
        Err(e) => error!("Prediction failed: {}", e),
    }

    HttpResponse::Ok().json(PredictionResponse::from(result))
}

/// JSON extractor settings: small bodies, and 422 with a `detail` message when
/// the payload does not match the request schema.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err, _req| {
            warn!("Malformed request payload: {}", err);
            let body = SchemaError {
                detail: err.to_string(),
            };
            InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(body))
                .into()
        })
}

pub fn cors() -> Cors {
    ALLOWED_ORIGINS
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

/// Register every route. The caller provides the `Predictor` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index)
        .service(predict)
        .service(docs::openapi_json)
        .service(docs::swagger_ui);
}
