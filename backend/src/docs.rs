//! Interactive API documentation: an OpenAPI document and a Swagger UI page
//! that renders it.

use actix_web::{get, HttpResponse, Responder};
use serde_json::{json, Map, Value};

use crate::models::FEATURE_NAMES;

pub const API_TITLE: &str = "House Price Predictor";

pub fn openapi_document() -> Value {
    let properties: Map<String, Value> = FEATURE_NAMES
        .iter()
        .map(|name| (name.to_string(), json!({ "type": "number", "title": name })))
        .collect();

    json!({
        "openapi": "3.1.0",
        "info": { "title": API_TITLE, "version": env!("CARGO_PKG_VERSION") },
        "paths": {
            "/": {
                "get": {
                    "summary": "Home",
                    "responses": {
                        "200": {
                            "description": "Welcome message",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/WelcomeMessage" } } }
                        }
                    }
                }
            },
            "/predict": {
                "post": {
                    "summary": "Predict Price",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/HouseData" } } }
                    },
                    "responses": {
                        "200": {
                            "description": "Predicted price in dollars, or an error message",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/PredictionResponse" } } }
                        },
                        "422": {
                            "description": "Validation Error",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/SchemaError" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "HouseData": {
                    "type": "object",
                    "title": "HouseData",
                    "properties": properties,
                    "required": FEATURE_NAMES,
                },
                "PredictionResponse": {
                    "oneOf": [
                        {
                            "type": "object",
                            "properties": { "predicted_price": { "type": "number" } },
                            "required": ["predicted_price"]
                        },
                        {
                            "type": "object",
                            "properties": { "error": { "type": "string" } },
                            "required": ["error"]
                        }
                    ]
                },
                "WelcomeMessage": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } },
                    "required": ["message"]
                },
                "SchemaError": {
                    "type": "object",
                    "properties": { "detail": { "type": "string" } },
                    "required": ["detail"]
                }
            }
        }
    })
}

fn swagger_ui_html() -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title} - Swagger UI</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    SwaggerUIBundle({{ url: "/openapi.json", dom_id: "#swagger-ui" }});
  </script>
</body>
</html>
"##,
        title = API_TITLE
    )
}

#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(openapi_document())
}

#[get("/docs")]
pub async fn swagger_ui() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(swagger_ui_html())
}
