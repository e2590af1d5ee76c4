use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};
use log::{error, info};

use house_price_api::{load_model, routes, Predictor, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("🚀 Starting house price prediction API");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let model = match load_model(&config.model_path) {
        Ok(model) => model,
        Err(e) => {
            error!("❌ Could not load model {}: {:#}", config.model_path.display(), e);
            std::process::exit(1);
        }
    };
    let predictor = web::Data::new(Predictor::new(model));
    info!("✅ {} model ready", predictor.model_kind());

    let bind_address = config.bind_address();
    info!("🌐 Listening on http://{}", bind_address);
    info!("👷 Workers: {}", config.workers);
    info!("   GET  /         - welcome");
    info!("   POST /predict  - price prediction");
    info!("   GET  /docs     - interactive documentation");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(routes::cors())
            .app_data(predictor.clone())
            .configure(routes::configure)
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await
}
