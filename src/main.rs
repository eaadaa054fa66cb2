use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use authgate_server::{configure, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn cors(config: &Settings) -> Cors {
    if !config.cors.enabled {
        return Cors::default();
    }

    let cors = if config.cors.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
    };

    cors.max_age(config.cors.max_age as usize)
}

#[actix_web::main]
async fn main() -> authgate_server::Result<()> {
    dotenv().ok();

    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    let state = AppState::new(config.clone()).await?;
    let data = web::Data::new(state.clone());

    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    info!("Server is running on {}:{}", config.server.host, config.server.port);

    let cors_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&cors_config))
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(configure)
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    state.shutdown().await?;
    info!("Server stopped");

    Ok(())
}
