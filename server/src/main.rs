use actix_files::{Files, NamedFile};
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod crop_model;
mod error;
mod weather;

use config::Config;

struct ClientDir(PathBuf);

async fn index(dir: web::Data<ClientDir>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open(dir.0.join("index.html"))?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    let config = Config::parse();

    let provider = weather::OpenMeteo::new(config.weather_url.clone(), config.weather_timeout())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let data = web::Data::new(api::AppData {
        weather: Arc::new(provider),
    });
    let client_dir = web::Data::new(ClientDir(config.client_dir.clone()));

    tracing::info!(
        "serving {} on {} (weather upstream {})",
        config.client_dir.display(),
        config.bind,
        config.weather_url
    );

    HttpServer::new(move || {
        let dir = &client_dir.0;
        App::new()
            .app_data(data.clone())
            .app_data(client_dir.clone())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
            .service(Files::new("/public", dir.join("public")))
            .service(Files::new("/pkg", dir.join("pkg")))
            .default_service(web::route().to(index))
    })
    .bind(&config.bind)?
    .run()
    .await
}
