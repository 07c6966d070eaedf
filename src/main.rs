use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use taskpulse::auth::{PasswordHasher, TokenIssuer};
use taskpulse::config::Config;
use taskpulse::routes;
use taskpulse::service::TaskService;
use taskpulse::store::{MemoryStore, PgStore, Store};

async fn build_store(config: &Config) -> std::io::Result<Arc<dyn Store>> {
    let Some(database_url) = config.database_url.as_deref() else {
        log::warn!("DATABASE_URL is not set; using the in-memory store (data is lost on restart)");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let store = PgStore::connect_lazy(database_url, config.database_max_connections)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    // An unreachable database is not fatal; requests that need it fail with 500.
    match store.migrate().await {
        Ok(()) => log::info!("Database connection established, schema up to date"),
        Err(e) => log::error!("Could not prepare the database: {}", e),
    }
    Ok(Arc::new(store))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let store = build_store(&config).await?;
    log::info!("Using the {} store", store.backend());

    let service = web::Data::new(TaskService::new(
        store,
        TokenIssuer::new(&config.jwt_secret),
        PasswordHasher::new(config.bcrypt_cost),
    ));

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
