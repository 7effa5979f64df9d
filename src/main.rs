use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;

use todo_api::{auth::TokenVerifier, config::Config, routes, store::TodoStore};

fn build_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .supports_credentials()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    )
    .init();

    // Connections are opened on first use and returned to the pool after each statement.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.database_acquire_timeout)
        .connect_lazy(&config.database_url)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        log::info!("database migrations applied");
    }

    let store = web::Data::new(TodoStore::new(pool.clone()));
    let verifier = web::Data::new(TokenVerifier::new(&config.jwt_secret));
    let cors_origins = config.cors_origins.clone();

    log::info!(
        "starting todo API ({}) at {}",
        config.environment,
        config.server_url()
    );
    match &config.supabase_url {
        Some(url) => log::info!("accepting tokens issued by {}", url),
        None => log::warn!("SUPABASE_URL not set, token issuer is unknown"),
    }

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(verifier.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await?;

    log::info!("server stopped, closing database pool");
    pool.close().await;
    Ok(())
}
