use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use chrono::Duration;
use std::sync::Arc;

use taskdesk::auth::{AuthMiddleware, TokenService};
use taskdesk::config::Config;
use taskdesk::routes::{self, health};
use taskdesk::{repository, seed, AppServices};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(to_io)?;
    let (users, tasks) = repository::connect(&config).await.map_err(to_io)?;

    if config.seed_data {
        seed::seed_if_empty(users.as_ref(), tasks.as_ref())
            .await
            .map_err(to_io)?;
    }

    let tokens = Arc::new(TokenService::new(
        &config.jwt_secret,
        Duration::hours(config.jwt_expiration_hours),
    ));
    let services = AppServices::new(users, tasks, Arc::clone(&tokens));

    log::info!("Starting taskdesk server at {}", config.server_url());
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(Arc::clone(&tokens)))
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

fn to_io(err: taskdesk::AppError) -> std::io::Error {
    log::error!("{}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
