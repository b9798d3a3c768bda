use actix_cors::Cors;
use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, run_migrations, TokenSettings},
    modules::{
        debt::{repository_pg::DebtRepositoryPg, service::DebtService},
        friendship::{repository_pg::FriendshipRepositoryPg, service::FriendshipService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool = connect_database(&ENV)
        .await
        .map_err(|_| std::io::Error::other("Database connection error"))?;

    run_migrations(&db_pool).await.map_err(|_| std::io::Error::other("Database migration error"))?;

    let tokens = TokenSettings::from_env(&ENV);

    let user_repo = UserRepositoryPg::new(db_pool.clone());
    let friendship_repo = FriendshipRepositoryPg::new(db_pool.clone());
    let debt_repo = DebtRepositoryPg::new(db_pool.clone());

    let user_service =
        UserService::with_dependencies(Arc::new(user_repo.clone()), tokens.clone());
    let friendship_service =
        FriendshipService::with_dependencies(Arc::new(friendship_repo), Arc::new(user_repo.clone()));
    let debt_service = DebtService::with_dependencies(Arc::new(debt_repo), Arc::new(user_repo));

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friendship_service.clone()))
            .app_data(web::Data::new(debt_service.clone()))
            .service(health_check)
            .configure(modules::configure)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
