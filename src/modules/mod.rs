use actix_web::{middleware::from_fn, web};

use crate::middlewares::authentication;

pub mod user {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}

pub mod friendship {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}

pub mod debt {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}

/// Mounts the whole API under `/api`. Everything except `/api/auth` needs a
/// bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").configure(user::route::public_api_configure).service(
            web::scope("")
                .wrap(from_fn(authentication))
                .configure(user::route::configure)
                .configure(friendship::route::configure)
                .configure(debt::route::configure),
        ),
    );
}
