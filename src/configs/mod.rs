use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{api::error, constants::Env};

pub async fn connect_database(env: &Env) -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(env.database_max_connections)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(&env.database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), error::SystemError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| error::SystemError::InternalError(Box::new(e)))?;
    log::info!("Database migrations applied");
    Ok(())
}

/// Signing material for access tokens, shared with handlers through app data.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_token_expiration: u64,
}

impl TokenSettings {
    pub fn new(secret: impl Into<String>, access_token_expiration: u64) -> Self {
        Self { secret: secret.into(), access_token_expiration }
    }

    pub fn from_env(env: &Env) -> Self {
        Self::new(env.jwt_secret.clone(), env.access_token_expiration)
    }
}
