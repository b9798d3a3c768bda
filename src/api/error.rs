use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            // Has Message
            Error::NotFound(msg)
            | Error::Conflict(msg)
            | Error::Unauthorized(msg)
            | Error::BadRequest(msg)
            | Error::Forbidden(msg) => res.json(ErrorBody { message: msg.clone() }),
            // No Message
            Error::InternalServer => {
                res.json(ErrorBody { message: "Internal Server Error".into() })
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // jwt errors
    #[error("JWT Error")]
    JwtError(#[from] jsonwebtoken::errors::Error),
    // argon2 errors
    #[error("Hash Error")]
    HashError(#[from] argon2::password_hash::Error),
    // sqlx errors
    #[error("Database Error : {0}")]
    DatabaseError(Cow<'static, str>),
    // serde errors
    #[error("JSON Serialization/Deserialization Error")]
    JsonError(#[from] serde_json::Error),
    // Custom Errors
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Database Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Database Conflict: {0:?}")]
    Conflict(Option<DbErrorMeta>),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

/// Constraint names declared in `migrations/`.
pub mod constraint {
    pub const USERS_USERNAME: &str = "uq_users_username";
    pub const USERS_USERNAME_LOWER: &str = "idx_users_username_lower";
    pub const USERS_EMAIL: &str = "uq_users_email";
    pub const FRIENDSHIPS_PAIR: &str = "uq_friendships_pair";
    pub const FRIENDSHIPS_ORDER: &str = "ck_friendships_order";
    pub const FRIENDSHIPS_REQUESTER: &str = "ck_friendships_requester";
    pub const DEBTS_PARTY: &str = "ck_debts_party";
    pub const DEBTS_DISTINCT_PARTIES: &str = "ck_debts_distinct_parties";
    pub const DEBTS_AMOUNT: &str = "ck_debts_amount";
}

fn conflict_message(meta: &Option<DbErrorMeta>) -> Cow<'static, str> {
    let Some(constraint) = meta.as_ref().and_then(|m| m.constraint.as_deref()) else {
        return "Duplicate value".into();
    };

    match constraint {
        constraint::FRIENDSHIPS_PAIR => {
            "Friend request already exists or you are already friends".into()
        }
        constraint::USERS_USERNAME | constraint::USERS_USERNAME_LOWER => {
            "Username already exists".into()
        }
        constraint::USERS_EMAIL => "Email already exists".into(),
        _ => "Duplicate value".into(),
    }
}

pub fn check_message(constraint: Option<&str>) -> Cow<'static, str> {
    match constraint {
        Some(constraint::DEBTS_PARTY) => {
            "A debt must be linked to at least one account".into()
        }
        Some(constraint::DEBTS_DISTINCT_PARTIES) => {
            "Lender and lendee must be different accounts".into()
        }
        Some(constraint::DEBTS_AMOUNT) => "Amount must be positive".into(),
        Some(constraint::FRIENDSHIPS_ORDER) | Some(constraint::FRIENDSHIPS_REQUESTER) => {
            "Invalid friendship participants".into()
        }
        _ => "Invalid value".into(),
    }
}

#[derive(Debug)]
pub struct DbErrorMeta {
    pub code: Option<String>,
    pub constraint: Option<String>,
    pub message: String,
}

#[cfg(test)]
impl DbErrorMeta {
    pub fn unique_violation(constraint: &str) -> Self {
        DbErrorMeta {
            code: Some("23505".to_string()),
            constraint: Some(constraint.to_string()),
            message: format!("duplicate key value violates unique constraint \"{constraint}\""),
        }
    }
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::Unauthorized(msg) => Error::Unauthorized(msg),
            SystemError::Forbidden(msg) => Error::Forbidden(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::Conflict(meta) => {
                if let Some(m) = &meta {
                    log::info!("Conflict [{}]: {}", m.code.as_deref().unwrap_or("-"), m.message);
                }
                Error::Conflict(conflict_message(&meta))
            }
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => {
                    log::info!("Unique violation on {:?}", db_err.constraint());
                    return SystemError::Conflict(Some(DbErrorMeta {
                        code: db_err.code().map(|s| s.to_string()),
                        constraint: db_err.constraint().map(|s| s.to_string()),
                        message: db_err.message().to_string(),
                    }));
                }
                Some("23514") => {
                    log::info!("Check violation on {:?}", db_err.constraint());
                    return SystemError::BadRequest(check_message(db_err.constraint()));
                }
                Some("23503") => {
                    return SystemError::bad_request("Referenced account does not exist");
                }
                _ => {
                    log::error!("Unhandled DB error: {:?}", db_err);
                    return SystemError::DatabaseError(db_err.message().to_string().into());
                }
            }
        }
        log::error!("{:?}", err);
        SystemError::InternalError(Box::new(err))
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden(msg.into())
    }
}
