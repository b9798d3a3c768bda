use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpMessage, HttpRequest,
};

use crate::{api::error, configs::TokenSettings, utils::Claims};

/// Resolves the caller from `Authorization: Bearer <token>`. The caller id is
/// only ever taken from the verified token, never from request payloads.
pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let auth = req.headers().get("Authorization").and_then(|h| h.to_str().ok());
    let token = match auth.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(t) => t,
        None => {
            return Err(error::Error::unauthorized("Unauthorized").into());
        }
    };

    let settings = req.app_data::<web::Data<TokenSettings>>().ok_or_else(|| {
        log::error!("TokenSettings missing from app data");
        error::Error::InternalServer
    })?;

    let claims = Claims::decode(token, settings.secret.as_bytes())
        .map_err(|_| error::Error::unauthorized("Token Invalid or Expired"))?;

    req.extensions_mut().insert(claims);

    next.call(req).await
}

pub fn get_extensions<T: Clone + 'static>(req: &HttpRequest) -> Result<T, error::Error> {
    req.extensions()
        .get::<T>()
        .cloned()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))
}

pub fn get_claims(req: &HttpRequest) -> Result<Claims, error::Error> {
    get_extensions::<Claims>(req)
}
