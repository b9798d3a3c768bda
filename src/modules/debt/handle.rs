use actix_web::{delete, get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::debt::{
        model::{CreateDebtModel, DebtQuery, UpdateDebtModel},
        schema::DebtEntity,
        service::DebtService,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

#[get("")]
pub async fn list_debts(
    debt_service: web::Data<DebtService>,
    query: ValidatedQuery<DebtQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<DebtEntity>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let debts = debt_service.list(user_id, query.0.filter).await?;

    Ok(success::Success::ok(Some(debts)).message("Debts retrieved successfully"))
}

#[get("/{debt_id}")]
pub async fn get_debt(
    debt_service: web::Data<DebtService>,
    debt_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<DebtEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let debt = debt_service.get_by_id(user_id, debt_id.into_inner()).await?;

    Ok(success::Success::ok(Some(debt)).message("Debt retrieved successfully"))
}

#[post("")]
pub async fn create_debt(
    debt_service: web::Data<DebtService>,
    body: ValidatedJson<CreateDebtModel>,
    req: HttpRequest,
) -> Result<success::Success<DebtEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let debt = debt_service.create(user_id, body.0).await?;

    Ok(success::Success::created(Some(debt)).message("Debt created successfully"))
}

#[patch("/{debt_id}")]
pub async fn update_debt(
    debt_service: web::Data<DebtService>,
    debt_id: web::Path<Uuid>,
    body: ValidatedJson<UpdateDebtModel>,
    req: HttpRequest,
) -> Result<success::Success<DebtEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let debt = debt_service.update(user_id, debt_id.into_inner(), body.0).await?;

    Ok(success::Success::ok(Some(debt)).message("Debt updated successfully"))
}

#[delete("/{debt_id}")]
pub async fn delete_debt(
    debt_service: web::Data<DebtService>,
    debt_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    debt_service.delete(user_id, debt_id.into_inner()).await?;

    Ok(success::Success::no_content())
}
