use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    constants::DEFAULT_CURRENCY,
    modules::debt::schema::{DebtFilter, DebtStatus},
    utils::double_option,
};

/// 9,999,999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 2);

pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(ValidationError::new("amount").with_message("Amount must be positive".into()));
    }
    if *amount > MAX_AMOUNT {
        return Err(ValidationError::new("amount")
            .with_message("Amount must not exceed 9999999.99".into()));
    }
    if amount.normalize().scale() > 2 {
        return Err(ValidationError::new("amount")
            .with_message("Amount must have at most 2 decimal places".into()));
    }
    Ok(())
}

pub fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::new("currency")
            .with_message("Currency must be a 3-letter code".into()))
    }
}

/// Stored form: exactly two decimal places.
pub fn normalize_amount(amount: Decimal) -> Decimal {
    let mut amount = amount.normalize();
    amount.rescale(2);
    amount
}

pub fn normalize_currency(currency: &str) -> String {
    currency.to_ascii_uppercase()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDebtModel {
    #[validate(length(min = 1, max = 50, message = "Lender name must be 1 to 50 characters long"))]
    pub lender_name: String,
    pub lender_id: Option<Uuid>,
    #[validate(length(min = 1, max = 50, message = "Lendee name must be 1 to 50 characters long"))]
    pub lendee_name: String,
    pub lendee_id: Option<Uuid>,
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    #[validate(length(min = 1, max = 30, message = "Title must be 1 to 30 characters long"))]
    pub title: String,
    #[validate(length(max = 100, message = "Description must be at most 100 characters long"))]
    pub description: Option<String>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<DebtStatus>,
}

/// Absent fields stay untouched. Nullable columns take `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDebtModel {
    #[validate(length(min = 1, max = 50, message = "Lender name must be 1 to 50 characters long"))]
    pub lender_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub lender_id: Option<Option<Uuid>>,
    #[validate(length(min = 1, max = 50, message = "Lendee name must be 1 to 50 characters long"))]
    pub lendee_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub lendee_id: Option<Option<Uuid>>,
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
    #[validate(custom(function = "validate_amount"))]
    pub amount: Option<Decimal>,
    #[validate(length(min = 1, max = 30, message = "Title must be 1 to 30 characters long"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 100, message = "Description must be at most 100 characters long"))]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub deadline: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub status: Option<DebtStatus>,
}

impl UpdateDebtModel {
    pub fn is_empty(&self) -> bool {
        self.lender_name.is_none()
            && self.lender_id.is_none()
            && self.lendee_name.is_none()
            && self.lendee_id.is_none()
            && self.currency.is_none()
            && self.amount.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DebtQuery {
    #[serde(rename = "type")]
    pub filter: Option<DebtFilter>,
}

pub struct InsertDebt {
    pub created_by: Uuid,
    pub lender_name: String,
    pub lender_id: Option<Uuid>,
    pub lendee_name: String,
    pub lendee_id: Option<Uuid>,
    pub currency: String,
    pub amount: Decimal,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub status: DebtStatus,
}

impl InsertDebt {
    pub fn currency_or_default(currency: Option<&str>) -> String {
        currency.map(normalize_currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }
}

/// Change to one side of a debt.
///
/// `id: Some(Some(_))` links an account and `name` then holds that account's
/// first name; `id: Some(None)` unlinks; `id: None` leaves the link as is.
/// A supplied `name` only applies to a side that ends up unlinked.
#[derive(Debug, Clone, Default)]
pub struct PartyPatch {
    pub id: Option<Option<Uuid>>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDebt {
    pub lender: PartyPatch,
    pub lendee: PartyPatch,
    pub currency: Option<String>,
    pub amount: Option<Decimal>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub status: Option<DebtStatus>,
}
