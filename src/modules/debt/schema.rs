use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Type, Serialize, Deserialize)]
#[sqlx(type_name = "debt_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    #[default]
    Pending,
    Paid,
    Void,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DebtEntity {
    pub id: Uuid,
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
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
impl DebtEntity {
    pub fn is_party(&self, user_id: &Uuid) -> bool {
        self.lender_id == Some(*user_id) || self.lendee_id == Some(*user_id)
    }

    pub fn is_visible_to(&self, user_id: &Uuid) -> bool {
        self.created_by == *user_id || self.is_party(user_id)
    }
}

/// `pay`: debts the caller owes. `receive`: debts owed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtFilter {
    Pay,
    Receive,
}

/// Row condition for a debt listing, with the caller bound to `$1`.
pub fn party_condition(filter: Option<DebtFilter>) -> &'static str {
    match filter {
        Some(DebtFilter::Pay) => "lendee_id = $1",
        Some(DebtFilter::Receive) => "lender_id = $1",
        None => "(lender_id = $1 OR lendee_id = $1)",
    }
}

/// In-process twin of [`party_condition`].
#[cfg(test)]
pub fn party_matches(filter: Option<DebtFilter>, user_id: &Uuid, debt: &DebtEntity) -> bool {
    match filter {
        Some(DebtFilter::Pay) => debt.lendee_id == Some(*user_id),
        Some(DebtFilter::Receive) => debt.lender_id == Some(*user_id),
        None => debt.is_party(user_id),
    }
}
