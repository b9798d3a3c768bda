use uuid::Uuid;

use crate::{
    api::error,
    modules::debt::{
        model::{InsertDebt, UpdateDebt},
        schema::{DebtEntity, DebtFilter},
    },
};

/// Storage port for debts. Reads are scoped to what the caller may see and
/// writes to what the caller created, each in a single statement.
#[async_trait::async_trait]
pub trait DebtRepository {
    /// Newest first, at most `LIST_LIMIT` rows.
    async fn find_for_user(
        &self,
        user_id: &Uuid,
        filter: Option<DebtFilter>,
    ) -> Result<Vec<DebtEntity>, error::SystemError>;

    /// The debt when `user_id` created it or is its lender or lendee.
    async fn find_visible(
        &self,
        debt_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<DebtEntity>, error::SystemError>;

    async fn create(&self, debt: &InsertDebt) -> Result<DebtEntity, error::SystemError>;

    async fn update(
        &self,
        debt_id: &Uuid,
        created_by: &Uuid,
        changes: &UpdateDebt,
    ) -> Result<Option<DebtEntity>, error::SystemError>;

    async fn delete(&self, debt_id: &Uuid, created_by: &Uuid) -> Result<bool, error::SystemError>;
}
