use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        debt::{
            model::{
                normalize_amount, normalize_currency, CreateDebtModel, InsertDebt, PartyPatch,
                UpdateDebt, UpdateDebtModel,
            },
            repository::DebtRepository,
            schema::{DebtEntity, DebtFilter},
        },
        user::repository::UserRepository,
    },
    utils::validate_model,
};

const UNLINKED_DEBT: &str = "A debt must be linked to at least one account";

#[derive(Clone, Copy)]
enum Side {
    Lender,
    Lendee,
}

impl Side {
    fn missing_account(self) -> &'static str {
        match self {
            Side::Lender => "Lender account not found",
            Side::Lendee => "Lendee account not found",
        }
    }
}

#[derive(Clone)]
pub struct DebtService {
    debt_repo: Arc<dyn DebtRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl DebtService {
    pub fn with_dependencies(
        debt_repo: Arc<dyn DebtRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        info!("DebtService initialized with dependencies");
        DebtService { debt_repo, user_repo }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        filter: Option<DebtFilter>,
    ) -> Result<Vec<DebtEntity>, error::SystemError> {
        self.debt_repo.find_for_user(&user_id, filter).await
    }

    pub async fn get_by_id(
        &self,
        user_id: Uuid,
        debt_id: Uuid,
    ) -> Result<DebtEntity, error::SystemError> {
        self.debt_repo
            .find_visible(&debt_id, &user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Debt not found"))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        debt: CreateDebtModel,
    ) -> Result<DebtEntity, error::SystemError> {
        validate_model(&debt)?;

        if debt.lender_id.is_none() && debt.lendee_id.is_none() {
            return Err(error::SystemError::bad_request(UNLINKED_DEBT));
        }
        if debt.lender_id.is_some() && debt.lender_id == debt.lendee_id {
            return Err(error::SystemError::bad_request(
                "Lender and lendee must be different accounts",
            ));
        }
        if debt.lender_id != Some(user_id) && debt.lendee_id != Some(user_id) {
            return Err(error::SystemError::forbidden(
                "You can only record debts you are a party to",
            ));
        }

        let lender_name = match debt.lender_id {
            Some(id) => self.linked_name(id, Side::Lender).await?,
            None => debt.lender_name,
        };
        let lendee_name = match debt.lendee_id {
            Some(id) => self.linked_name(id, Side::Lendee).await?,
            None => debt.lendee_name,
        };

        let new_debt = InsertDebt {
            created_by: user_id,
            lender_name,
            lender_id: debt.lender_id,
            lendee_name,
            lendee_id: debt.lendee_id,
            currency: InsertDebt::currency_or_default(debt.currency.as_deref()),
            amount: normalize_amount(debt.amount),
            title: debt.title,
            description: debt.description,
            deadline: debt.deadline,
            status: debt.status.unwrap_or_default(),
        };

        let debt = self.debt_repo.create(&new_debt).await?;
        info!("Debt {} created by {}", debt.id, user_id);
        Ok(debt)
    }

    /// Only the creator may update; everyone else gets `NotFound`.
    pub async fn update(
        &self,
        user_id: Uuid,
        debt_id: Uuid,
        patch: UpdateDebtModel,
    ) -> Result<DebtEntity, error::SystemError> {
        validate_model(&patch)?;

        if patch.is_empty() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }
        if patch.lender_id == Some(None) && patch.lendee_id == Some(None) {
            return Err(error::SystemError::bad_request(UNLINKED_DEBT));
        }

        let changes = UpdateDebt {
            lender: self.party_patch(patch.lender_id, patch.lender_name, Side::Lender).await?,
            lendee: self.party_patch(patch.lendee_id, patch.lendee_name, Side::Lendee).await?,
            currency: patch.currency.as_deref().map(normalize_currency),
            amount: patch.amount.map(normalize_amount),
            title: patch.title,
            description: patch.description,
            deadline: patch.deadline,
            status: patch.status,
        };

        let debt = self
            .debt_repo
            .update(&debt_id, &user_id, &changes)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Debt not found"))?;

        info!("Debt {} updated by {}", debt.id, user_id);
        Ok(debt)
    }

    /// Only the creator may delete; everyone else gets `NotFound`.
    pub async fn delete(&self, user_id: Uuid, debt_id: Uuid) -> Result<(), error::SystemError> {
        if !self.debt_repo.delete(&debt_id, &user_id).await? {
            return Err(error::SystemError::not_found("Debt not found"));
        }
        info!("Debt {} deleted by {}", debt_id, user_id);
        Ok(())
    }

    /// Linked parties are always shown under the account's own first name.
    async fn linked_name(&self, id: Uuid, side: Side) -> Result<String, error::SystemError> {
        self.user_repo
            .find_by_id(&id)
            .await?
            .map(|user| user.first_name)
            .ok_or_else(|| error::SystemError::bad_request(side.missing_account()))
    }

    async fn party_patch(
        &self,
        id: Option<Option<Uuid>>,
        name: Option<String>,
        side: Side,
    ) -> Result<PartyPatch, error::SystemError> {
        match id {
            Some(Some(linked)) => Ok(PartyPatch {
                id: Some(Some(linked)),
                name: Some(self.linked_name(linked, side).await?),
            }),
            _ => Ok(PartyPatch { id, name }),
        }
    }
}
