use uuid::Uuid;

use crate::{
    api::error,
    constants::LIST_LIMIT,
    modules::debt::{
        model::{InsertDebt, UpdateDebt},
        repository::DebtRepository,
        schema::{party_condition, DebtEntity, DebtFilter},
    },
};

#[derive(Clone)]
pub struct DebtRepositoryPg {
    pool: sqlx::PgPool,
}

impl DebtRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DebtRepository for DebtRepositoryPg {
    async fn find_for_user(
        &self,
        user_id: &Uuid,
        filter: Option<DebtFilter>,
    ) -> Result<Vec<DebtEntity>, error::SystemError> {
        let sql = format!(
            "SELECT * FROM debts WHERE {} ORDER BY created_at DESC, id DESC LIMIT $2",
            party_condition(filter)
        );

        let debts = sqlx::query_as::<_, DebtEntity>(&sql)
            .bind(user_id)
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        Ok(debts)
    }

    async fn find_visible(
        &self,
        debt_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<DebtEntity>, error::SystemError> {
        let debt = sqlx::query_as::<_, DebtEntity>(
            r#"
            SELECT * FROM debts
            WHERE id = $1
              AND (created_by = $2 OR lender_id = $2 OR lendee_id = $2)
            "#,
        )
        .bind(debt_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(debt)
    }

    async fn create(&self, debt: &InsertDebt) -> Result<DebtEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));

        let debt = sqlx::query_as::<_, DebtEntity>(
            r#"
            INSERT INTO debts (
                id, created_by, lender_name, lender_id, lendee_name, lendee_id,
                currency, amount, title, description, deadline, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(debt.created_by)
        .bind(&debt.lender_name)
        .bind(debt.lender_id)
        .bind(&debt.lendee_name)
        .bind(debt.lendee_id)
        .bind(&debt.currency)
        .bind(debt.amount)
        .bind(&debt.title)
        .bind(&debt.description)
        .bind(debt.deadline)
        .bind(debt.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(debt)
    }

    async fn update(
        &self,
        debt_id: &Uuid,
        created_by: &Uuid,
        changes: &UpdateDebt,
    ) -> Result<Option<DebtEntity>, error::SystemError> {
        // Ownership condition and mutation share one statement. A side that
        // stays linked keeps its stored name.
        let debt = sqlx::query_as::<_, DebtEntity>(
            r#"
            UPDATE debts
            SET
                lender_id   = CASE WHEN $3::boolean THEN $4 ELSE lender_id END,
                lender_name = CASE
                    WHEN NOT $3::boolean AND lender_id IS NOT NULL THEN lender_name
                    ELSE COALESCE($5, lender_name)
                END,
                lendee_id   = CASE WHEN $6::boolean THEN $7 ELSE lendee_id END,
                lendee_name = CASE
                    WHEN NOT $6::boolean AND lendee_id IS NOT NULL THEN lendee_name
                    ELSE COALESCE($8, lendee_name)
                END,
                currency    = COALESCE($9, currency),
                amount      = COALESCE($10, amount),
                title       = COALESCE($11, title),
                description = CASE WHEN $12::boolean THEN $13 ELSE description END,
                deadline    = CASE WHEN $14::boolean THEN $15 ELSE deadline END,
                status      = COALESCE($16, status),
                updated_at  = NOW()
            WHERE id = $1 AND created_by = $2
            RETURNING *
            "#,
        )
        .bind(debt_id)
        .bind(created_by)
        .bind(changes.lender.id.is_some()) // $3: was lender_id provided?
        .bind(changes.lender.id.flatten()) // $4: Option<Uuid>
        .bind(&changes.lender.name) // $5: Option<String>
        .bind(changes.lendee.id.is_some()) // $6: was lendee_id provided?
        .bind(changes.lendee.id.flatten()) // $7: Option<Uuid>
        .bind(&changes.lendee.name) // $8: Option<String>
        .bind(&changes.currency) // $9
        .bind(changes.amount) // $10
        .bind(&changes.title) // $11
        .bind(changes.description.is_some()) // $12: was description provided?
        .bind(changes.description.as_ref().and_then(|v| v.as_ref())) // $13
        .bind(changes.deadline.is_some()) // $14: was deadline provided?
        .bind(changes.deadline.flatten()) // $15
        .bind(changes.status) // $16
        .fetch_optional(&self.pool)
        .await?;

        Ok(debt)
    }

    async fn delete(&self, debt_id: &Uuid, created_by: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM debts WHERE id = $1 AND created_by = $2")
            .bind(debt_id)
            .bind(created_by)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}
