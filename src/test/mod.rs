//! In-memory stand-ins for the PostgreSQL repositories. They honour the same
//! constraints as `migrations/` so services can be exercised without a
//! database.


use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::{
    api::error::{self, check_message, constraint, DbErrorMeta},
    constants::LIST_LIMIT,
    modules::{
        debt::{
            model::{InsertDebt, PartyPatch, UpdateDebt},
            repository::DebtRepository,
            schema::{party_matches, DebtEntity, DebtFilter},
        },
        friendship::{
            model::FriendshipResponse,
            repository::FriendshipRepository,
            schema::{FriendshipEntity, FriendshipStatus, NewFriendship},
        },
        user::{
            model::InsertUser, repository::UserRepository, repository_pg::UserRepositoryPg,
            schema::UserEntity,
        },
    },
};

pub const TEST_SECRET: &str = "test-secret";

fn new_id() -> Uuid {
    Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
}

/// Inserts an account through the Postgres repository for `#[sqlx::test]` cases.
pub async fn seed_user(pool: &sqlx::PgPool, username: &str, first_name: &str) -> Uuid {
    UserRepositoryPg::new(pool.clone())
        .create(&InsertUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            hash_password: String::new(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
        })
        .await
        .unwrap()
}

/// Strictly increasing timestamps so newest-first ordering is deterministic.
#[derive(Default)]
struct Clock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl Clock {
    fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap();
        let mut now = Utc::now();
        if let Some(prev) = *last {
            if now <= prev {
                now = prev + chrono::Duration::microseconds(1);
            }
        }
        *last = Some(now);
        now
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<UserEntity>>,
}

impl InMemoryUsers {
    /// Adds an account directly, bypassing password hashing.
    pub fn add(&self, username: &str, first_name: &str) -> Uuid {
        let id = new_id();
        self.rows.lock().unwrap().push(UserEntity {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            hash_password: String::new(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            created_at: Utc::now(),
        });
        id
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username.eq_ignore_ascii_case(&user.username)) {
            return Err(error::SystemError::Conflict(Some(DbErrorMeta::unique_violation(
                constraint::USERS_USERNAME_LOWER,
            ))));
        }
        if rows.iter().any(|u| u.email == user.email) {
            return Err(error::SystemError::Conflict(Some(DbErrorMeta::unique_violation(
                constraint::USERS_EMAIL,
            ))));
        }

        let id = new_id();
        rows.push(UserEntity {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            hash_password: user.hash_password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

pub struct InMemoryFriendships {
    users: Arc<InMemoryUsers>,
    rows: Mutex<Vec<FriendshipEntity>>,
    clock: Clock,
}

impl InMemoryFriendships {
    pub fn new(users: Arc<InMemoryUsers>) -> Self {
        Self { users, rows: Mutex::new(Vec::new()), clock: Clock::default() }
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for InMemoryFriendships {
    async fn find_for_user(
        &self,
        user_id: &Uuid,
        status: Option<FriendshipStatus>,
    ) -> Result<Vec<FriendshipResponse>, error::SystemError> {
        let mut rows: Vec<FriendshipEntity> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.has_participant(user_id))
            .filter(|f| status.map_or(true, |s| f.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let users = self.users.rows.lock().unwrap();
        Ok(rows
            .into_iter()
            .filter_map(|f| {
                let other = f.other_participant(user_id);
                users.iter().find(|u| u.id == other).map(|u| FriendshipResponse {
                    id: f.id,
                    status: f.status,
                    requester_id: f.requester_id,
                    created_at: f.created_at,
                    friend_id: u.id,
                    friend_first_name: u.first_name.clone(),
                    friend_last_name: u.last_name.clone(),
                    friend_username: u.username.clone(),
                })
            })
            .take(LIST_LIMIT as usize)
            .collect())
    }

    async fn create(
        &self,
        friendship: &NewFriendship,
    ) -> Result<FriendshipEntity, error::SystemError> {
        if friendship.user_id_1 >= friendship.user_id_2 {
            return Err(error::SystemError::BadRequest(check_message(Some(
                constraint::FRIENDSHIPS_ORDER,
            ))));
        }
        if friendship.requester_id != friendship.user_id_1
            && friendship.requester_id != friendship.user_id_2
        {
            return Err(error::SystemError::BadRequest(check_message(Some(
                constraint::FRIENDSHIPS_REQUESTER,
            ))));
        }

        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|f| f.user_id_1 == friendship.user_id_1 && f.user_id_2 == friendship.user_id_2)
        {
            return Err(error::SystemError::Conflict(Some(DbErrorMeta::unique_violation(
                constraint::FRIENDSHIPS_PAIR,
            ))));
        }

        let now = self.clock.now();
        let row = FriendshipEntity {
            id: new_id(),
            user_id_1: friendship.user_id_1,
            user_id_2: friendship.user_id_2,
            requester_id: friendship.requester_id,
            status: FriendshipStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn accept(
        &self,
        friendship_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|f| f.id == *friendship_id && f.can_accept(user_id))
        else {
            return Ok(None);
        };
        row.status = FriendshipStatus::Accepted;
        row.updated_at = self.clock.now();
        Ok(Some(row.clone()))
    }

    async fn delete(
        &self,
        friendship_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let mut rows = self.rows.lock().unwrap();
        let position =
            rows.iter().position(|f| f.id == *friendship_id && f.has_participant(user_id));
        Ok(position.map(|i| rows.remove(i)))
    }
}

#[derive(Default)]
pub struct InMemoryDebts {
    rows: Mutex<Vec<DebtEntity>>,
    clock: Clock,
}

fn check_parties(debt: &DebtEntity) -> Result<(), error::SystemError> {
    if debt.lender_id.is_none() && debt.lendee_id.is_none() {
        return Err(error::SystemError::BadRequest(check_message(Some(constraint::DEBTS_PARTY))));
    }
    if debt.lender_id.is_some() && debt.lender_id == debt.lendee_id {
        return Err(error::SystemError::BadRequest(check_message(Some(
            constraint::DEBTS_DISTINCT_PARTIES,
        ))));
    }
    Ok(())
}

/// Mirrors the name rule of the SQL update: a side that stays linked keeps
/// its stored name.
fn apply_party(id: &mut Option<Uuid>, name: &mut String, patch: &PartyPatch) {
    let keep_name = patch.id.is_none() && id.is_some();
    if let Some(new_id) = patch.id {
        *id = new_id;
    }
    if !keep_name {
        if let Some(new_name) = &patch.name {
            *name = new_name.clone();
        }
    }
}

fn apply_changes(debt: &mut DebtEntity, changes: &UpdateDebt) {
    apply_party(&mut debt.lender_id, &mut debt.lender_name, &changes.lender);
    apply_party(&mut debt.lendee_id, &mut debt.lendee_name, &changes.lendee);
    if let Some(currency) = &changes.currency {
        debt.currency = currency.clone();
    }
    if let Some(amount) = changes.amount {
        debt.amount = amount;
    }
    if let Some(title) = &changes.title {
        debt.title = title.clone();
    }
    if let Some(description) = &changes.description {
        debt.description = description.clone();
    }
    if let Some(deadline) = changes.deadline {
        debt.deadline = deadline;
    }
    if let Some(status) = changes.status {
        debt.status = status;
    }
}

#[async_trait::async_trait]
impl DebtRepository for InMemoryDebts {
    async fn find_for_user(
        &self,
        user_id: &Uuid,
        filter: Option<DebtFilter>,
    ) -> Result<Vec<DebtEntity>, error::SystemError> {
        let mut debts: Vec<DebtEntity> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| party_matches(filter, user_id, d))
            .cloned()
            .collect();
        debts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        debts.truncate(LIST_LIMIT as usize);
        Ok(debts)
    }

    async fn find_visible(
        &self,
        debt_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<DebtEntity>, error::SystemError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == *debt_id && d.is_visible_to(user_id))
            .cloned())
    }

    async fn create(&self, debt: &InsertDebt) -> Result<DebtEntity, error::SystemError> {
        let now = self.clock.now();
        let row = DebtEntity {
            id: new_id(),
            created_by: debt.created_by,
            lender_name: debt.lender_name.clone(),
            lender_id: debt.lender_id,
            lendee_name: debt.lendee_name.clone(),
            lendee_id: debt.lendee_id,
            currency: debt.currency.clone(),
            amount: debt.amount,
            title: debt.title.clone(),
            description: debt.description.clone(),
            deadline: debt.deadline,
            status: debt.status,
            created_at: now,
            updated_at: now,
        };
        check_parties(&row)?;
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        debt_id: &Uuid,
        created_by: &Uuid,
        changes: &UpdateDebt,
    ) -> Result<Option<DebtEntity>, error::SystemError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|d| d.id == *debt_id && d.created_by == *created_by)
        else {
            return Ok(None);
        };

        let mut updated = row.clone();
        apply_changes(&mut updated, changes);
        check_parties(&updated)?;
        updated.updated_at = self.clock.now();
        *row = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, debt_id: &Uuid, created_by: &Uuid) -> Result<bool, error::SystemError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|d| !(d.id == *debt_id && d.created_by == *created_by));
        Ok(rows.len() < before)
    }
}
