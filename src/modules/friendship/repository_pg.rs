use uuid::Uuid;

use crate::{
    api::error,
    constants::LIST_LIMIT,
    modules::friendship::{
        model::FriendshipResponse,
        repository::FriendshipRepository,
        schema::{FriendshipEntity, FriendshipStatus, NewFriendship},
    },
};

#[derive(Clone)]
pub struct FriendshipRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendshipRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for FriendshipRepositoryPg {
    async fn find_for_user(
        &self,
        user_id: &Uuid,
        status: Option<FriendshipStatus>,
    ) -> Result<Vec<FriendshipResponse>, error::SystemError> {
        let friendships = sqlx::query_as::<_, FriendshipResponse>(
            r#"
            SELECT
                f.id,
                f.status,
                f.requester_id,
                f.created_at,
                u.id AS friend_id,
                u.first_name AS friend_first_name,
                u.last_name AS friend_last_name,
                u.username AS friend_username
            FROM friendships f
            JOIN users u
                ON u.id = CASE
                    WHEN f.user_id_1 = $1 THEN f.user_id_2
                    ELSE f.user_id_1
                END
            WHERE (f.user_id_1 = $1 OR f.user_id_2 = $1)
              AND ($2::friendship_status IS NULL OR f.status = $2)
            ORDER BY f.created_at DESC, f.id DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(status)
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(friendships)
    }

    async fn create(
        &self,
        friendship: &NewFriendship,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));

        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            INSERT INTO friendships (id, user_id_1, user_id_2, requester_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(friendship.user_id_1)
        .bind(friendship.user_id_2)
        .bind(friendship.requester_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn accept(
        &self,
        friendship_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            UPDATE friendships
            SET status = 'accepted', updated_at = NOW()
            WHERE id = $1
              AND requester_id <> $2
              AND (user_id_1 = $2 OR user_id_2 = $2)
            RETURNING *
            "#,
        )
        .bind(friendship_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn delete(
        &self,
        friendship_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            DELETE FROM friendships
            WHERE id = $1
              AND (user_id_1 = $2 OR user_id_2 = $2)
            RETURNING *
            "#,
        )
        .bind(friendship_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }
}
