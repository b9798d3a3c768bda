use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friendship::{
            model::FriendshipResponse,
            repository::FriendshipRepository,
            schema::{FriendshipEntity, FriendshipStatus, NewFriendship},
        },
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct FriendshipService {
    friendship_repo: Arc<dyn FriendshipRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl FriendshipService {
    pub fn with_dependencies(
        friendship_repo: Arc<dyn FriendshipRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        info!("FriendshipService initialized with dependencies");
        FriendshipService { friendship_repo, user_repo }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        status: Option<FriendshipStatus>,
    ) -> Result<Vec<FriendshipResponse>, error::SystemError> {
        self.friendship_repo.find_for_user(&user_id, status).await
    }

    /// Sends a request to `username`. Existing rows for the pair, in either
    /// direction and either status, surface as a conflict from the insert.
    pub async fn request(
        &self,
        requester_id: Uuid,
        username: &str,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let target = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        let new_friendship = NewFriendship::request(requester_id, target.id)
            .ok_or_else(|| error::SystemError::bad_request("Cannot add yourself"))?;

        let friendship = self.friendship_repo.create(&new_friendship).await?;
        info!("Friend request {} sent by {}", friendship.id, requester_id);
        Ok(friendship)
    }

    pub async fn accept(
        &self,
        user_id: Uuid,
        friendship_id: Uuid,
        status: FriendshipStatus,
    ) -> Result<FriendshipEntity, error::SystemError> {
        if status != FriendshipStatus::Accepted {
            return Err(error::SystemError::bad_request("Status must be 'accepted'"));
        }

        let friendship = self
            .friendship_repo
            .accept(&friendship_id, &user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        info!("Friend request {} accepted by {}", friendship.id, user_id);
        Ok(friendship)
    }

    /// Covers rejecting, withdrawing and unfriending.
    pub async fn delete(
        &self,
        user_id: Uuid,
        friendship_id: Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let friendship = self
            .friendship_repo
            .delete(&friendship_id, &user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friendship not found"))?;

        info!("Friendship {} removed by {}", friendship.id, user_id);
        Ok(friendship)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{InMemoryFriendships, InMemoryUsers};

    struct Fixture {
        svc: FriendshipService,
        users: Arc<InMemoryUsers>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUsers::default());
        let friendships = Arc::new(InMemoryFriendships::new(users.clone()));
        Fixture { svc: FriendshipService::with_dependencies(friendships, users.clone()), users }
    }

    #[actix_web::test]
    async fn request_creates_pending_row_in_canonical_order() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let u2 = f.users.add("romina", "Romina");

        let row = f.svc.request(u1, "romina").await.unwrap();

        assert_eq!(row.status, FriendshipStatus::Pending);
        assert_eq!(row.requester_id, u1);
        assert!(row.user_id_1 < row.user_id_2);
        assert!(row.has_participant(&u1) && row.has_participant(&u2));
    }

    #[actix_web::test]
    async fn requester_cannot_accept_but_recipient_can() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let u2 = f.users.add("romina", "Romina");
        let row = f.svc.request(u1, "romina").await.unwrap();

        let err = f.svc.accept(u1, row.id, FriendshipStatus::Accepted).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));

        let accepted = f.svc.accept(u2, row.id, FriendshipStatus::Accepted).await.unwrap();
        assert_eq!(accepted.status, FriendshipStatus::Accepted);
        assert!(accepted.updated_at >= row.updated_at);
    }

    #[actix_web::test]
    async fn outsider_cannot_accept_or_delete() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        f.users.add("romina", "Romina");
        let u3 = f.users.add("sam", "Sam");
        let row = f.svc.request(u1, "romina").await.unwrap();

        let err = f.svc.accept(u3, row.id, FriendshipStatus::Accepted).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
        let err = f.svc.delete(u3, row.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn accept_with_pending_status_is_rejected() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let u2 = f.users.add("romina", "Romina");
        let row = f.svc.request(u1, "romina").await.unwrap();

        let err = f.svc.accept(u2, row.id, FriendshipStatus::Pending).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }

    #[actix_web::test]
    async fn duplicate_request_in_either_direction_conflicts() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let u2 = f.users.add("romina", "Romina");
        f.svc.request(u1, "romina").await.unwrap();

        let again = f.svc.request(u1, "romina").await.unwrap_err();
        assert!(matches!(again, error::SystemError::Conflict(_)));

        let reverse = f.svc.request(u2, "alex").await.unwrap_err();
        assert!(matches!(reverse, error::SystemError::Conflict(_)));
    }

    #[actix_web::test]
    async fn accepted_pair_still_conflicts() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let u2 = f.users.add("romina", "Romina");
        let row = f.svc.request(u1, "romina").await.unwrap();
        f.svc.accept(u2, row.id, FriendshipStatus::Accepted).await.unwrap();

        let err = f.svc.request(u2, "alex").await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));
    }

    #[actix_web::test]
    async fn concurrent_requests_for_same_pair_create_one_row() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let u2 = f.users.add("romina", "Romina");

        let (a, b) = tokio::join!(f.svc.request(u1, "romina"), f.svc.request(u2, "alex"));

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let failed = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
        assert!(matches!(failed, error::SystemError::Conflict(_)));
        assert_eq!(f.svc.list(u1, None).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn self_request_is_rejected_and_never_stored() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");

        let err = f.svc.request(u1, "alex").await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
        assert!(f.svc.list(u1, None).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn unknown_username_is_not_found() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let err = f.svc.request(u1, "ghost").await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn list_shows_the_other_participant_and_filters_status() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let u2 = f.users.add("romina", "Romina");
        let u3 = f.users.add("sam", "Sam");
        let to_romina = f.svc.request(u1, "romina").await.unwrap();
        f.svc.request(u3, "alex").await.unwrap();
        f.svc.accept(u2, to_romina.id, FriendshipStatus::Accepted).await.unwrap();

        let all = f.svc.list(u1, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|row| row.friend_id != u1));

        let accepted = f.svc.list(u1, Some(FriendshipStatus::Accepted)).await.unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].friend_id, u2);
        assert_eq!(accepted[0].friend_username, "romina");

        let pending = f.svc.list(u1, Some(FriendshipStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].friend_id, u3);
    }

    #[actix_web::test]
    async fn either_participant_can_delete_in_any_status() {
        let f = fixture();
        let u1 = f.users.add("alex", "Alex");
        let u2 = f.users.add("romina", "Romina");

        let pending = f.svc.request(u1, "romina").await.unwrap();
        f.svc.delete(u2, pending.id).await.unwrap();

        let again = f.svc.request(u1, "romina").await.unwrap();
        f.svc.accept(u2, again.id, FriendshipStatus::Accepted).await.unwrap();
        let removed = f.svc.delete(u1, again.id).await.unwrap();
        assert_eq!(removed.id, again.id);

        let err = f.svc.delete(u1, again.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }
}
