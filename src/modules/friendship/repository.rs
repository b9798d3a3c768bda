use uuid::Uuid;

use crate::{
    api::error,
    modules::friendship::{
        model::FriendshipResponse,
        schema::{FriendshipEntity, FriendshipStatus, NewFriendship},
    },
};

/// Storage port for friendships. The mutating calls carry their authorization
/// condition so the check and the write happen in one statement; `None` means
/// no row matched (missing or not permitted, deliberately indistinguishable).
#[async_trait::async_trait]
pub trait FriendshipRepository {
    async fn find_for_user(
        &self,
        user_id: &Uuid,
        status: Option<FriendshipStatus>,
    ) -> Result<Vec<FriendshipResponse>, error::SystemError>;

    /// Fails with `SystemError::Conflict` when the pair already has a row.
    async fn create(
        &self,
        friendship: &NewFriendship,
    ) -> Result<FriendshipEntity, error::SystemError>;

    async fn accept(
        &self,
        friendship_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    async fn delete(
        &self,
        friendship_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;
}
