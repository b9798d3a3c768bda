use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::{friendship::schema::FriendshipStatus, user::model::validate_username};

/// A friendship row as seen by one participant: the other side's profile is
/// joined in, the caller's own is never included.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipResponse {
    pub id: Uuid,
    pub status: FriendshipStatus,
    pub requester_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub friend_id: Uuid,
    pub friend_first_name: String,
    pub friend_last_name: String,
    pub friend_username: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FriendshipRequestBody {
    #[validate(
        length(min = 1, message = "Username is required"),
        custom(function = "validate_username")
    )]
    pub username: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AcceptFriendshipBody {
    pub status: FriendshipStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FriendshipQuery {
    #[serde(rename = "type")]
    pub status: Option<FriendshipStatus>,
}
