use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Type, Serialize, Deserialize)]
#[sqlx(type_name = "friendship_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
}

/// One row per unordered pair of users, `user_id_1 < user_id_2`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipEntity {
    pub id: Uuid,
    pub user_id_1: Uuid,
    pub user_id_2: Uuid,
    pub requester_id: Uuid,
    pub status: FriendshipStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
impl FriendshipEntity {
    pub fn has_participant(&self, user_id: &Uuid) -> bool {
        self.user_id_1 == *user_id || self.user_id_2 == *user_id
    }

    /// Only the participant who did not send the request may accept it.
    pub fn can_accept(&self, user_id: &Uuid) -> bool {
        self.has_participant(user_id) && self.requester_id != *user_id
    }

    pub fn other_participant(&self, user_id: &Uuid) -> Uuid {
        if self.user_id_1 == *user_id { self.user_id_2 } else { self.user_id_1 }
    }
}

/// Orders two distinct ids so the pair maps to a single stored row.
/// Returns `None` for a self-pair.
pub fn canonical_pair(a: Uuid, b: Uuid) -> Option<(Uuid, Uuid)> {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => Some((a, b)),
        std::cmp::Ordering::Greater => Some((b, a)),
        std::cmp::Ordering::Equal => None,
    }
}

#[derive(Debug, Clone)]
pub struct NewFriendship {
    pub user_id_1: Uuid,
    pub user_id_2: Uuid,
    pub requester_id: Uuid,
}

impl NewFriendship {
    pub fn request(requester_id: Uuid, target_id: Uuid) -> Option<Self> {
        let (user_id_1, user_id_2) = canonical_pair(requester_id, target_id)?;
        Some(NewFriendship { user_id_1, user_id_2, requester_id })
    }
}
