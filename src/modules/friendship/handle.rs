use actix_web::{delete, get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::friendship::{
        model::{AcceptFriendshipBody, FriendshipQuery, FriendshipRequestBody, FriendshipResponse},
        schema::FriendshipEntity,
        service::FriendshipService,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

#[get("")]
pub async fn list_friendships(
    friendship_service: web::Data<FriendshipService>,
    query: ValidatedQuery<FriendshipQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendshipResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friendships = friendship_service.list(user_id, query.0.status).await?;

    Ok(success::Success::ok(Some(friendships)).message("Friendships retrieved successfully"))
}

#[post("")]
pub async fn send_friend_request(
    friendship_service: web::Data<FriendshipService>,
    body: ValidatedJson<FriendshipRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let requester_id = get_claims(&req)?.sub;
    let friendship = friendship_service.request(requester_id, &body.0.username).await?;

    Ok(success::Success::created(Some(friendship)).message("Friend request sent successfully"))
}

#[patch("/{friendship_id}")]
pub async fn accept_friend_request(
    friendship_service: web::Data<FriendshipService>,
    friendship_id: web::Path<Uuid>,
    body: ValidatedJson<AcceptFriendshipBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friendship =
        friendship_service.accept(user_id, friendship_id.into_inner(), body.0.status).await?;

    Ok(success::Success::ok(Some(friendship)).message("Friend request accepted successfully"))
}

#[delete("/{friendship_id}")]
pub async fn delete_friendship(
    friendship_service: web::Data<FriendshipService>,
    friendship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friendship = friendship_service.delete(user_id, friendship_id.into_inner()).await?;

    Ok(success::Success::ok(Some(friendship)).message("Friendship removed successfully"))
}
