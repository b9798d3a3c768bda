use crate::modules::friendship::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friendships")
            .service(list_friendships)
            .service(send_friend_request)
            .service(accept_friend_request)
            .service(delete_friendship),
    );
}
