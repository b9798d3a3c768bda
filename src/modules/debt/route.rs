use crate::modules::debt::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/debts")
            .service(list_debts)
            .service(create_debt)
            .service(get_debt)
            .service(update_debt)
            .service(delete_debt),
    );
}
