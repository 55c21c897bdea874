use actix_web::{web, HttpResponse};
use tracing::warn;

use crate::repository::PostgresSoknadRepository;
use crate::state::ApplicationState;

pub async fn is_alive(state: web::Data<ApplicationState>) -> HttpResponse {
    if state.is_alive() {
        HttpResponse::Ok().body("I'm alive! :)")
    } else {
        HttpResponse::InternalServerError().body("I'm dead x_x")
    }
}

pub async fn is_ready(
    state: web::Data<ApplicationState>,
    repository: web::Data<PostgresSoknadRepository>,
) -> HttpResponse {
    if !state.is_ready() {
        return HttpResponse::ServiceUnavailable().body("Please wait! I'm not ready :(");
    }

    match repository.health_check().await {
        Ok(_) => HttpResponse::Ok().body("I'm ready! :)"),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            HttpResponse::ServiceUnavailable().body("Database is not reachable")
        }
    }
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/internal")
            .route("/is_alive", web::get().to(is_alive))
            .route("/is_ready", web::get().to(is_ready)),
    );
}
