use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/doctors/availability",
            get(handlers::availability::sync_availability)
                .post(handlers::availability::sync_availability),
        )
        .route(
            "/doctors/availability/days",
            get(handlers::availability::list_days),
        )
        .route(
            "/doctors/availability/days/:date",
            get(handlers::availability::get_day),
        )
}
