pub mod health;
pub mod purchases;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Purchases
        .route(
            "/purchases",
            get(purchases::list_purchases).post(purchases::create_purchase),
        )
        .route("/purchases/:id", delete(purchases::delete_purchase))
        .with_state(state)
}
