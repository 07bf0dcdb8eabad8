use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{DomainError, NewItem, NewPurchase, Purchase, coerce};
use crate::infrastructure::AppState;

/// Precomputed totals as sent by the client
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalsRequest {
    #[serde(default, deserialize_with = "coerce::opt_f64_lenient")]
    pub merchandise: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_f64_lenient")]
    pub extras: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_f64_lenient")]
    pub grand_total: Option<f64>,
}

/// Request body for creating a purchase
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub supplier: String,
    #[serde(deserialize_with = "coerce::date_lenient")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "coerce::opt_f64_lenient")]
    pub shipping_cost: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_f64_lenient")]
    pub other_cost: Option<f64>,
    pub totals: Option<TotalsRequest>,
    #[serde(default)]
    pub items: Vec<NewItem>,
}

// Flatten `totals` onto the header columns; anything missing is 0
impl From<CreatePurchaseRequest> for NewPurchase {
    fn from(req: CreatePurchaseRequest) -> Self {
        let totals = req.totals.unwrap_or_default();
        Self {
            supplier: req.supplier,
            date: req.date,
            shipping_cost: req.shipping_cost.unwrap_or(0.0),
            other_cost: req.other_cost.unwrap_or(0.0),
            total_merchandise: totals.merchandise.unwrap_or(0.0),
            total_extras: totals.extras.unwrap_or(0.0),
            grand_total: totals.grand_total.unwrap_or(0.0),
            items: req.items,
        }
    }
}

/// GET /api/purchases - List all purchases with their items, newest first
#[utoipa::path(
    get,
    path = "/api/purchases",
    responses(
        (status = 200, description = "Purchases with nested items", body = [Purchase]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_purchases(State(state): State<AppState>) -> impl IntoResponse {
    match state.purchase_repo.find_all().await {
        Ok(purchases) => (StatusCode::OK, Json(purchases)).into_response(),
        Err(e) => {
            tracing::error!("Failed to list purchases: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// POST /api/purchases - Create a purchase and its items in one transaction
#[utoipa::path(
    post,
    path = "/api/purchases",
    request_body = CreatePurchaseRequest,
    responses(
        (status = 201, description = "Purchase created", body = Purchase),
        (status = 400, description = "Invalid payload or write failed")
    )
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    payload: Result<Json<CreatePurchaseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::error!("Rejected purchase payload: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    match state.purchase_repo.create(payload.into()).await {
        Ok(purchase) => {
            tracing::info!(
                "Created purchase {} from {} with {} items",
                purchase.id,
                purchase.supplier,
                purchase.items.len()
            );
            (StatusCode::CREATED, Json(purchase)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create purchase: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// DELETE /api/purchases/:id - Delete a purchase; its items cascade
#[utoipa::path(
    delete,
    path = "/api/purchases/{id}",
    params(
        ("id" = String, Path, description = "Purchase id")
    ),
    responses(
        (status = 200, description = "Purchase deleted"),
        (status = 404, description = "No purchase with this id"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    // A non-numeric id can never match a row
    let Ok(id) = id.parse::<i32>() else {
        return not_found();
    };

    match state.purchase_repo.delete(id).await {
        Ok(()) => {
            tracing::info!("Deleted purchase {}", id);
            (
                StatusCode::OK,
                Json(json!({ "message": "Deleted successfully" })),
            )
                .into_response()
        }
        Err(DomainError::NotFound) => not_found(),
        Err(e) => {
            tracing::error!("Failed to delete purchase {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

fn not_found() -> axum::response::Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response()
}
