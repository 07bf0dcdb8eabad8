use crate::api;
use crate::domain::{Item, NewItem, Purchase};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::purchases::list_purchases,
        api::purchases::create_purchase,
        api::purchases::delete_purchase,
    ),
    components(
        schemas(
            Purchase,
            Item,
            NewItem,
            api::purchases::CreatePurchaseRequest,
            api::purchases::TotalsRequest,
        )
    ),
    tags(
        (name = "purchase-ledger", description = "Purchase invoice API")
    )
)]
pub struct ApiDoc;
