pub mod health;
pub mod resource;

use axum::middleware;
use axum::Router;
use warehouse_db::models::category::Category;
use warehouse_db::models::order::Order;
use warehouse_db::models::product::Product;
use warehouse_db::resource::Resource;

use crate::middleware::auth::require_basic_auth;
use crate::state::{AppState, StoreFor};

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories              list, create
/// /categories/{id}         get, update, delete
/// /products                list, create
/// /products/{id}           get, update, delete
/// /orders                  list, create
/// /orders/{id}             get, update, delete
/// ```
///
/// Every route sits behind the Basic authentication gate.
pub fn api_routes(state: AppState) -> Router<AppState> {
    let router = Router::new();
    let router = mount::<Category>(router);
    let router = mount::<Product>(router);
    let router = mount::<Order>(router);

    router.layer(middleware::from_fn_with_state(state, require_basic_auth))
}

fn mount<R>(router: Router<AppState>) -> Router<AppState>
where
    R: Resource,
    AppState: StoreFor<R>,
{
    router.nest(&format!("/{}", R::COLLECTION), resource::router::<R>())
}
