use axum::routing::get;
use axum::Router;
use warehouse_db::resource::Resource;

use crate::handlers::resource;
use crate::state::{AppState, StoreFor};

/// Routes for one resource collection (mounted at `/{collection}`).
///
/// ```text
/// GET    /        list (?pageNumber, ?pageSize, ?search)
/// POST   /        create
/// GET    /{id}    get by id
/// PUT    /{id}    replace
/// DELETE /{id}    delete
/// ```
pub fn router<R>() -> Router<AppState>
where
    R: Resource,
    AppState: StoreFor<R>,
{
    Router::new()
        .route("/", get(resource::list::<R>).post(resource::create::<R>))
        .route(
            "/{id}",
            get(resource::get_by_id::<R>)
                .put(resource::update::<R>)
                .delete(resource::delete::<R>),
        )
}
