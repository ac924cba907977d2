//! List/get/create/update/delete, written once and instantiated for every
//! [`Resource`].

use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use warehouse_core::error::CoreError;
use warehouse_core::types::DbId;
use warehouse_db::resource::Resource;
use warehouse_db::store::{StoreError, WriteOutcome};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::state::{AppState, StoreFor};

fn not_found<R: Resource>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::NAME,
        id,
    })
}

/// GET /{collection}?pageNumber=&pageSize=&search=
pub async fn list<R>(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<R>>>
where
    R: Resource,
    AppState: StoreFor<R>,
{
    let page = params.page()?;
    let rows = StoreFor::<R>::store(&state)
        .list(page, params.search())
        .await?;

    tracing::debug!(
        entity = R::NAME,
        page = page.page_number(),
        count = rows.len(),
        user = %user.username,
        "Listed rows",
    );
    Ok(Json(rows))
}

/// GET /{collection}/{id}
pub async fn get_by_id<R>(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<R>>
where
    R: Resource,
    AppState: StoreFor<R>,
{
    StoreFor::<R>::store(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found::<R>(id))
}

/// POST /{collection}
///
/// Any `id` in the body is ignored. Returns 201 with a `Location` header and
/// the stored row.
pub async fn create<R>(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<R>,
) -> AppResult<impl IntoResponse>
where
    R: Resource,
    AppState: StoreFor<R>,
{
    input.validate().map_err(CoreError::from)?;
    input.set_id(0);

    let created = StoreFor::<R>::store(&state).insert(&input).await?;
    let location = format!("/api/{}/{}", R::COLLECTION, created.id());

    tracing::info!(entity = R::NAME, id = created.id(), user = %user.username, "Created");
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

/// PUT /{collection}/{id}
///
/// Full replacement. The body id must equal the path id. When the store
/// reports a conflict the row is looked up again: gone means 404, still there
/// is surfaced as an unrecovered server error.
pub async fn update<R>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<R>,
) -> AppResult<StatusCode>
where
    R: Resource,
    AppState: StoreFor<R>,
{
    if input.id() != id {
        return Err(AppError::BadRequest(format!(
            "Body id {} does not match path id {id}",
            input.id()
        )));
    }
    input.validate().map_err(CoreError::from)?;

    let store = StoreFor::<R>::store(&state);
    match store.update(&input).await? {
        WriteOutcome::Applied => {
            tracing::info!(entity = R::NAME, id, user = %user.username, "Updated");
            Ok(StatusCode::NO_CONTENT)
        }
        WriteOutcome::Conflict => {
            if store.exists(id).await? {
                Err(StoreError::ConcurrencyConflict {
                    entity: R::NAME,
                    id,
                }
                .into())
            } else {
                Err(not_found::<R>(id))
            }
        }
    }
}

/// DELETE /{collection}/{id}
pub async fn delete<R>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode>
where
    R: Resource,
    AppState: StoreFor<R>,
{
    if StoreFor::<R>::store(&state).delete(id).await? {
        tracing::info!(entity = R::NAME, id, user = %user.username, "Deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found::<R>(id))
    }
}
