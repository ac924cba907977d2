//! The Basic authentication gate and the [`AuthUser`] extractor it feeds.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::basic::parse_authorization;
use crate::state::AppState;

/// The identity established by [`require_basic_auth`] for the rest of the
/// request.
///
/// Use this as an extractor parameter in any handler mounted behind the gate:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Outside the gate there is no identity, so extraction answers the same 401
/// challenge the gate does.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            tracing::warn!(
                path = %parts.uri.path(),
                "Handler reached without an authenticated user",
            );
            challenge(state)
        })
    }
}

/// Reject any request without valid Basic credentials before it reaches a
/// handler.
///
/// Failures answer 401 with an empty body and a `WWW-Authenticate` challenge
/// naming the configured realm. Password hashing runs on the blocking pool.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let credentials = match parse_authorization(request.headers().get(AUTHORIZATION)) {
        Ok(credentials) => credentials,
        Err(reason) => {
            tracing::warn!(
                %reason,
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request without usable credentials",
            );
            return challenge(&state);
        }
    };

    let username = credentials.username.clone();
    let verifier = Arc::clone(&state.verifier);
    let verified = tokio::task::spawn_blocking(move || {
        verifier.verify(&credentials.username, &credentials.password)
    })
    .await;

    match verified {
        Ok(true) => {
            tracing::debug!(user = %username, "Authenticated");
            request.extensions_mut().insert(AuthUser { username });
            next.run(request).await
        }
        Ok(false) => {
            tracing::warn!(
                user = %username,
                path = %request.uri().path(),
                "Rejected request with invalid credentials",
            );
            challenge(&state)
        }
        Err(e) => {
            tracing::error!(error = %e, "Credential verification task failed");
            challenge(&state)
        }
    }
}

fn challenge(state: &AppState) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, state.config.auth.challenge())],
    )
        .into_response()
}
