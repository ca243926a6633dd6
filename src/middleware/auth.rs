use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::AUTHORIZATION;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the bearer token to a live session and hands it to the
/// handler as an `Extension<Session>`.
pub async fn require_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let claims = {
        let auth_header = match req.headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok()) {
            Some(h) => h,
            None => return AppError::unauthorized("Missing Authorization header").into_response(),
        };

        // Expect "Bearer <token>"
        let token = match auth_header.strip_prefix("Bearer ") {
            Some(t) => t,
            None => return AppError::unauthorized("Invalid Authorization format").into_response(),
        };

        match verify_token(token, &state.config.jwt_secret) {
            Ok(c) => c,
            Err(e) => return e.into_response(),
        }
    };

    let session = match state.sessions.get(claims.sid).await {
        Some(s) => s,
        None => return AppError::unauthorized("Session ended, please log in again").into_response(),
    };

    req.extensions_mut().insert(session);
    next.run(req).await
}
