use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::instrument;

use crate::auth::gate::{authenticate, INVALID_CREDENTIALS};
use crate::auth::jwt::sign_token;
use crate::dtos::session::SessionView;
use crate::dtos::user::{LoginRejected, LoginRequest, LoginResponse, LogoutResponse, MeResponse};
use crate::error::AppError;
use crate::models::notice::Notices;
use crate::session::Session;
use crate::state::AppState;

// POST /login
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let Some(profile) = authenticate(&state.gateway, &payload.username, &payload.password).await else {
        let mut notices = Notices::new();
        notices.error(INVALID_CREDENTIALS);
        let body = LoginRejected { authenticated: false, notices };
        return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    };

    let session = state.sessions.open(&profile).await;
    let token = sign_token(&session, &state.config.jwt_secret)?;

    Ok(Json(LoginResponse {
        authenticated: true,
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: state.sessions.lifetime().num_seconds(),
        session: SessionView::from(&session),
    })
    .into_response())
}

// POST /logout
#[instrument(skip(state, session), fields(user = %session.profile.usuario))]
pub async fn logout_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Json<LogoutResponse> {
    state.sessions.close(session.id).await;
    let mut notices = Notices::new();
    notices.info("Session closed.");
    Json(LogoutResponse { authenticated: false, notices })
}

// GET /me - Current profile as stored, looked up by username
pub async fn get_me(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<MeResponse>, AppError> {
    let profile = state
        .gateway
        .get_user(session.username())
        .await
        .ok_or_else(|| AppError::not_found("Profile not found"))?;

    Ok(Json(MeResponse {
        role: profile.role(),
        profile: profile.summary(),
    }))
}
