// src/handlers/session.rs
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use tracing::instrument;

use crate::dtos::module::{ListingView, SearchQuery};
use crate::dtos::session::{MenuSelection, SessionView};
use crate::error::AppError;
use crate::handlers::module::render_listing;
use crate::session::Session;
use crate::state::AppState;

// GET /session
pub async fn get_session(Extension(session): Extension<Session>) -> Json<SessionView> {
    Json(SessionView::from(&session))
}

// PUT /session/menu
#[instrument(skip(state, session), fields(user = %session.profile.usuario))]
pub async fn select_menu(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(selection): Json<MenuSelection>,
) -> Result<Json<SessionView>, AppError> {
    if !session.can_open(selection.choice) {
        return Err(AppError::forbidden("This module is not available for your role"));
    }
    let updated = state
        .sessions
        .select(session.id, selection.choice)
        .await
        .ok_or_else(|| AppError::unauthorized("Session ended, please log in again"))?;
    Ok(Json(SessionView::from(&updated)))
}

// GET /session/view?q= - Renders whichever module the menu points at
#[instrument(skip(state, session), fields(user = %session.profile.usuario, choice = ?session.choice))]
pub async fn current_view(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(search): Query<SearchQuery>,
) -> Json<ListingView> {
    Json(render_listing(&state, session.choice.def(), &search.q).await)
}
