// src/handlers/module.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Local;
use tracing::{info, instrument};

use crate::dtos::module::{ListingView, MutationResponse, PreviewResponse, SearchQuery};
use crate::error::AppError;
use crate::models::notice::Notices;
use crate::models::row::{self, Row};
use crate::models::user::Capability;
use crate::modules::{form, inventory, listing, report, Behavior, ModuleDef, ModuleKind};
use crate::modules::report::ReportPayload;
use crate::session::Session;
use crate::state::AppState;

fn open_module(session: &Session, module: ModuleKind) -> Result<&'static ModuleDef, AppError> {
    if session.can_open(module) {
        Ok(module.def())
    } else {
        Err(AppError::forbidden("This module is not available for your role"))
    }
}

fn require(session: &Session, capability: Capability) -> Result<(), AppError> {
    if session.role.can(capability) {
        Ok(())
    } else {
        Err(AppError::forbidden("Your role does not allow this action"))
    }
}

/// Fetches a module's table and lays it out as a searchable listing.
pub(crate) async fn render_listing(state: &AppState, def: &'static ModuleDef, query: &str) -> ListingView {
    let mut notices = Notices::new();
    let rows = state.gateway.fetch(def.table, None, &mut notices).await;
    listing::build(def, rows, query, notices)
}

// GET /modules/{module}?q= - Listing and search
#[instrument(skip(state, session), fields(user = %session.profile.usuario))]
pub async fn list_rows(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(module): Path<ModuleKind>,
    Query(search): Query<SearchQuery>,
) -> Result<Json<ListingView>, AppError> {
    let def = open_module(&session, module)?;
    Ok(Json(render_listing(&state, def, &search.q).await))
}

// POST /modules/{module} - Registration form submit
#[instrument(skip(state, session, payload), fields(user = %session.profile.usuario))]
pub async fn create_row(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(module): Path<ModuleKind>,
    Json(payload): Json<Row>,
) -> Result<(StatusCode, Json<MutationResponse>), AppError> {
    let def = open_module(&session, module)?;
    let row = form::validate_new(def, &payload)?;
    let stored = state.gateway.insert(def.table, &row).await?;

    let name = row::text(&stored, def.fields[0].name);
    info!(table = def.table, id = ?row::id(&stored), "Row created");
    let mut notices = Notices::new();
    notices.success(format!("{name} saved successfully."));

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse { module, row: Some(stored), notices }),
    ))
}

// POST /modules/{module}/preview - Derived values while the form is filled in
pub async fn preview_row(
    Extension(session): Extension<Session>,
    Path(module): Path<ModuleKind>,
    Json(payload): Json<Row>,
) -> Result<Json<PreviewResponse>, AppError> {
    let def = open_module(&session, module)?;
    let derived = match def.behavior {
        Behavior::Inventory => inventory::preview(&payload),
        Behavior::Plain => Row::new(),
    };
    Ok(Json(PreviewResponse { module, derived }))
}

// PUT /modules/{module}/{id} - Edit action
#[instrument(skip(state, session, payload), fields(user = %session.profile.usuario))]
pub async fn update_row(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path((module, id)): Path<(ModuleKind, i64)>,
    Json(payload): Json<Row>,
) -> Result<Json<MutationResponse>, AppError> {
    let def = open_module(&session, module)?;
    require(&session, Capability::EditRecords)?;
    let changes = form::validate_edit(def, &payload)?;

    if state.gateway.update(def.table, &changes, id).await? == 0 {
        return Err(AppError::not_found("Record not found"));
    }

    let mut notices = Notices::new();
    notices.success("Changes saved.");
    Ok(Json(MutationResponse { module, row: Some(changes), notices }))
}

// DELETE /modules/{module}/{id}
#[instrument(skip(state, session), fields(user = %session.profile.usuario))]
pub async fn delete_row(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path((module, id)): Path<(ModuleKind, i64)>,
) -> Result<Json<MutationResponse>, AppError> {
    let def = open_module(&session, module)?;
    require(&session, Capability::DeleteRecords)?;

    if state.gateway.delete(def.table, id).await? == 0 {
        return Err(AppError::not_found("Record not found"));
    }

    let mut notices = Notices::new();
    notices.success("Record deleted.");
    Ok(Json(MutationResponse { module, row: None, notices }))
}

// POST /modules/{module}/report - Printable document, returned once
#[instrument(skip(state, session), fields(user = %session.profile.usuario))]
pub async fn print_report(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(module): Path<ModuleKind>,
) -> Result<ReportPayload, AppError> {
    let def = open_module(&session, module)?;
    let mut notices = Notices::new();
    let rows = state.gateway.fetch(def.table, None, &mut notices).await;
    if rows.is_empty() {
        let first_message = notices.iter().next().map(|n| n.message.clone());
        return Err(match first_message {
            Some(message) => AppError::not_found_with(message, notices),
            None => AppError::not_found("No records to report"),
        });
    }

    let generated_at = Local::now().format("%d/%m/%Y %H:%M").to_string();
    let document = report::build(def, &rows, &state.config.company_name, generated_at);
    state
        .reports
        .render(&document)
        .map_err(|e| AppError::internal(format!("Report rendering failed: {e}")))
}
