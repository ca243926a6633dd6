use axum::{
    routing::{get, post, put},
    Router, middleware,
};
use crate::handlers::module::{
    list_rows, create_row, preview_row, update_row, delete_row, print_report
};
use crate::middleware::auth::require_session;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/modules/{module}", get(list_rows).post(create_row))
        .route("/modules/{module}/preview", post(preview_row))
        .route("/modules/{module}/report", post(print_report))
        .route("/modules/{module}/{id}", put(update_row).delete(delete_row))
        .layer(middleware::from_fn_with_state(state, require_session))
}
