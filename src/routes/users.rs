use axum::{Router, routing::{get, post, put}, middleware};
use crate::state::AppState;
use crate::handlers::user::{login_user, logout_user, get_me};
use crate::handlers::session::{get_session, select_menu, current_view};
use crate::middleware::auth::require_session;

pub fn routes(state: AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/login", post(login_user));

    let protected = Router::new()
        .route("/logout", post(logout_user))
        .route("/me", get(get_me))
        .route("/session", get(get_session))
        .route("/session/menu", put(select_menu))
        .route("/session/view", get(current_view))
        .layer(middleware::from_fn_with_state(state, require_session));

    open.merge(protected)
}
