pub mod modules;
pub mod users;

use axum::Router;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(users::routes(state.clone()))
        .merge(modules::routes(state))
}
