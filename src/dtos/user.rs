use serde::{Deserialize, Serialize};

use crate::dtos::session::SessionView;
use crate::models::notice::Notices;
use crate::models::user::ProfileSummary;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub authenticated: bool,
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in_seconds: i64,
    pub session: SessionView,
}

#[derive(Serialize)]
pub struct LoginRejected {
    pub authenticated: bool,
    pub notices: Notices,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub authenticated: bool,
    pub notices: Notices,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub profile: ProfileSummary,
    pub role: crate::models::user::Role,
}
