use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::{Capability, ProfileSummary, Role};
use crate::modules::ModuleKind;
use crate::session::Session;

#[derive(Debug, Serialize)]
pub struct MenuEntry {
    pub key: ModuleKind,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub profile: ProfileSummary,
    pub role: Role,
    pub capabilities: &'static [Capability],
    pub menu: Vec<MenuEntry>,
    pub choice: ModuleKind,
    pub started_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            authenticated: true,
            profile: session.profile.clone(),
            role: session.role,
            capabilities: session.role.capabilities(),
            menu: session
                .role
                .menu()
                .into_iter()
                .map(|key| MenuEntry { key, label: key.def().label })
                .collect(),
            choice: session.choice,
            started_at: session.started_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MenuSelection {
    pub choice: ModuleKind,
}
