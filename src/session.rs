// src/session.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::{ProfileSummary, Role, UserProfile};
use crate::modules::ModuleKind;

/// State of one authenticated user session. Handlers receive it as an
/// explicit value; it only exists between login and logout.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub profile: ProfileSummary,
    pub role: Role,
    pub choice: ModuleKind,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.profile.usuario
    }

    pub fn can_open(&self, module: ModuleKind) -> bool {
        self.role.menu().contains(&module)
    }
}

#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    lifetime: Duration,
}

impl SessionRegistry {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Starts a session for a profile that passed the login check.
    pub async fn open(&self, profile: &UserProfile) -> Session {
        let role = profile.role();
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            profile: profile.summary(),
            role,
            choice: role.menu()[0],
            started_at: now,
            expires_at: now + self.lifetime,
        };
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .filter(|s| s.expires_at > Utc::now())
            .cloned()
    }

    /// Changes the active menu entry. `None` if the session is gone.
    pub async fn select(&self, id: Uuid, choice: ModuleKind) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        session.choice = choice;
        Some(session.clone())
    }

    pub async fn close(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}
