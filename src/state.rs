// src/state.rs
use std::sync::Arc;

use chrono::Duration;
use serde_json::json;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::gateway::{DataGateway, PROFILES_TABLE};
use crate::models::user::MASTER_ROLE;
use crate::modules::{self, report::ReportRenderer};
use crate::session::SessionRegistry;
use crate::store::{postgres::create_pool, MemoryStore, PgStore, TableStore};

#[derive(Clone)]
pub struct AppState {
    pub gateway: DataGateway,
    pub sessions: SessionRegistry,
    pub reports: Arc<ReportRenderer>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn TableStore>, config: AppConfig) -> Result<Self, AppError> {
        let reports = ReportRenderer::new()
            .map_err(|e| AppError::internal(format!("Report template error: {e}")))?;
        Ok(Self {
            gateway: DataGateway::new(store),
            sessions: SessionRegistry::new(Duration::hours(config.session_hours)),
            reports: Arc::new(reports),
            config: Arc::new(config),
        })
    }

    /// Connects the store named by `DATABASE_URL` and builds the state.
    pub async fn connect(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn TableStore> = if config.uses_memory_store() {
            let store = MemoryStore::new();
            if let Some((user, password)) = &config.seed_admin {
                let profile = json!({ "usuario": user, "clave": password, "rol": MASTER_ROLE });
                if let Some(row) = profile.as_object() {
                    store
                        .insert(PROFILES_TABLE, row)
                        .await
                        .map_err(|e| AppError::internal(format!("Seeding failed: {e}")))?;
                }
            }
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(store)
        } else {
            let pool = create_pool(&config.database_url)
                .await
                .map_err(|e| AppError::config(format!("Failed to create database pool: {e}")))?;
            Arc::new(PgStore::new(pool, modules::tables()))
        };
        Self::new(store, config)
    }
}
