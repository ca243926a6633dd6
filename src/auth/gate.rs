// src/auth/gate.rs
use bcrypt::verify;
use tracing::{info, instrument};

use crate::gateway::DataGateway;
use crate::models::user::UserProfile;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials or user does not exist.";

/// Scans the profile table for the first entry matching both username and
/// password. A missing user, a wrong password and an unreachable backend
/// all come back as `None`.
#[instrument(skip(gateway, password))]
pub async fn authenticate(gateway: &DataGateway, username: &str, password: &str) -> Option<UserProfile> {
    let found = gateway
        .profiles()
        .await
        .into_iter()
        .find(|p| p.usuario == username && password_matches(&p.clave, password));
    info!(accepted = found.is_some(), "Login attempt");
    found
}

// Stored passwords are plain text; bcrypt hashes are accepted as well so
// profiles can be migrated one at a time.
fn password_matches(stored: &str, given: &str) -> bool {
    if stored.starts_with("$2") {
        verify(given, stored).unwrap_or(false)
    } else {
        stored == given
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::PROFILES_TABLE;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    async fn gateway_with_profiles() -> (Arc<MemoryStore>, DataGateway) {
        let store = Arc::new(MemoryStore::new());
        let gateway = DataGateway::new(store.clone());
        let hashed = bcrypt::hash("hashed-pw", 4).unwrap();
        for profile in [
            json!({ "usuario": "ana", "clave": "Secreta1", "rol": "master_it" }),
            json!({ "usuario": "luis", "clave": hashed, "rol": "usuario" }),
        ] {
            gateway
                .insert(PROFILES_TABLE, profile.as_object().unwrap())
                .await
                .unwrap();
        }
        (store, gateway)
    }

    #[tokio::test]
    async fn exact_match_required() {
        let (_, gateway) = gateway_with_profiles().await;
        let ana = authenticate(&gateway, "ana", "Secreta1").await.unwrap();
        assert_eq!(ana.rol, "master_it");
        assert!(authenticate(&gateway, "ana", "secreta1").await.is_none());
        assert!(authenticate(&gateway, "ANA", "Secreta1").await.is_none());
        assert!(authenticate(&gateway, "nadie", "Secreta1").await.is_none());
    }

    #[tokio::test]
    async fn bcrypt_profiles_verify() {
        let (_, gateway) = gateway_with_profiles().await;
        assert!(authenticate(&gateway, "luis", "hashed-pw").await.is_some());
        assert!(authenticate(&gateway, "luis", "wrong").await.is_none());
    }

    #[tokio::test]
    async fn backend_failure_reads_as_no_match() {
        let (store, gateway) = gateway_with_profiles().await;
        store.set_offline(true);
        assert!(authenticate(&gateway, "ana", "Secreta1").await.is_none());
    }
}
