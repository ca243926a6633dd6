use chrono::Utc;
use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::session::Session;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub sid: Uuid,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Bearer token for a session; it expires together with the session.
pub fn sign_token(session: &Session, secret: &str) -> Result<String, AppError> {
    let claims = Claims {
        sub: session.profile.usuario.clone(),
        sid: session.id,
        role: session.profile.rol.clone(),
        iat: Utc::now().timestamp() as usize,
        exp: session.expires_at.timestamp().max(0) as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256)
    )
    .map(|d| d.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserProfile;
    use crate::session::SessionRegistry;

    #[tokio::test]
    async fn round_trips_session_id() {
        let registry = SessionRegistry::new(chrono::Duration::hours(1));
        let profile = UserProfile {
            id: Some(1),
            usuario: "ana".into(),
            clave: "x".into(),
            rol: "master_it".into(),
        };
        let session = registry.open(&profile).await;
        let token = sign_token(&session, "test-secret").unwrap();

        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sid, session.id);
        assert_eq!(claims.sub, "ana");
        assert_eq!(claims.role, "master_it");

        assert!(verify_token(&token, "other-secret").is_err());
        assert!(verify_token("not-a-token", "test-secret").is_err());
    }
}
