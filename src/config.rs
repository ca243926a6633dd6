// src/config.rs
use std::env;
use std::net::IpAddr;

use dotenvy::dotenv;

use crate::error::AppError;

pub const DEFAULT_COMPANY: &str = "CIR PANAMÁ";

/// Allowed `SESSION_HOURS`: one hour up to thirty days.
pub const SESSION_HOURS_RANGE: std::ops::RangeInclusive<i64> = 1..=720;

/// Runtime settings. Backend location and signing secret only come from the
/// environment (or a `.env` file), never from source.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub session_hours: i64,
    pub company_name: String,
    pub seed_admin: Option<(String, String)>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let required = |name: &str| {
            env::var(name).map_err(|_| AppError::config(format!("{name} must be set")))
        };
        let optional = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        let host = match optional("HOST") {
            Some(h) => h
                .parse()
                .map_err(|e| AppError::config(format!("Invalid HOST: {e}")))?,
            None => IpAddr::from([127, 0, 0, 1]),
        };
        let port = match optional("PORT") {
            Some(p) => p
                .parse()
                .map_err(|e| AppError::config(format!("Invalid PORT: {e}")))?,
            None => 3000,
        };
        let session_hours = parse_session_hours(optional("SESSION_HOURS").as_deref())?;

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < 16 {
            return Err(AppError::config("JWT_SECRET must be at least 16 characters"));
        }

        let seed_admin = optional("SEED_ADMIN_USER").zip(optional("SEED_ADMIN_PASSWORD"));

        Ok(Self {
            host,
            port,
            database_url: required("DATABASE_URL")?,
            jwt_secret,
            session_hours,
            company_name: optional("COMPANY_NAME").unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            seed_admin,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory:")
    }
}

fn parse_session_hours(raw: Option<&str>) -> Result<i64, AppError> {
    let Some(raw) = raw else {
        return Ok(8);
    };
    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid SESSION_HOURS: {e}")))?;
    if !SESSION_HOURS_RANGE.contains(&hours) {
        return Err(AppError::config(format!(
            "SESSION_HOURS must be between {} and {}",
            SESSION_HOURS_RANGE.start(),
            SESSION_HOURS_RANGE.end()
        )));
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_hours_default_and_range() {
        assert_eq!(parse_session_hours(None).unwrap(), 8);
        assert_eq!(parse_session_hours(Some(" 24 ")).unwrap(), 24);
        assert_eq!(parse_session_hours(Some("720")).unwrap(), 720);

        for bad in ["0", "-3", "721", "9223372036854775807", "eight"] {
            let err = parse_session_hours(Some(bad)).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{bad}");
        }
    }
}
