use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::domain::photo::MAX_PHOTO_BYTES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // Database; without one users are kept in memory
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Uploads
    pub upload_dir: PathBuf,
    pub upload_max_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::parse(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // Database
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Uploads
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public/uploads"));
        let upload_max_bytes = match env::var("UPLOAD_MAX_BYTES") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("UPLOAD_MAX_BYTES must be a byte count, got {raw:?}"))?,
            Err(_) => MAX_PHOTO_BYTES,
        };

        Ok(Settings {
            env,
            server_addr,
            database_url,
            database_max_connections,
            cors_allow_origins,
            upload_dir,
            upload_max_bytes,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "127.0.0.1:8080".to_string(),
            database_url: None,
            database_max_connections: 10,
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            upload_dir: PathBuf::from("public/uploads"),
            upload_max_bytes: MAX_PHOTO_BYTES,
        }
    }
}
