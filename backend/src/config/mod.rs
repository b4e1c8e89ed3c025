//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the MongoDB connection string, server port, and the Firebase service
//! account credential (supplied as a base64 blob or a file path).

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use std::env;

/// Subset of a Firebase service-account JSON we actually need.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    project_id: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub database_name: String,
    pub firebase_project_id: String,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mongodb_uri = env::var("MONGODB_URI").context("MONGODB_URI not set")?;

        let database_name =
            env::var("DATABASE_NAME").unwrap_or_else(|_| "athleticEventsDB".to_string());

        let firebase_project_id = Self::load_firebase_project_id()?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            mongodb_uri,
            database_name,
            firebase_project_id,
            server_port,
        })
    }

    /// Resolves the Firebase project id from the service-account credential.
    ///
    /// The credential is supplied either as a base64-encoded JSON blob in
    /// `FB_SERVICE_KEY` or as a file path in `FB_SERVICE_KEY_FILE`.
    fn load_firebase_project_id() -> Result<String> {
        let raw = if let Ok(blob) = env::var("FB_SERVICE_KEY") {
            let decoded = BASE64
                .decode(blob.trim())
                .context("FB_SERVICE_KEY is not valid base64")?;
            String::from_utf8(decoded).context("FB_SERVICE_KEY does not decode to UTF-8")?
        } else if let Ok(path) = env::var("FB_SERVICE_KEY_FILE") {
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read FB_SERVICE_KEY_FILE at {path}"))?
        } else {
            bail!("neither FB_SERVICE_KEY nor FB_SERVICE_KEY_FILE is set");
        };

        let key: ServiceAccountKey =
            serde_json::from_str(&raw).context("service account key is not valid JSON")?;

        Ok(key.project_id)
    }
}
