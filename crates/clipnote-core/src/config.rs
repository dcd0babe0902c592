//! Configuration module
//!
//! This module provides the configuration for the HTTP surface and the upload
//! channels: listen port, upload root, public URL prefix and per-channel byte
//! ceilings. Values come from the environment (after loading `.env`).

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{IMAGE_MAX_BYTES, MAX_NAME_ATTEMPTS, UPLOAD_ROOT, VIDEO_MAX_BYTES};
use crate::models::Channel;
use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Base configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
}

/// Upload channel configuration
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub storage_backend: StorageBackend,
    pub upload_root: PathBuf,
    pub public_base_url: String,
    pub image_max_bytes: u64,
    pub video_max_bytes: u64,
    pub max_name_attempts: u32,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let http_concurrency_limit = parse_or(
            &var,
            "HTTP_CONCURRENCY_LIMIT",
            DEFAULT_HTTP_CONCURRENCY_LIMIT,
        )?;

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Local,
        };

        let upload_root = var("UPLOAD_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(UPLOAD_ROOT));

        let public_base_url = var("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}/uploads", server_port));

        let image_max_bytes = parse_or(&var, "IMAGE_MAX_BYTES", IMAGE_MAX_BYTES)?;
        let video_max_bytes = parse_or(&var, "VIDEO_MAX_BYTES", VIDEO_MAX_BYTES)?;
        let max_name_attempts = parse_or(&var, "UPLOAD_MAX_NAME_ATTEMPTS", MAX_NAME_ATTEMPTS)?;

        let config = Config {
            base: BaseConfig {
                server_port,
                cors_origins,
                environment,
                http_concurrency_limit,
            },
            upload: UploadConfig {
                storage_backend,
                upload_root,
                public_base_url,
                image_max_bytes,
                video_max_bytes,
                max_name_attempts,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.upload.image_max_bytes == 0 {
            return Err(anyhow::anyhow!("IMAGE_MAX_BYTES must be greater than 0"));
        }

        if self.upload.video_max_bytes == 0 {
            return Err(anyhow::anyhow!("VIDEO_MAX_BYTES must be greater than 0"));
        }

        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be at least 1"));
        }

        if self.upload.max_name_attempts == 0 {
            return Err(anyhow::anyhow!(
                "UPLOAD_MAX_NAME_ATTEMPTS must be at least 1"
            ));
        }

        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.upload.storage_backend
    }

    pub fn upload_root(&self) -> &Path {
        &self.upload.upload_root
    }

    pub fn public_base_url(&self) -> &str {
        &self.upload.public_base_url
    }

    pub fn max_name_attempts(&self) -> u32 {
        self.upload.max_name_attempts
    }

    /// Byte ceiling for the given channel.
    pub fn ceiling_for(&self, channel: Channel) -> u64 {
        match channel {
            Channel::Image => self.upload.image_max_bytes,
            Channel::Video => self.upload.video_max_bytes,
        }
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", key)),
        None => Ok(default),
    }
}
