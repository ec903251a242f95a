use anyhow::{Context, Result};

use crate::render::DocumentHeader;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Request body limit for uploads.
    pub max_upload_bytes: usize,
    pub directory_title: String,
    pub directory_subtitle: String,
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let header = DocumentHeader::default();

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{raw}'"))?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            directory_title: lookup("DIRECTORY_TITLE").unwrap_or(header.title),
            directory_subtitle: lookup("DIRECTORY_SUBTITLE").unwrap_or(header.subtitle),
        })
    }

    pub fn document_header(&self) -> DocumentHeader {
        DocumentHeader {
            title: self.directory_title.clone(),
            subtitle: self.directory_subtitle.clone(),
        }
    }
}
