use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::batcher::DEFAULT_BATCH_SIZE;
use crate::models::Credentials;

pub const DEFAULT_ENDPOINT_URL: &str =
    "https://apps.correios.com.br/SigepMasterJPA/AtendeClienteService/AtendeCliente";
pub const DEFAULT_INPUT_FILE: &str = "objetos.csv";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint_url: String,
    pub credentials: Credentials,
    pub batch_size: usize,
    pub input_file: PathBuf,
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `SRO_USERNAME`: Required - SRO service user
    /// - `SRO_PASSWORD`: Required - SRO service password
    /// - `SRO_ENDPOINT_URL`: Optional - SOAP endpoint (default: Correios production)
    /// - `BATCH_SIZE`: Optional - Identifiers per request (default: 5)
    /// - `INPUT_FILE`: Optional - Identifier CSV file (default: "objetos.csv")
    /// - `HTTP_TIMEOUT_SECS`: Optional - Per-request timeout (default: 30)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Parse credentials (required)
        let username = lookup("SRO_USERNAME").context("SRO_USERNAME not set")?;

        if username.trim().is_empty() {
            bail!("SRO_USERNAME cannot be empty");
        }

        let password = lookup("SRO_PASSWORD").context("SRO_PASSWORD not set")?;

        if password.is_empty() {
            bail!("SRO_PASSWORD cannot be empty");
        }

        // Parse endpoint (optional, has default)
        let endpoint_url = lookup("SRO_ENDPOINT_URL")
            .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string());

        if endpoint_url.trim().is_empty() {
            bail!("SRO_ENDPOINT_URL cannot be empty");
        }

        // Parse batch size (optional, has default)
        let batch_size = match lookup("BATCH_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("BATCH_SIZE must be a positive integer, got {:?}", raw))?,
            None => DEFAULT_BATCH_SIZE,
        };

        if batch_size == 0 {
            bail!("BATCH_SIZE must be at least 1");
        }

        // Parse input file (optional, has default)
        let input_file = lookup("INPUT_FILE")
            .unwrap_or_else(|| DEFAULT_INPUT_FILE.to_string());

        // Parse HTTP timeout (optional, has default)
        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be a positive integer, got {:?}", raw))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        if timeout_secs == 0 {
            bail!("HTTP_TIMEOUT_SECS must be at least 1");
        }

        Ok(Config {
            endpoint_url,
            credentials: Credentials::new(username, password),
            batch_size,
            input_file: PathBuf::from(input_file),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
