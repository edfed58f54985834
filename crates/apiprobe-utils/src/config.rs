/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Apiprobe Config Module
//! This module provides the configuration framework for the probe.
//!
//! # Variable Naming Convention
//!
//! - Struct fields use snake_case (e.g., `query`, `log`)
//! - Environment variables use SCREAMING_SNAKE_CASE and are prefixed with "APIPROBE__"
//!   (e.g., `APIPROBE__QUERY__TIMEOUT_SECONDS`)
//! - Configuration file keys use snake_case (e.g., `query.timeout_seconds`, `log.level`)
//!
//! # Configuration Overriding
//!
//! The configuration values are loaded and overridden in the following order (later sources take precedence):
//!
//! 1. Default values from the embedded `default.toml` file
//! 2. Values from an optional external configuration file (if provided)
//! 3. `APIPROBE__` prefixed environment variables
//! 4. The probe secrets `PROM_URL` and `BEARER_TOKEN`
//!
//! The process environment may be pre-seeded from a `.env` file with
//! [`load_env_file`] before [`Settings::new`] is called. Variables that are
//! already set in the process environment are never replaced by the file.
//!
//! # Available Environment Variables
//!
//! - `PROM_URL`: Full Prometheus instant-query endpoint, without a query string.
//!   Default: "" (request construction fails downstream)
//!
//! - `BEARER_TOKEN`: Token sent as `Authorization: Bearer <token>`.
//!   Default: ""
//!
//! - `APIPROBE__QUERY__TIMEOUT_SECONDS`: Upper bound for the whole HTTP exchange.
//!   Default: 10
//!
//! - `APIPROBE__QUERY__SKIP_CERTIFICATE_VERIFICATION`: Accept any TLS certificate
//!   presented by the endpoint. Only meant for self-signed cluster-internal endpoints.
//!   Default: false
//!
//! - `APIPROBE__LOG__LEVEL`: Sets the log level for the application
//!   Default: "info"
//!   Possible values: "off", "trace", "debug", "info", "warn", "error"
//!
//! - `APIPROBE__LOG__FORMAT`: "text" or "json"
//!   Default: "text"

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Include the default settings file as a string constant
const DEFAULT_SETTINGS: &str = include_str!("../default.toml");

/// Environment file read when no explicit path is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Environment variable holding the query endpoint.
pub const ENDPOINT_VAR: &str = "PROM_URL";

/// Environment variable holding the bearer token.
pub const TOKEN_VAR: &str = "BEARER_TOKEN";

/// Represents the main settings structure for the application
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Logging configuration
    pub log: Log,
    /// Query endpoint configuration
    pub query: Query,
}

/// Represents the logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,
    /// Log format: "text" for human-readable, "json" for structured JSON
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Represents the query endpoint configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Query {
    /// Instant-query endpoint URL. Not validated here.
    pub url: String,
    /// Bearer token. Not validated here.
    pub token: String,
    /// Timeout for the whole request in seconds
    pub timeout_seconds: u64,
    /// Accept invalid or self-signed TLS certificates
    #[serde(default)]
    pub skip_certificate_verification: bool,
}

impl Query {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Settings {
    /// Creates a new `Settings` instance
    ///
    /// # Arguments
    ///
    /// * `file` - An optional path to a configuration file
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the `Settings` instance or a `ConfigError`
    pub fn new(file: Option<String>) -> Result<Self, ConfigError> {
        // Start with default settings from the embedded TOML file
        let mut s = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml));

        // If a configuration file is provided, add it as a source
        s = match file {
            Some(x) => s.add_source(File::with_name(x.as_str())),
            None => s,
        };

        // Add environment variables as a source, prefixed with "APIPROBE" and using "__" as a separator
        s = s.add_source(Environment::with_prefix("APIPROBE").separator("__"));

        // Unprefixed secrets win over everything else when present
        if let Ok(url) = env::var(ENDPOINT_VAR) {
            s = s.set_override("query.url", url)?;
        }
        if let Ok(token) = env::var(TOKEN_VAR) {
            s = s.set_override("query.token", token)?;
        }

        s.build()?.try_deserialize()
    }
}

/// Pre-seeds the process environment from an env file.
///
/// With `explicit` set, the file is required and any failure to read or parse
/// it is an error. Without it, `.env` in the working directory is tried and a
/// missing file is ignored; a present but unparsable `.env` is still an error.
///
/// Returns the path that was loaded, if any. Nothing is logged here because
/// this runs before the configured log level is known.
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_ENV_FILE), false),
    };

    match dotenv::from_path(&path) {
        Ok(()) => Ok(Some(path)),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound && !required => Ok(None),
        Err(e) => Err(ConfigError::Message(format!(
            "Error loading {} file: {}",
            path.display(),
            e
        ))),
    }
}
