/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # CLI Commands Module
//!
//! Implements the single probe run.
//!
//! ## Startup Sequence
//!
//! ```mermaid
//! flowchart TD
//!     A[Load .env] --> B[Load Settings]
//!     B --> C[Apply Log Settings]
//!     C --> D[Build Client]
//!     D --> E[Build Request]
//!     E --> F[Execute Query]
//!     F --> G[Interpret Body]
//! ```
//!
//! Every step returns its error to the caller; only `bin.rs` decides to exit.

use super::Cli;
use crate::error::ProbeError;
use crate::interpret::{interpret, ApiServerStatus};
use crate::prometheus::{self, APISERVER_UP_QUERY};
use apiprobe_utils::config::{Query, Settings, DEFAULT_ENV_FILE, ENDPOINT_VAR, TOKEN_VAR};
use apiprobe_utils::load_env_file;
use apiprobe_utils::logging::{self, prelude::*};

/// Loads configuration and runs one probe.
pub async fn start(cli: &Cli) -> Result<ApiServerStatus, ProbeError> {
    let env_file = load_env_file(cli.env_file.as_deref())?;
    let config = Settings::new(cli.config.clone())?;

    if let Err(e) = logging::init_with_format(&config.log.level, &config.log.format) {
        warn!("Failed to apply log settings: {}", e);
    }

    match env_file {
        Some(path) => debug!("Loaded environment from {}", path.display()),
        None => debug!(
            "No {} file found, using process environment",
            DEFAULT_ENV_FILE
        ),
    }

    probe(&config.query).await
}

/// Queries the endpoint in `query` for the API server series and classifies the answer.
///
/// An empty URL or token is passed through as-is; an empty URL surfaces as
/// [`ProbeError::RequestBuild`].
pub async fn probe(query: &Query) -> Result<ApiServerStatus, ProbeError> {
    if query.url.is_empty() {
        warn!("{} is not set", ENDPOINT_VAR);
    }
    if query.token.is_empty() {
        warn!("{} is not set", TOKEN_VAR);
    }

    let client = prometheus::build_client(query.timeout(), query.skip_certificate_verification)?;
    let request =
        prometheus::build_request(&client, &query.url, &query.token, APISERVER_UP_QUERY)?;
    let body = prometheus::execute(&client, request).await?;

    let status = interpret(&body)?;
    debug!("Probe classified API server as {:?}", status);
    Ok(status)
}
