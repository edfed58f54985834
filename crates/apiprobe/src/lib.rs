//! # Apiprobe
//!
//! One-shot health probe for a Kubernetes API server. It asks a
//! Prometheus-compatible backend for the latest `up{job="apiserver"}` sample
//! and reports whether the API server is up.
//!
//! ## Modules
//!
//! - [`prometheus`]: builds and sends the authenticated instant query
//! - [`interpret`]: decodes the response and classifies it
//! - [`error`]: the fatal error taxonomy
//! - [`cli`]: argument parsing and the probe run itself
//!
//! ## Operation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Probe
//!     participant Prometheus
//!
//!     Probe->>Probe: Load .env and settings
//!     Probe->>Prometheus: GET ?query=up{job="apiserver"} (Bearer token)
//!     Prometheus-->>Probe: 200 + JSON body
//!     Probe->>Probe: Classify result[0].value[1]
//! ```
//!
//! ## Configuration
//!
//! ```sh
//! PROM_URL=https://prometheus.monitoring.svc:9090/api/v1/query
//! BEARER_TOKEN=...
//! APIPROBE__QUERY__SKIP_CERTIFICATE_VERIFICATION=true
//! ```

pub mod cli;
pub mod error;
pub mod interpret;
pub mod prometheus;

pub use error::ProbeError;
pub use interpret::ApiServerStatus;
