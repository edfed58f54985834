/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Response Interpreter
//!
//! Turns the body of a Prometheus instant query into an [`ApiServerStatus`].
//!
//! Only the first sample is looked at. Its value pair is `[timestamp, "value"]`
//! and the API server counts as up when the value is exactly `"1"`. A result
//! that parses but cannot be classified never fails the run: an empty result
//! set or a non-success status is `Unknown`, an unusable value is `Down`.

use crate::error::ProbeError;
use apiprobe_utils::logging::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Outcome of a probe run that reached the metrics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiServerStatus {
    Up,
    Down,
    /// Query did not succeed or returned no series
    Unknown,
}

impl fmt::Display for ApiServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiServerStatus::Up => write!(f, "kube-apiserver is up"),
            ApiServerStatus::Down => write!(f, "kube-apiserver is down"),
            ApiServerStatus::Unknown => write!(
                f,
                "Failed to retrieve kube-apiserver status or no results found"
            ),
        }
    }
}

/// Instant-query response envelope.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: QueryData,
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<Sample>,
}

/// One series of an instant vector.
#[derive(Debug, Deserialize)]
pub struct Sample {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: Vec<Value>,
}

/// Treats an explicit `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Second element of a value pair after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    Text(String),
    NonString(Value),
    Missing,
}

impl Sample {
    pub fn sample_value(&self) -> SampleValue {
        match self.value.get(1) {
            Some(Value::String(s)) => SampleValue::Text(s.clone()),
            Some(other) => SampleValue::NonString(other.clone()),
            None => SampleValue::Missing,
        }
    }
}

impl QueryResponse {
    /// Classifies the response. Never fails.
    pub fn status(&self) -> ApiServerStatus {
        if self.status != "success" {
            warn!(
                "Query returned status {:?} (type: {}, error: {})",
                self.status,
                self.error_type.as_deref().unwrap_or("none"),
                self.error.as_deref().unwrap_or("none")
            );
            return ApiServerStatus::Unknown;
        }

        let Some(first) = self.data.result.first() else {
            debug!("Query succeeded but returned no series");
            return ApiServerStatus::Unknown;
        };

        match first.sample_value() {
            SampleValue::Text(v) if v == "1" => ApiServerStatus::Up,
            SampleValue::Text(v) => {
                debug!("Sample value is {:?}", v);
                ApiServerStatus::Down
            }
            SampleValue::NonString(v) => {
                warn!("Sample value is not a string: {}", v);
                ApiServerStatus::Down
            }
            SampleValue::Missing => {
                warn!("Sample has no value: {:?}", first.value);
                ApiServerStatus::Down
            }
        }
    }
}

/// Parses a raw body and classifies it.
pub fn interpret(body: &[u8]) -> Result<ApiServerStatus, ProbeError> {
    let response: QueryResponse = serde_json::from_slice(body)?;
    Ok(response.status())
}
