// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking HTTP client for the wizard operator API
//!
//! Endpoints:
//! - `GET {base}/clusters/local` returns a [`ClusterHandle`]
//! - `GET {base}/clusters/{name}/operations/last` returns an [`Operation`]

use super::{ClusterHandle, OperatorClient};
use crate::BackendError;
use op_core::Operation;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpOperator {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpOperator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: config.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| BackendError::Unavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(BackendError::NotFound(url));
        }
        if !status.is_success() {
            return Err(BackendError::Unavailable(format!(
                "{}: HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| BackendError::Unavailable(format!("failed to read {}: {}", url, e)))?;
        serde_json::from_str(&body)
            .map_err(|e| BackendError::InvalidResponse(format!("{}: {}", url, e)))
    }
}

impl OperatorClient for HttpOperator {
    fn local_cluster(&self) -> Result<ClusterHandle, BackendError> {
        self.get_json("clusters/local")
    }

    fn last_operation(&self, cluster: &ClusterHandle) -> Result<Operation, BackendError> {
        self.get_json(&format!("clusters/{}/operations/last", cluster.name))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
