// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The browser's HTTP target API (`/json/*`).

use super::CdpError;
use serde::Deserialize;
use std::time::Duration;

const TARGET_TIMEOUT: Duration = Duration::from_secs(10);

/// A debuggable target as listed by the browser
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetInfo {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "webSocketDebuggerUrl", default)]
    pub ws_url: Option<String>,
}

#[derive(Clone, Debug)]
pub(super) struct TargetClient {
    base_url: String,
    client: reqwest::Client,
}

impl TargetClient {
    pub(super) fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub(super) fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn checked(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, CdpError> {
        let response = request
            .timeout(TARGET_TIMEOUT)
            .send()
            .await
            .map_err(|e| CdpError::Connect(format!("{}: {e}", self.base_url)))?;
        if !response.status().is_success() {
            return Err(CdpError::Protocol(format!("target API HTTP {}", response.status())));
        }
        Ok(response)
    }

    /// Create a new page showing `url`.
    pub(super) async fn create(&self, url: &str) -> Result<TargetInfo, CdpError> {
        let response =
            self.checked(self.client.put(format!("{}/json/new?{url}", self.base_url))).await?;
        response.json().await.map_err(|e| CdpError::Protocol(e.to_string()))
    }

    /// Bring a page to the front.
    pub(super) async fn activate(&self, id: &str) -> Result<(), CdpError> {
        self.checked(self.client.get(format!("{}/json/activate/{id}", self.base_url))).await?;
        Ok(())
    }
}
