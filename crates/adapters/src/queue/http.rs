// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the queue service.

use super::{Ack, FileBytes, NextRow, QueueAdapter, QueueError, DEFAULT_QUEUE_URL};
use async_trait::async_trait;
use pubrun_core::RowId;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const FILE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct MarkDone<'a> {
    path: &'a str,
    id: &'a RowId,
}

/// Queue adapter speaking to the local spreadsheet server.
#[derive(Clone, Debug)]
pub struct HttpQueueClient {
    base_url: String,
    client: reqwest::Client,
    request_timeout: Duration,
    file_timeout: Duration,
}

impl Default for HttpQueueClient {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_URL)
    }
}

impl HttpQueueClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
            request_timeout: REQUEST_TIMEOUT,
            file_timeout: FILE_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, request: Duration, file: Duration) -> Self {
        self.request_timeout = request;
        self.file_timeout = file;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, QueueError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status = status.as_u16(), "queue request failed");
            return Err(QueueError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn transport_error(e: reqwest::Error) -> QueueError {
    if e.is_connect() {
        QueueError::Unreachable(e.to_string())
    } else if e.is_decode() {
        QueueError::Decode(e.to_string())
    } else {
        QueueError::Transport(e.to_string())
    }
}

#[async_trait]
impl QueueAdapter for HttpQueueClient {
    async fn ping(&self) -> Result<(), QueueError> {
        let request = self.client.get(self.url("/")).timeout(self.request_timeout);
        self.send("ping", request).await?;
        Ok(())
    }

    async fn next_row(&self, source_path: &str) -> Result<NextRow, QueueError> {
        let request = self
            .client
            .get(self.url("/next-row"))
            .query(&[("path", source_path)])
            .timeout(self.request_timeout);
        let response = self.send("next-row", request).await?;
        let value: serde_json::Value = response.json().await.map_err(transport_error)?;
        NextRow::from_json(value)
    }

    async fn mark_done(&self, source_path: &str, id: &RowId) -> Result<Ack, QueueError> {
        let request = self
            .client
            .post(self.url("/mark-done"))
            .json(&MarkDone { path: source_path, id })
            .timeout(self.request_timeout);
        let response = self.send("mark-done", request).await?;
        let ack: Ack = response.json().await.map_err(transport_error)?;
        tracing::info!(%id, status = %ack.status, "row marked done");
        Ok(ack)
    }

    async fn fetch_file(&self, path: &str) -> Result<FileBytes, QueueError> {
        let request = self
            .client
            .get(self.url("/get-file"))
            .query(&[("path", path)])
            .timeout(self.file_timeout);
        let response = self.send("get-file", request).await?;
        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(path, len = bytes.len(), "fetched design file");
        Ok(FileBytes::from_path(path, mime.as_deref(), bytes.to_vec()))
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
