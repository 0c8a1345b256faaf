// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One DevTools WebSocket session per controlled page.
//!
//! Commands carry a numeric id and are matched to their reply by it.
//! Protocol events are read on a background task: `Page.frameNavigated`
//! tracks the main-frame URL, `Page.loadEventFired` becomes
//! `Event::PageLoaded`. When the socket closes every pending command
//! fails and later calls fail immediately.
//!
//! Page events go through an unbounded hop to their own forwarding task, so
//! a full event channel never holds back command replies.

use super::CdpError;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use pubrun_core::{Event, PageId};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;

const CALL_TIMEOUT: Duration = Duration::from_secs(30);

type Reply = Result<Value, CdpError>;

struct Shared {
    page: PageId,
    pending: Mutex<HashMap<u64, oneshot::Sender<Reply>>>,
    next_id: AtomicU64,
    alive: AtomicBool,
    url: Mutex<String>,
}

impl Shared {
    fn close(&self) {
        self.alive.store(false, Ordering::SeqCst);
        for (_, tx) in self.pending.lock().drain() {
            let _ = tx.send(Err(CdpError::Closed));
        }
    }
}

/// A decoded inbound frame
#[derive(Debug, PartialEq)]
pub(super) enum Frame {
    Reply { id: u64, result: Reply },
    Navigated { url: String },
    Loaded,
    Detached,
    Other,
}

pub(super) fn parse_frame(text: &str) -> Frame {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return Frame::Other;
    };
    if let Some(id) = value.get("id").and_then(Value::as_u64) {
        let result = match value.get("error") {
            Some(error) => Err(CdpError::Protocol(
                error.get("message").and_then(Value::as_str).unwrap_or("unknown error").to_string(),
            )),
            None => Ok(value.get("result").cloned().unwrap_or(Value::Null)),
        };
        return Frame::Reply { id, result };
    }
    match value.get("method").and_then(Value::as_str) {
        Some("Page.frameNavigated") => {
            let frame = &value["params"]["frame"];
            if frame.get("parentId").is_some_and(|p| !p.is_null()) {
                return Frame::Other;
            }
            match frame.get("url").and_then(Value::as_str) {
                Some(url) => Frame::Navigated { url: url.to_string() },
                None => Frame::Other,
            }
        }
        Some("Page.loadEventFired") => Frame::Loaded,
        Some("Inspector.detached") => Frame::Detached,
        _ => Frame::Other,
    }
}

#[derive(Clone)]
pub(super) struct Session {
    shared: Arc<Shared>,
    out_tx: mpsc::UnboundedSender<Message>,
    call_timeout: Duration,
}

impl Session {
    /// Attach to a page's debugger socket and start reading its events.
    pub(super) async fn connect(
        ws_url: &str,
        page: PageId,
        event_tx: mpsc::Sender<Event>,
    ) -> Result<Self, CdpError> {
        let (ws, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| CdpError::Connect(e.to_string()))?;
        let (mut sink, mut stream) = ws.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();

        let shared = Arc::new(Shared {
            page,
            pending: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            alive: AtomicBool::new(true),
            url: Mutex::new(String::new()),
        });

        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                if let Err(e) = sink.send(msg).await {
                    tracing::warn!(error = %e, "devtools send failed");
                    break;
                }
            }
        });

        let (loaded_tx, mut loaded_rx) = mpsc::unbounded_channel::<Event>();
        tokio::spawn(async move {
            while let Some(event) = loaded_rx.recv().await {
                if event_tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        let reader = shared.clone();
        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => match parse_frame(text.as_str()) {
                        Frame::Reply { id, result } => {
                            if let Some(tx) = reader.pending.lock().remove(&id) {
                                let _ = tx.send(result);
                            }
                        }
                        Frame::Navigated { url } => {
                            tracing::debug!(page = %reader.page, %url, "frame navigated");
                            *reader.url.lock() = url;
                        }
                        Frame::Loaded => {
                            let url = reader.url.lock().clone();
                            tracing::info!(page = %reader.page, %url, "page loaded");
                            let _ = loaded_tx.send(Event::PageLoaded { page: reader.page.clone(), url });
                        }
                        Frame::Detached => break,
                        Frame::Other => {}
                    },
                    Ok(Message::Close(frame)) => {
                        tracing::info!(page = %reader.page, ?frame, "devtools socket closed");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(page = %reader.page, error = %e, "devtools socket error");
                        break;
                    }
                    _ => {}
                }
            }
            reader.close();
        });

        Ok(Self { shared, out_tx, call_timeout: CALL_TIMEOUT })
    }

    pub(super) fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub(super) fn is_alive(&self) -> bool {
        self.shared.alive.load(Ordering::SeqCst)
    }

    /// Last main-frame URL seen on this page.
    pub(super) fn url(&self) -> String {
        self.shared.url.lock().clone()
    }

    /// Send a command and wait for its reply.
    pub(super) async fn call(&self, method: &str, params: Value) -> Result<Value, CdpError> {
        if !self.is_alive() {
            return Err(CdpError::Closed);
        }
        let id = self.shared.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        self.shared.pending.lock().insert(id, tx);

        let payload = json!({ "id": id, "method": method, "params": params }).to_string();
        if self.out_tx.send(Message::Text(payload.into())).is_err() {
            self.shared.pending.lock().remove(&id);
            return Err(CdpError::Closed);
        }

        match tokio::time::timeout(self.call_timeout, rx).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) => Err(CdpError::Closed),
            Err(_) => {
                self.shared.pending.lock().remove(&id);
                Err(CdpError::Timeout(method.to_string()))
            }
        }
    }

    /// Evaluate an expression, awaiting promises and returning the value.
    pub(super) async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                json!({ "expression": expression, "awaitPromise": true, "returnByValue": true }),
            )
            .await?;
        if let Some(details) = result.get("exceptionDetails") {
            let text = details["exception"]["description"]
                .as_str()
                .or_else(|| details["text"].as_str())
                .unwrap_or("uncaught exception");
            return Err(CdpError::Script(text.to_string()));
        }
        Ok(result["result"].get("value").cloned().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
