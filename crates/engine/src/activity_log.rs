// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing activity log.
//!
//! Each entry lands in the bounded buffer, is mirrored to `tracing`, is
//! handed to the durable sink (if any) and is broadcast to live
//! subscribers such as the terminal printer.
//!
//! Inside a tokio runtime the sink is written behind: snapshots queue up
//! for a writer task that persists only the newest one on the blocking
//! pool. `flush` waits until everything appended so far is on disk.

use parking_lot::Mutex;
use pubrun_core::{LogBuffer, LogEntry, LogKind, LogSink};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};

const BROADCAST_CAPACITY: usize = 256;

enum SinkMsg {
    Persist(LogBuffer),
    Flush(oneshot::Sender<()>),
}

enum Persister {
    Inline(Arc<dyn LogSink>),
    Background(mpsc::UnboundedSender<SinkMsg>),
}

pub struct ActivityLog {
    buffer: Mutex<LogBuffer>,
    persister: Option<Persister>,
    tx: broadcast::Sender<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_buffer(LogBuffer::new())
    }

    /// Continue from previously retained entries.
    pub fn with_buffer(buffer: LogBuffer) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { buffer: Mutex::new(buffer), persister: None, tx }
    }

    /// Persist through `sink`; written behind when a tokio runtime is running.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.persister = Some(match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let (tx, rx) = mpsc::unbounded_channel();
                handle.spawn(write_behind(sink, rx));
                Persister::Background(tx)
            }
            Err(_) => Persister::Inline(sink),
        });
        self
    }

    /// Wait until every entry appended so far has reached the sink.
    pub async fn flush(&self) {
        let Some(Persister::Background(tx)) = &self.persister else {
            return;
        };
        let (done, wait) = oneshot::channel();
        if tx.send(SinkMsg::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// Live feed of entries appended from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.tx.subscribe()
    }

    pub fn append(&self, at_ms: u64, text: impl Into<String>, kind: LogKind) -> LogEntry {
        let entry = LogEntry::new(at_ms, text, kind);
        match kind {
            LogKind::Error => tracing::warn!(target: "activity", %kind, "{}", entry.text),
            _ => tracing::info!(target: "activity", %kind, "{}", entry.text),
        }

        let snapshot = {
            let mut buffer = self.buffer.lock();
            buffer.push(entry.clone());
            self.persister.as_ref().map(|_| buffer.clone())
        };
        match (&self.persister, snapshot) {
            (Some(Persister::Inline(sink)), Some(buffer)) => sink.persist(&buffer),
            (Some(Persister::Background(tx)), Some(buffer)) => {
                if tx.send(SinkMsg::Persist(buffer)).is_err() {
                    tracing::warn!("activity log writer is gone, entry not persisted");
                }
            }
            _ => {}
        }

        // No subscribers is fine
        let _ = self.tx.send(entry.clone());
        entry
    }

    pub fn snapshot(&self) -> LogBuffer {
        self.buffer.lock().clone()
    }

    pub fn count(&self, kind: LogKind) -> usize {
        self.buffer.lock().count(kind)
    }

    pub fn texts(&self) -> Vec<String> {
        self.buffer.lock().iter().map(|e| e.text.clone()).collect()
    }
}

/// Persist the newest queued snapshot, then release any flush waiters.
async fn write_behind(sink: Arc<dyn LogSink>, mut rx: mpsc::UnboundedReceiver<SinkMsg>) {
    while let Some(first) = rx.recv().await {
        let mut latest = None;
        let mut waiters = Vec::new();
        let mut next = Some(first);
        while let Some(msg) = next {
            match msg {
                SinkMsg::Persist(buffer) => latest = Some(buffer),
                SinkMsg::Flush(done) => waiters.push(done),
            }
            next = rx.try_recv().ok();
        }

        if let Some(buffer) = latest {
            let sink = Arc::clone(&sink);
            if let Err(e) = tokio::task::spawn_blocking(move || sink.persist(&buffer)).await {
                tracing::warn!(error = %e, "activity log write failed");
            }
        }
        for done in waiters {
            let _ = done.send(());
        }
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "activity_log_tests.rs"]
mod tests;
