// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pubrun start` - Run the publish loop until the queue is empty or the
//! run stops

use crate::exit_error::ExitError;
use crate::output::print_entry;
use anyhow::Result;
use clap::Args;
use pubrun_adapters::{ChromeAdapter, HttpQueueClient};
use pubrun_core::{Event, LogEntry, SystemClock};
use pubrun_engine::{ActivityLog, RunOutcome, Runtime, RuntimeConfig, RuntimeDeps};
use pubrun_storage::{LogStore, Settings, SettingsStore};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

const OPERATOR_STOP: &str = "Stopped by operator.";

#[derive(Args)]
pub struct StartArgs {
    /// Store page to start from (falls back to the saved link)
    #[arg(long = "store-url")]
    pub store_url: Option<String>,
    /// Source sheet path (falls back to the saved path)
    #[arg(long = "source")]
    pub source: Option<String>,
}

/// Settings for this run: explicit flags over saved values.
pub fn resolve_settings(args: &StartArgs, saved: &Settings) -> Result<Settings, ExitError> {
    let settings = saved.merged(args.store_url.as_deref(), args.source.as_deref());
    if !settings.is_complete() {
        return Err(ExitError::new(1, "Please set Store Link and Source Path."));
    }
    Ok(settings)
}

pub async fn start(args: StartArgs, state_dir: &Path) -> Result<()> {
    let settings_store = SettingsStore::new(state_dir);
    let settings = resolve_settings(&args, &settings_store.load()?)?;
    settings_store.save(&settings)?;

    let _guard = crate::logging::init(state_dir)?;
    tracing::info!(
        version = crate::VERSION,
        store_url = %settings.store_url,
        source_path = %settings.source_path,
        "pubrun start"
    );

    let log_store = Arc::new(LogStore::new(state_dir));
    let activity = ActivityLog::with_buffer(log_store.load()?).with_sink(log_store);
    let mut entries = activity.subscribe();

    let (event_tx, mut event_rx) = mpsc::channel(256);
    let queue = HttpQueueClient::new(crate::env::queue_url());
    let pages = ChromeAdapter::new(&crate::env::browser_url(), queue.clone(), event_tx.clone());
    let config = RuntimeConfig::default()
        .published_pattern(crate::env::published_pattern())
        .phase_timeout(crate::env::phase_timeout());
    let runtime = Runtime::new(
        RuntimeDeps { queue, pages },
        SystemClock,
        config,
        activity,
        event_tx.clone(),
    );
    let scheduler = runtime.executor.scheduler();

    event_tx
        .send(Event::RunStart {
            store_url: settings.store_url.clone(),
            source_path: settings.source_path.clone(),
        })
        .await?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    let outcome = loop {
        let deadline = scheduler.lock().next_deadline();
        let timer = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            event = event_rx.recv() => match event {
                Some(event) => runtime.process(event).await?,
                None => break RunOutcome::Stopped { reason: "event channel closed".to_string() },
            },
            _ = timer => {
                let fired = scheduler.lock().fired_timers(std::time::Instant::now());
                for event in fired {
                    runtime.process(event).await?;
                }
            }
            _ = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                tracing::info!("interrupt received");
                runtime.process(Event::RunStop { reason: OPERATOR_STOP.to_string() }).await?;
            }
        }

        print_new_entries(&mut entries);
        if runtime.run().running {
            continue;
        }
        if let Some(outcome) = runtime.outcome() {
            break outcome;
        }
        if interrupted {
            break RunOutcome::Stopped { reason: OPERATOR_STOP.to_string() };
        }
    };
    print_new_entries(&mut entries);
    runtime.activity().flush().await;
    tracing::info!(?outcome, "pubrun start finished");

    match outcome {
        RunOutcome::Exhausted => Ok(()),
        RunOutcome::Stopped { .. } => Err(ExitError::silent(1).into()),
    }
}

fn print_new_entries(entries: &mut broadcast::Receiver<LogEntry>) {
    loop {
        match entries.try_recv() {
            Ok(entry) => print_entry(&entry),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "activity printer fell behind");
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
