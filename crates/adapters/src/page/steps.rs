// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store and uploader steps.
//!
//! Both steps are fixed sequences against the storefront's markup. Each
//! wait is bounded and a missing element fails the step with a message
//! naming it.

use super::dom::{Dom, DomError, TagFill};
use super::wait::{poll_until, POLL_INTERVAL};
use super::Progress;
use crate::queue::{QueueAdapter, QueueError};
use pubrun_core::{clean_path, Instruction, Row};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

const COPY_SETTINGS: &str = "span.link__content";
const COPY_SETTINGS_TEXT: &str = "Copy Settings";
const COPIER_SUBMIT: &str =
    r#"input.m-design-copier-modal__form-submit[value="Continue to uploader"]"#;
const CONTINUE_BUTTON: &str =
    r#"input.m-design-copier-modal__form-submit[type="submit"][value="Continue to uploader"]"#;
const CHECKBOXES: &str = r#"input[type="checkbox"]"#;
const CHECKED: [usize; 3] = [0, 4, 5];
const UNCHECKED: [usize; 3] = [1, 2, 3];
const CENTER_CONTROLS: &str =
    r#"[title="Center Horizontally"], [title="Top Align"], [title="Center Vertically"]"#;

const UPLOADER_MARKER: &str = r#"input.jsUploaderFileInput[type="file"]"#;
const FILE_INPUT: &str = r#"input.jsUploaderFileInput.m-uploader__dropzone-input[type="file"]"#;
const DROPZONE: &str = ".m-uploader__dropzone.jsUploaderDropzone";
const TITLE: &str = "Title";
const DESCRIPTION: &str = "Describe your design";
const MAIN_TAG: &str = "Main tag";
const TAG_CONTAINER: &str = "#secondary_tags";
const TAG_INPUT: &str = "input.taggle_input";
const CONTENT_FLAG: &str = "design_content_flag_false";
const TERMS: &str = "terms";
const PUBLISH: &str = r#"button.publish-and-promote-button.btn.btn--big.btn--green[name="commit"][value="publish"]"#;

#[derive(Debug, Error)]
pub enum StepError {
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    File(#[from] QueueError),
    #[error(transparent)]
    Dom(#[from] DomError),
}

fn failed(reason: impl Into<String>) -> StepError {
    StepError::Failed(reason.into())
}

/// Bounds for the waits inside a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTiming {
    pub ready: Duration,
    pub element: Duration,
    pub settle: Duration,
    pub upload: Duration,
    pub poll: Duration,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self {
            ready: Duration::from_secs(15),
            element: Duration::from_secs(25),
            settle: Duration::from_millis(300),
            upload: Duration::from_secs(180),
            poll: POLL_INTERVAL,
        }
    }
}

impl StepTiming {
    /// Millisecond bounds, for tests against in-memory pages.
    pub fn quick() -> Self {
        Self {
            ready: Duration::from_millis(50),
            element: Duration::from_millis(50),
            settle: Duration::ZERO,
            upload: Duration::from_millis(100),
            poll: Duration::from_millis(1),
        }
    }
}

async fn wait_ready<D: Dom>(dom: &D, timing: &StepTiming, reason: &str) -> Result<(), StepError> {
    poll_until("document ready", timing.ready, timing.poll, || async {
        dom.ready().await.map(|ready| ready.then_some(()))
    })
    .await
    .map_err(|_| failed(reason))
}

async fn wait_for<D: Dom>(dom: &D, timing: &StepTiming, selector: &str) -> bool {
    poll_until(selector, timing.element, timing.poll, || async {
        dom.exists(selector).await.map(|found| found.then_some(()))
    })
    .await
    .is_ok()
}

async fn settle(timing: &StepTiming) {
    if !timing.settle.is_zero() {
        tokio::time::sleep(timing.settle).await;
    }
}

async fn apply_checkbox_rules<D: Dom>(dom: &D) -> Result<(), StepError> {
    let states = dom.checkbox_states(CHECKBOXES).await?;
    for index in CHECKED {
        if states.get(index) == Some(&false) {
            dom.toggle_nth(CHECKBOXES, index).await?;
        }
    }
    for index in UNCHECKED {
        if states.get(index) == Some(&true) {
            dom.toggle_nth(CHECKBOXES, index).await?;
        }
    }
    Ok(())
}

async fn center_design<D: Dom>(dom: &D) -> Result<(), StepError> {
    let clicked = dom.click_all(CENTER_CONTROLS).await?;
    tracing::debug!(clicked, "centered design");
    Ok(())
}

/// Copy settings on the store page, apply the option pattern, continue.
pub async fn store_step<D: Dom>(
    dom: &D,
    timing: &StepTiming,
    progress: &Progress,
) -> Result<(), StepError> {
    wait_ready(dom, timing, "Page not ready (store step).").await?;

    poll_until(COPY_SETTINGS_TEXT, timing.element, timing.poll, || async {
        dom.click_text(COPY_SETTINGS, COPY_SETTINGS_TEXT).await.map(|hit| hit.then_some(()))
    })
    .await
    .map_err(|_| failed(r#"Could not find: <span class="link__content">Copy Settings</span>"#))?;
    settle(timing).await;

    // The copier modal renders its options alongside the submit input
    wait_for(dom, timing, COPIER_SUBMIT).await;

    apply_checkbox_rules(dom).await?;
    center_design(dom).await?;

    if !wait_for(dom, timing, CONTINUE_BUTTON).await || !dom.click(CONTINUE_BUTTON).await? {
        return Err(failed(r#"Could not find: "Continue to uploader" submit input."#));
    }
    settle(timing).await;

    progress.ok("Store step done: Copy Settings -> checkbox rules -> center -> Continue.").await;
    Ok(())
}

async fn wait_upload_finished<D: Dom>(dom: &D, timing: &StepTiming) -> Result<(), StepError> {
    let saw_block = AtomicBool::new(false);
    poll_until("upload", timing.upload, timing.poll, || {
        let saw_block = &saw_block;
        async move {
            let display = dom.display_of(DROPZONE).await?;
            match display.as_deref() {
                Some("block") => saw_block.store(true, Ordering::SeqCst),
                Some("none") if saw_block.load(Ordering::SeqCst) => return Ok(Some(())),
                _ => {}
            }
            Ok::<_, DomError>(None)
        }
    })
    .await
    .map_err(|_| failed("Upload timeout: dropzone didn't toggle block -> none."))
}

async fn fill_field<D: Dom>(dom: &D, tag: &str, placeholder: &str, value: &str) -> Result<(), StepError> {
    let selector = format!(r#"{tag}[placeholder="{placeholder}"]"#);
    if dom.set_value(&selector, value).await? {
        return Ok(());
    }
    let kind = if tag == "textarea" { "Textarea" } else { "Input" };
    Err(failed(format!(r#"{kind} not found: placeholder="{placeholder}""#)))
}

/// Upload the row's design, fill the form and publish.
pub async fn uploader_step<D: Dom, Q: QueueAdapter>(
    dom: &D,
    files: &Q,
    row: &Row,
    timing: &StepTiming,
    progress: &Progress,
) -> Result<(), StepError> {
    wait_ready(dom, timing, "Page not ready (uploader step).").await?;
    if !wait_for(dom, timing, UPLOADER_MARKER).await {
        return Err(failed("Not on uploader page (file input missing)."));
    }

    let path = clean_path(&row.image_path);
    let file = files.fetch_file(&path).await?;
    if !wait_for(dom, timing, FILE_INPUT).await || !dom.attach_file(FILE_INPUT, &file).await? {
        return Err(failed("Uploader file input not found (.jsUploaderFileInput)."));
    }
    progress.ok("Image selected.").await;

    wait_upload_finished(dom, timing).await?;
    progress.ok("Upload finished.").await;

    fill_field(dom, "input", TITLE, &row.title).await?;
    fill_field(dom, "textarea", DESCRIPTION, &row.description).await?;
    fill_field(dom, "input", MAIN_TAG, &row.main_tag).await?;
    match dom.add_tags(TAG_CONTAINER, TAG_INPUT, row.tags()).await? {
        TagFill::Added(count) => tracing::debug!(count, "tags added"),
        TagFill::MissingContainer => {
            return Err(failed(format!("Could not find container: {TAG_CONTAINER}")))
        }
        TagFill::MissingInput => {
            return Err(failed("Could not find the Taggle input (.taggle_input)"))
        }
    }

    center_design(dom).await?;

    if !dom.set_checked_by_id(CONTENT_FLAG).await? {
        return Err(failed("design_content_flag_false not found."));
    }
    if !dom.set_checked_by_id(TERMS).await? {
        return Err(failed("#terms checkbox not found."));
    }
    if !dom.click(PUBLISH).await? {
        return Err(failed("Publish button not found."));
    }
    progress.ok("Clicked Publish.").await;
    Ok(())
}

/// Run one instruction to completion against `dom`.
pub async fn run_instruction<D: Dom, Q: QueueAdapter>(
    dom: &D,
    files: &Q,
    instruction: &Instruction,
    timing: &StepTiming,
    progress: &Progress,
) -> Result<(), StepError> {
    match instruction {
        Instruction::StoreStep { id } => {
            tracing::info!(%id, "running store step");
            store_step(dom, timing, progress).await
        }
        Instruction::UploaderStep { row, .. } => {
            tracing::info!(id = %row.id, "running uploader step");
            uploader_step(dom, files, row, timing, progress).await
        }
    }
}

#[cfg(test)]
#[path = "steps_tests.rs"]
mod tests;
