// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::scripts;
use super::session::Session;
use crate::page::dom::{Dom, DomError, TagFill};
use crate::queue::FileBytes;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

/// `Dom` over a DevTools session, one evaluated snippet per primitive.
pub(super) struct CdpDom {
    session: Session,
}

impl CdpDom {
    pub(super) fn new(session: Session) -> Self {
        Self { session }
    }

    async fn eval(&self, script: &str) -> Result<Value, DomError> {
        Ok(self.session.evaluate(script).await?)
    }

    async fn eval_bool(&self, script: &str) -> Result<bool, DomError> {
        match self.eval(script).await? {
            Value::Bool(b) => Ok(b),
            other => Err(unexpected("boolean", &other)),
        }
    }
}

fn unexpected(wanted: &str, got: &Value) -> DomError {
    DomError::Script(format!("expected {wanted}, got {got}"))
}

#[async_trait]
impl Dom for CdpDom {
    async fn ready(&self) -> Result<bool, DomError> {
        self.eval_bool(scripts::READY).await
    }

    async fn exists(&self, selector: &str) -> Result<bool, DomError> {
        self.eval_bool(&scripts::exists(selector)).await
    }

    async fn click(&self, selector: &str) -> Result<bool, DomError> {
        self.eval_bool(&scripts::click(selector)).await
    }

    async fn click_text(&self, selector: &str, text: &str) -> Result<bool, DomError> {
        self.eval_bool(&scripts::click_text(selector, text)).await
    }

    async fn click_all(&self, selector: &str) -> Result<usize, DomError> {
        let value = self.eval(&scripts::click_all(selector)).await?;
        value.as_u64().map(|n| n as usize).ok_or_else(|| unexpected("count", &value))
    }

    async fn checkbox_states(&self, selector: &str) -> Result<Vec<bool>, DomError> {
        let value = self.eval(&scripts::checkbox_states(selector)).await?;
        value
            .as_array()
            .map(|items| items.iter().map(|v| v.as_bool().unwrap_or(false)).collect())
            .ok_or_else(|| unexpected("array", &value))
    }

    async fn toggle_nth(&self, selector: &str, index: usize) -> Result<bool, DomError> {
        self.eval_bool(&scripts::toggle_nth(selector, index)).await
    }

    async fn display_of(&self, selector: &str) -> Result<Option<String>, DomError> {
        match self.eval(&scripts::display_of(selector)).await? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(unexpected("display", &other)),
        }
    }

    async fn set_value(&self, selector: &str, value: &str) -> Result<bool, DomError> {
        self.eval_bool(&scripts::set_value(selector, value)).await
    }

    async fn set_checked_by_id(&self, id: &str) -> Result<bool, DomError> {
        self.eval_bool(&scripts::set_checked_by_id(id)).await
    }

    async fn attach_file(&self, selector: &str, file: &FileBytes) -> Result<bool, DomError> {
        let encoded = STANDARD.encode(&file.bytes);
        self.eval_bool(&scripts::attach_file(selector, &file.name, &file.mime, &encoded)).await
    }

    async fn add_tags(
        &self,
        container: &str,
        input: &str,
        tags: &[String],
    ) -> Result<TagFill, DomError> {
        match self.eval(&scripts::add_tags(container, input, tags)).await? {
            Value::String(s) if s == scripts::MISSING_CONTAINER => Ok(TagFill::MissingContainer),
            Value::String(s) if s == scripts::MISSING_INPUT => Ok(TagFill::MissingInput),
            Value::Number(n) => Ok(TagFill::Added(n.as_u64().unwrap_or(0) as usize)),
            other => Err(unexpected("tag count", &other)),
        }
    }
}
