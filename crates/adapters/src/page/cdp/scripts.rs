// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JavaScript snippets evaluated in the controlled page.
//!
//! Every dynamic value is embedded as a JSON literal.

use serde_json::Value;

fn lit(s: &str) -> String {
    Value::from(s).to_string()
}

pub(super) const READY: &str = r#"document.readyState === "complete""#;

pub(super) fn exists(selector: &str) -> String {
    format!("document.querySelector({}) !== null", lit(selector))
}

pub(super) fn click(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); if (!el) return false; el.click(); return true; }})()",
        lit(selector)
    )
}

pub(super) fn click_text(selector: &str, text: &str) -> String {
    format!(
        "(() => {{ const el = [...document.querySelectorAll({})].find((e) => e.textContent.trim() === {}); \
         if (!el) return false; el.click(); return true; }})()",
        lit(selector),
        lit(text)
    )
}

pub(super) fn click_all(selector: &str) -> String {
    format!(
        "(() => {{ const els = document.querySelectorAll({}); els.forEach((e) => e.click()); return els.length; }})()",
        lit(selector)
    )
}

pub(super) fn checkbox_states(selector: &str) -> String {
    format!("[...document.querySelectorAll({})].map((e) => !!e.checked)", lit(selector))
}

pub(super) fn toggle_nth(selector: &str, index: usize) -> String {
    format!(
        "(() => {{ const el = document.querySelectorAll({})[{index}]; if (!el) return false; el.click(); return true; }})()",
        lit(selector)
    )
}

pub(super) fn display_of(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); return el ? window.getComputedStyle(el).display : null; }})()",
        lit(selector)
    )
}

/// Uses the prototype's value setter so framework-managed inputs notice the change.
pub(super) fn set_value(selector: &str, value: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); if (!el) return false; el.focus(); \
         const desc = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), \"value\") \
         || Object.getOwnPropertyDescriptor(el, \"value\"); \
         desc.set.call(el, {}); \
         el.dispatchEvent(new Event(\"input\", {{ bubbles: true }})); \
         el.dispatchEvent(new Event(\"change\", {{ bubbles: true }})); \
         el.blur(); return true; }})()",
        lit(selector),
        lit(value)
    )
}

pub(super) fn set_checked_by_id(id: &str) -> String {
    format!(
        "(() => {{ const el = document.getElementById({}); if (!el) return false; if (!el.checked) el.click(); return true; }})()",
        lit(id)
    )
}

pub(super) fn attach_file(selector: &str, name: &str, mime: &str, base64: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); if (!el) return false; \
         const raw = atob({}); const bytes = new Uint8Array(raw.length); \
         for (let i = 0; i < raw.length; i++) bytes[i] = raw.charCodeAt(i); \
         const dt = new DataTransfer(); dt.items.add(new File([bytes], {}, {{ type: {} }})); \
         el.files = dt.files; el.dispatchEvent(new Event(\"change\", {{ bubbles: true }})); return true; }})()",
        lit(selector),
        lit(base64),
        lit(name),
        lit(mime)
    )
}

pub(super) const MISSING_CONTAINER: &str = "missing-container";
pub(super) const MISSING_INPUT: &str = "missing-input";

/// Types each tag and confirms it with an Enter keydown/keyup pair.
pub(super) fn add_tags(container: &str, input: &str, tags: &[String]) -> String {
    let list = Value::from(tags.to_vec()).to_string();
    format!(
        "(() => {{ const box = document.querySelector({container}); if (!box) return {missing_container}; \
         const input = box.querySelector({input}); if (!input) return {missing_input}; \
         const fire = (type) => input.dispatchEvent(new Event(type, {{ bubbles: true }})); \
         const key = (type) => input.dispatchEvent(new KeyboardEvent(type, \
         {{ bubbles: true, key: \"Enter\", code: \"Enter\", keyCode: 13, which: 13 }})); \
         input.focus(); fire(\"focus\"); const tags = {list}; \
         for (const tag of tags) {{ input.value = \"\"; fire(\"input\"); input.value = tag; \
         fire(\"input\"); fire(\"change\"); key(\"keydown\"); key(\"keyup\"); }} \
         return tags.length; }})()",
        container = lit(container),
        input = lit(input),
        missing_container = lit(MISSING_CONTAINER),
        missing_input = lit(MISSING_INPUT),
    )
}

#[cfg(test)]
#[path = "scripts_tests.rs"]
mod tests;
