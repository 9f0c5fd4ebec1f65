//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Cart badge label: `1 item`, `3 items`.
///
/// Usage in templates: `{{ panel.line_count|item_count }}`
#[askama::filter_fn]
pub fn item_count(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(pluralize_items(&count.to_string()))
}

fn pluralize_items(count: &str) -> String {
    if count == "1" {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}
