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

/// Formats a whole-đồng amount with Vietnamese digit grouping.
///
/// Usage in templates: `{{ 35000|vnd }}` renders `35.000đ`.
#[askama::filter_fn]
pub fn vnd(amount: &u64, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(gung_corner_core::Price::new(*amount).display())
}
