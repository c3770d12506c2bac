//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use campus_eats_core::OrderStatus;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Capitalize the first letter of a status for display.
///
/// Usage in templates: `{{ status|status_label }}`
#[askama::filter_fn]
pub fn status_label(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(capitalize(&value.to_string()))
}

/// CSS class for an order status badge.
///
/// Usage in templates: `{{ status|status_class }}`
#[askama::filter_fn]
pub fn status_class(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(badge_class(&value.to_string()).to_string())
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().collect::<String>() + chars.as_str()
    })
}

fn badge_class(raw: &str) -> &'static str {
    match raw.parse::<OrderStatus>() {
        Ok(OrderStatus::Pending) => "badge-pending",
        Ok(OrderStatus::Confirmed) => "badge-confirmed",
        Ok(OrderStatus::Preparing) => "badge-preparing",
        Ok(OrderStatus::Ready) => "badge-ready",
        Ok(OrderStatus::Completed) => "badge-completed",
        Ok(OrderStatus::Cancelled) => "badge-cancelled",
        Err(_) => "badge-default",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_badge_class() {
        assert_eq!(badge_class("ready"), "badge-ready");
        assert_eq!(badge_class("cancelled"), "badge-cancelled");
        // Unknown statuses fall back rather than erroring
        assert_eq!(badge_class("collected"), "badge-default");
    }
}
