//! Status dots and badges — ●/◐/○ with semantic colors.

use ratatui::style::Style;
use ratatui::text::Span;

use airgrid_core::{ApStatus, ClientPresence, Severity};

use crate::theme;

pub fn ap_status_span(status: ApStatus) -> Span<'static> {
    let (symbol, style) = match status {
        ApStatus::Online => ("● online", theme::ok_style()),
        ApStatus::Degraded => ("◐ degraded", theme::warn_style()),
        ApStatus::Offline => ("○ offline", theme::err_style()),
    };
    Span::styled(symbol, style)
}

pub fn presence_span(presence: ClientPresence) -> Span<'static> {
    let (symbol, style) = match presence {
        ClientPresence::Online => ("● online", theme::ok_style()),
        ClientPresence::Offline => ("○ offline", theme::key_hint()),
        ClientPresence::Blocked => ("⊘ blocked", theme::err_style()),
    };
    Span::styled(symbol, style)
}

pub fn severity_span(severity: Severity) -> Span<'static> {
    let (label, style) = match severity {
        Severity::Critical => ("critical", theme::err_style()),
        Severity::Warning => ("warning", theme::warn_style()),
        Severity::Info => ("info", theme::info_style()),
    };
    Span::styled(label, style)
}

pub fn enabled_span(enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled("enabled", theme::ok_style())
    } else {
        Span::styled("disabled", theme::key_hint())
    }
}

/// Signal quality color by RSSI: strong ≥ -55, usable ≥ -70, weak below.
pub fn signal_style(signal_dbm: Option<i32>) -> Style {
    match signal_dbm {
        Some(dbm) if dbm >= -55 => theme::ok_style(),
        Some(dbm) if dbm >= -70 => theme::warn_style(),
        Some(_) => theme::err_style(),
        None => theme::key_hint(),
    }
}
