//! Harbor palette and semantic styling for the console.
//!
//! Dark is the default; the light palette swaps the handful of colors
//! that need contrast against a bright terminal. The active palette is
//! process-global so call sites stay terse; it changes only via
//! [`set_theme`] (startup + the `t` toggle).

use std::sync::RwLock;

use ratatui::style::{Color, Modifier, Style};

use airgrid_config::prefs::Theme;

// ── Palette ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub info: Color,
    pub warn: Color,
    pub ok: Color,
    pub err: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight: Color,
}

const DARK: Palette = Palette {
    accent: Color::Rgb(61, 214, 196),   // teal
    info: Color::Rgb(120, 190, 255),    // sky
    warn: Color::Rgb(235, 203, 139),    // sand
    ok: Color::Rgb(118, 208, 109),      // kelp
    err: Color::Rgb(240, 113, 120),     // coral
    text: Color::Rgb(178, 186, 200),    // fog
    dim: Color::Rgb(94, 108, 138),      // slate
    highlight: Color::Rgb(40, 46, 62),  // shelf
};

const LIGHT: Palette = Palette {
    accent: Color::Rgb(0, 122, 110),
    info: Color::Rgb(36, 94, 170),
    warn: Color::Rgb(152, 108, 0),
    ok: Color::Rgb(34, 128, 27),
    err: Color::Rgb(178, 32, 40),
    text: Color::Rgb(40, 44, 54),
    dim: Color::Rgb(120, 128, 144),
    highlight: Color::Rgb(222, 228, 238),
};

static ACTIVE: RwLock<Palette> = RwLock::new(DARK);

pub fn set_theme(theme: Theme) {
    let palette = match theme {
        Theme::Dark => DARK,
        Theme::Light => LIGHT,
    };
    *ACTIVE.write().unwrap_or_else(std::sync::PoisonError::into_inner) = palette;
}

pub fn palette() -> Palette {
    *ACTIVE.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default()
        .fg(palette().accent)
        .add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(palette().accent)
}

pub fn border_default() -> Style {
    Style::default().fg(palette().dim)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(palette().accent)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(palette().text)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(palette().accent)
        .bg(palette().highlight)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(palette().accent)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(palette().text)
}

pub fn key_hint() -> Style {
    Style::default().fg(palette().dim)
}

pub fn key_hint_key() -> Style {
    Style::default()
        .fg(palette().accent)
        .add_modifier(Modifier::BOLD)
}

pub fn field_label() -> Style {
    Style::default().fg(palette().dim)
}

pub fn field_error() -> Style {
    Style::default().fg(palette().err)
}

pub fn ok_style() -> Style {
    Style::default().fg(palette().ok)
}

pub fn warn_style() -> Style {
    Style::default().fg(palette().warn)
}

pub fn err_style() -> Style {
    Style::default().fg(palette().err)
}

pub fn info_style() -> Style {
    Style::default().fg(palette().info)
}
