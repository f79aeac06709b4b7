//! Settings screen — radio settings form with per-field validation,
//! plus the resolved runtime configuration (read-only).
//!
//! The data source (remote vs mock) is chosen at startup from config;
//! this screen only displays the outcome.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use airgrid_core::Settings;
use airgrid_core::validate::{FieldError, SettingsForm};

use crate::action::{Action, Toast};
use crate::component::Component;
use crate::theme;

/// Resolved configuration shown read-only at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub gateway_mode: &'static str,
    pub api_base: Option<String>,
    pub ws_url: Option<String>,
    pub flags_raw: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Country,
    ChannelPlan,
    TxPower,
    GuestIsolation,
}

impl Field {
    const ALL: [Field; 4] = [
        Self::Country,
        Self::ChannelPlan,
        Self::TxPower,
        Self::GuestIsolation,
    ];

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn error_key(self) -> &'static str {
        match self {
            Self::Country => "country_code",
            Self::ChannelPlan => "channel_plan",
            Self::TxPower => "tx_power",
            Self::GuestIsolation => "allow_guest_isolation",
        }
    }
}

pub struct SettingsScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    runtime: RuntimeInfo,
    /// Last confirmed settings; the revert target.
    baseline: Option<Settings>,
    /// Baseline snapshot while a save is in flight.
    saving_from: Option<Settings>,
    load_error: Option<String>,
    editing: bool,
    field: Field,
    country: Input,
    channel_plan: Input,
    tx_power: Input,
    guest_isolation: bool,
    errors: Vec<FieldError>,
    can_operate: bool,
}

impl SettingsScreen {
    pub fn new(runtime: RuntimeInfo) -> Self {
        Self {
            focused: false,
            action_tx: None,
            runtime,
            baseline: None,
            saving_from: None,
            load_error: None,
            editing: false,
            field: Field::Country,
            country: Input::default(),
            channel_plan: Input::default(),
            tx_power: Input::default(),
            guest_isolation: true,
            errors: Vec::new(),
            can_operate: false,
        }
    }

    fn fill_form(&mut self, settings: &Settings) {
        let form = SettingsForm::from_settings(settings);
        self.country = Input::new(form.country_code);
        self.channel_plan = Input::new(form.channel_plan);
        self.tx_power = Input::new(form.tx_power);
        self.guest_isolation = form.allow_guest_isolation;
    }

    fn form(&self) -> SettingsForm {
        SettingsForm {
            country_code: self.country.value().to_owned(),
            channel_plan: self.channel_plan.value().to_owned(),
            tx_power: self.tx_power.value().to_owned(),
            allow_guest_isolation: self.guest_isolation,
        }
    }

    fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field.error_key())
            .map(|e| e.message.as_str())
    }

    /// Validation gates submission; failures annotate their fields and
    /// nothing reaches the network.
    fn submit(&mut self) -> Option<Action> {
        match self.form().validate() {
            Ok(settings) => {
                self.errors.clear();
                self.editing = false;
                // optimistic: show the new values as current, revert on failure
                self.saving_from = self.baseline.clone();
                self.baseline = Some(settings.clone());
                Some(Action::SaveSettings(settings))
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.editing = false;
                self.errors.clear();
                if let Some(baseline) = self.baseline.clone() {
                    self.fill_form(&baseline);
                }
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Down | KeyCode::Tab => {
                self.field = self.field.next();
                None
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.field = self.field.prev();
                None
            }
            _ => {
                match self.field {
                    Field::Country => {
                        self.country.handle_event(&crossterm::event::Event::Key(key));
                    }
                    Field::ChannelPlan => {
                        self.channel_plan
                            .handle_event(&crossterm::event::Event::Key(key));
                    }
                    Field::TxPower => {
                        self.tx_power.handle_event(&crossterm::event::Event::Key(key));
                    }
                    Field::GuestIsolation => {
                        if matches!(
                            key.code,
                            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                        ) {
                            self.guest_isolation = !self.guest_isolation;
                        }
                    }
                }
                None
            }
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let row = |field: Field, label: &str, value: String| -> Line<'static> {
            let active = self.editing && self.field == field;
            let marker = if active { "▸ " } else { "  " };
            let style = if active {
                theme::table_selected()
            } else {
                theme::table_row()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{label:<18}"), theme::field_label()),
                Span::styled(value, style),
            ])
        };

        let mut lines = vec![
            Line::from(""),
            row(Field::Country, "Country code", self.country.value().to_owned()),
        ];
        if let Some(msg) = self.error_for(Field::Country) {
            lines.push(Line::from(Span::styled(
                format!("                    {msg}"),
                theme::field_error(),
            )));
        }
        lines.push(row(
            Field::ChannelPlan,
            "Channel plan",
            self.channel_plan.value().to_owned(),
        ));
        if let Some(msg) = self.error_for(Field::ChannelPlan) {
            lines.push(Line::from(Span::styled(
                format!("                    {msg}"),
                theme::field_error(),
            )));
        }
        lines.push(row(
            Field::TxPower,
            "TX power",
            self.tx_power.value().to_owned(),
        ));
        if let Some(msg) = self.error_for(Field::TxPower) {
            lines.push(Line::from(Span::styled(
                format!("                    {msg}"),
                theme::field_error(),
            )));
        }
        lines.push(row(
            Field::GuestIsolation,
            "Guest isolation",
            if self.guest_isolation {
                "allowed".into()
            } else {
                "blocked".into()
            },
        ));

        lines.push(Line::from(""));
        if self.editing {
            lines.push(Line::from(vec![
                Span::styled("  Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Tab ", theme::key_hint_key()),
                Span::styled("next field  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("discard", theme::key_hint()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("  e ", theme::key_hint_key()),
                Span::styled("edit  ", theme::key_hint()),
                Span::styled("r ", theme::key_hint_key()),
                Span::styled("reload  ", theme::key_hint()),
                Span::styled("t ", theme::key_hint_key()),
                Span::styled("theme", theme::key_hint()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_runtime(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Runtime configuration (read-only) ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let unset = || "(unset)".to_owned();
        let field = |label: &'static str, value: String| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("  {label:<16}"), theme::field_label()),
                Span::styled(value, theme::table_row()),
            ])
        };

        let lines = vec![
            field("data source", self.runtime.gateway_mode.to_owned()),
            field(
                "api_base",
                self.runtime.api_base.clone().unwrap_or_else(unset),
            ),
            field("ws_url", self.runtime.ws_url.clone().unwrap_or_else(unset)),
            field(
                "feature_flags",
                self.runtime.flags_raw.clone().unwrap_or_else(unset),
            ),
            Line::from(Span::styled(
                "  the data source is fixed at startup; change config and restart",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for SettingsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing {
            return Ok(self.handle_edit_key(key));
        }

        match key.code {
            KeyCode::Char('e') => {
                if !self.can_operate {
                    return Ok(Some(Action::Notify(Toast::info(
                        "Read-only session",
                        "sign in as an operator or admin to make changes (Users screen, L)",
                    ))));
                }
                if self.baseline.is_some() {
                    self.editing = true;
                }
                Ok(None)
            }
            KeyCode::Char('r') => Ok(Some(Action::LoadSettings)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SettingsLoaded(result) => match result {
                Ok(settings) => {
                    self.load_error = None;
                    self.baseline = Some(settings.clone());
                    if !self.editing {
                        self.fill_form(settings);
                    }
                }
                Err(report) => {
                    self.load_error = Some(report.message.clone());
                }
            },

            Action::SettingsSaveDone(result) => match result {
                Ok(settings) => {
                    self.saving_from = None;
                    self.baseline = Some(settings.clone());
                    self.fill_form(settings);
                    return Ok(Some(Action::Notify(Toast::success(
                        "Settings saved",
                        format!("country {}", settings.country_code),
                    ))));
                }
                Err(report) => {
                    // roll the optimistic baseline back
                    if let Some(previous) = self.saving_from.take() {
                        self.fill_form(&previous);
                        self.baseline = Some(previous);
                    }
                    return Ok(Some(Action::Notify(Toast::error("Save failed", report))));
                }
            },

            Action::LoginDone(Ok(user)) => {
                self.can_operate = user.role.can_operate();
            }
            Action::Logout => {
                self.can_operate = false;
                self.editing = false;
            }

            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Settings ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1),  // banner
            Constraint::Min(8),     // form
            Constraint::Length(7),  // runtime info
        ])
        .split(inner);

        if let Some(message) = &self.load_error {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!(" {message} "), theme::err_style()),
                    Span::styled("(r to retry)", theme::key_hint()),
                ])),
                layout[0],
            );
        } else if self.baseline.is_none() {
            frame.render_widget(
                Paragraph::new(Span::styled(" Loading settings…", theme::key_hint())),
                layout[0],
            );
        }

        if self.baseline.is_some() {
            self.render_form(frame, layout[1]);
        }
        self.render_runtime(frame, layout[2]);
    }

    fn capturing_input(&self) -> bool {
        self.editing
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
