//! Networks screen — SSID table with create/edit, enable/disable, and
//! delete. Mutations apply optimistically and roll back on failure.

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use airgrid_core::table::{TableView, compute};
use airgrid_core::{Band, ListController, Network, NetworkDraft, NetworkPatch, SecurityMode, Snapshot};

use crate::action::{Action, Toast};
use crate::component::Component;
use crate::theme;
use crate::widgets::status::enabled_span;
use crate::widgets::table::{TableNav, header_row, pagination_line};

const PLACEHOLDER_ID: &str = "net-pending";

// ── Create / edit form ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Ssid,
    Vlan,
    Security,
    Band,
    Enabled,
}

impl FormField {
    const ALL: [FormField; 5] = [
        Self::Ssid,
        Self::Vlan,
        Self::Security,
        Self::Band,
        Self::Enabled,
    ];

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

enum FormOutcome {
    Create(NetworkDraft),
    Update(String, NetworkPatch),
}

struct NetworkForm {
    editing: Option<String>,
    field: FormField,
    ssid: Input,
    vlan: Input,
    security: SecurityMode,
    band: Option<Band>,
    enabled: bool,
    errors: Vec<(&'static str, String)>,
}

impl NetworkForm {
    fn create() -> Self {
        Self {
            editing: None,
            field: FormField::Ssid,
            ssid: Input::default(),
            vlan: Input::new("1".into()),
            security: SecurityMode::Wpa2,
            band: Some(Band::Dual),
            enabled: true,
            errors: Vec::new(),
        }
    }

    fn edit(network: &Network) -> Self {
        Self {
            editing: Some(network.id.clone()),
            field: FormField::Ssid,
            ssid: Input::new(network.ssid.clone()),
            vlan: Input::new(network.vlan.to_string()),
            security: network.security,
            band: network.band,
            enabled: network.enabled,
            errors: Vec::new(),
        }
    }

    fn cycle_security(&mut self) {
        self.security = match self.security {
            SecurityMode::Wpa2 => SecurityMode::Wpa3,
            SecurityMode::Wpa3 => SecurityMode::Open,
            SecurityMode::Open => SecurityMode::Wpa2,
        };
    }

    fn cycle_band(&mut self) {
        self.band = match self.band {
            None => Some(Band::Ghz24),
            Some(Band::Ghz24) => Some(Band::Ghz5),
            Some(Band::Ghz5) => Some(Band::Dual),
            Some(Band::Dual) => None,
        };
    }

    /// Per-field validation; blocks submission until every field passes.
    fn validate(&mut self) -> Option<(String, u16)> {
        self.errors.clear();

        let ssid = self.ssid.value().trim().to_owned();
        if ssid.is_empty() {
            self.errors.push(("ssid", "SSID is required".into()));
        } else if ssid.len() > 32 {
            self.errors
                .push(("ssid", "SSID must be at most 32 characters".into()));
        }

        let vlan = match self.vlan.value().trim().parse::<u16>() {
            Ok(v) if (1..=4094).contains(&v) => Some(v),
            _ => {
                self.errors
                    .push(("vlan", "VLAN must be a number between 1 and 4094".into()));
                None
            }
        };

        if self.errors.is_empty() {
            Some((ssid, vlan.unwrap_or(1)))
        } else {
            None
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<FormOutcome> {
        match key.code {
            KeyCode::Down | KeyCode::Tab => {
                self.field = self.field.next();
                return None;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.field = self.field.prev();
                return None;
            }
            KeyCode::Enter => {
                let (ssid, vlan) = self.validate()?;
                return Some(match &self.editing {
                    Some(id) => FormOutcome::Update(
                        id.clone(),
                        NetworkPatch {
                            name: Some(ssid.clone()),
                            ssid: Some(ssid),
                            security: Some(self.security),
                            band: self.band,
                            vlan: Some(vlan),
                            enabled: Some(self.enabled),
                        },
                    ),
                    None => FormOutcome::Create(NetworkDraft {
                        name: ssid.clone(),
                        ssid,
                        security: self.security,
                        band: self.band,
                        vlan,
                        enabled: self.enabled,
                    }),
                });
            }
            _ => {}
        }

        match self.field {
            FormField::Ssid => {
                self.ssid.handle_event(&crossterm::event::Event::Key(key));
            }
            FormField::Vlan => {
                self.vlan.handle_event(&crossterm::event::Event::Key(key));
            }
            FormField::Security => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    self.cycle_security();
                }
            }
            FormField::Band => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    self.cycle_band();
                }
            }
            FormField::Enabled => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    self.enabled = !self.enabled;
                }
            }
        }
        None
    }

    fn error_for(&self, field: &'static str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = 14u16.min(area.height.saturating_sub(4));
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);

        let title = match &self.editing {
            Some(_) => " Edit SSID ",
            None => " Create SSID ",
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let row = |field: FormField, label: &str, value: String| -> Line<'static> {
            let marker = if self.field == field { "▸ " } else { "  " };
            let value_style = if self.field == field {
                theme::table_selected()
            } else {
                theme::table_row()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{label:<10}"), theme::field_label()),
                Span::styled(value, value_style),
            ])
        };

        let mut lines = vec![
            Line::from(""),
            row(FormField::Ssid, "SSID", self.ssid.value().to_owned()),
        ];
        if let Some(msg) = self.error_for("ssid") {
            lines.push(Line::from(Span::styled(
                format!("            {msg}"),
                theme::field_error(),
            )));
        }
        lines.push(row(FormField::Vlan, "VLAN", self.vlan.value().to_owned()));
        if let Some(msg) = self.error_for("vlan") {
            lines.push(Line::from(Span::styled(
                format!("            {msg}"),
                theme::field_error(),
            )));
        }
        lines.push(row(
            FormField::Security,
            "Security",
            self.security.to_string(),
        ));
        lines.push(row(
            FormField::Band,
            "Band",
            self.band.map_or_else(|| "─".into(), |b| b.to_string()),
        ));
        lines.push(row(
            FormField::Enabled,
            "Enabled",
            if self.enabled { "yes".into() } else { "no".into() },
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("save  ", theme::key_hint()),
            Span::styled("Space ", theme::key_hint_key()),
            Span::styled("cycle  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Screen ───────────────────────────────────────────────────────────

pub struct NetworksScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    ctl: ListController<Network>,
    nav: TableNav,
    can_operate: bool,
    pending: HashMap<String, Snapshot<Network>>,
    pending_create: Option<Snapshot<Network>>,
    form: Option<NetworkForm>,
    confirm_delete: Option<String>,
}

impl NetworksScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            focused: false,
            action_tx: None,
            ctl: ListController::new(),
            nav: TableNav::new::<Network>(page_size, Some("name")),
            can_operate: false,
            pending: HashMap::new(),
            pending_create: None,
            form: None,
            confirm_delete: None,
        }
    }

    fn view(&self) -> TableView<'_, Network> {
        compute(self.ctl.rows(), &self.nav.query)
    }

    fn selected_id(&self) -> Option<String> {
        self.view()
            .rows
            .get(self.nav.selected)
            .map(|n| n.id.clone())
    }

    fn read_only_notice(&self) -> Option<Action> {
        if self.can_operate {
            None
        } else {
            Some(Action::Notify(Toast::info(
                "Read-only session",
                "sign in as an operator or admin to make changes (Users screen, L)",
            )))
        }
    }

    fn toggle_selected(&mut self) -> Option<Action> {
        if let Some(notice) = self.read_only_notice() {
            return Some(notice);
        }
        let id = self.selected_id()?;
        let enabled = !self.ctl.get(&id)?.enabled;

        let snap = self.ctl.optimistic_patch(&id, |n| n.enabled = enabled)?;
        self.pending.insert(id.clone(), snap);
        Some(Action::UpdateNetwork {
            id,
            patch: NetworkPatch::enabled(enabled),
        })
    }

    fn submit_form(&mut self, outcome: FormOutcome) -> Option<Action> {
        match outcome {
            FormOutcome::Create(draft) => {
                let placeholder = Network {
                    id: PLACEHOLDER_ID.into(),
                    name: draft.name.clone(),
                    ssid: draft.ssid.clone(),
                    security: draft.security,
                    band: draft.band,
                    vlan: draft.vlan,
                    enabled: draft.enabled,
                    created_at: None,
                };
                self.pending_create = Some(self.ctl.optimistic_insert(placeholder));
                Some(Action::CreateNetwork(draft))
            }
            FormOutcome::Update(id, patch) => {
                let applied = patch.clone();
                let snap = self.ctl.optimistic_patch(&id, |n| applied.apply(n))?;
                self.pending.insert(id.clone(), snap);
                Some(Action::UpdateNetwork { id, patch })
            }
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let view = self.view();

        let rows: Vec<Row> = view
            .rows
            .iter()
            .enumerate()
            .map(|(i, network)| {
                let selected = i == self.nav.selected;
                let mutating = self.ctl.is_mutating(&network.id);

                let name = if mutating {
                    format!("{} …", network.name)
                } else {
                    network.name.clone()
                };
                let name_style = if selected {
                    theme::table_selected()
                } else {
                    theme::table_row().add_modifier(Modifier::BOLD)
                };

                Row::new(vec![
                    Cell::from(name).style(name_style),
                    Cell::from(network.ssid.clone()).style(theme::table_row()),
                    Cell::from(network.security.to_string()).style(theme::table_row()),
                    Cell::from(
                        network
                            .band
                            .map_or_else(|| "─".into(), |b| b.to_string()),
                    )
                    .style(theme::key_hint()),
                    Cell::from(network.vlan.to_string()).style(theme::table_row()),
                    Cell::from(Line::from(enabled_span(network.enabled))),
                ])
                .style(if selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                })
            })
            .collect();

        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths).header(header_row::<Network>(&self.nav.query));
        frame.render_widget(table, area);
    }
}

impl Component for NetworksScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // modal layers first
        if let Some(form) = &mut self.form {
            if key.code == KeyCode::Esc {
                self.form = None;
                return Ok(None);
            }
            if let Some(outcome) = form.handle_key(key) {
                self.form = None;
                return Ok(self.submit_form(outcome));
            }
            return Ok(None);
        }

        if let Some(id) = self.confirm_delete.clone() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.confirm_delete = None;
                    if let Some(snap) = self.ctl.optimistic_remove(&id) {
                        self.pending.insert(id.clone(), snap);
                        Ok(Some(Action::DeleteNetwork { id }))
                    } else {
                        Ok(None)
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirm_delete = None;
                    Ok(None)
                }
                _ => Ok(None),
            };
        }

        let page_len = self.view().rows.len();
        if self.nav.handle_key(key, page_len) {
            let (page, len) = {
                let view = self.view();
                (view.page, view.rows.len())
            };
            self.nav.query.page = page;
            self.nav.clamp_selection(len);
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('r') => {
                self.ctl.begin_load();
                Ok(Some(Action::LoadNetworks))
            }
            KeyCode::Char(' ') => Ok(self.toggle_selected()),
            KeyCode::Char('c') => {
                if let Some(notice) = self.read_only_notice() {
                    return Ok(Some(notice));
                }
                self.form = Some(NetworkForm::create());
                Ok(None)
            }
            KeyCode::Char('e') => {
                if let Some(notice) = self.read_only_notice() {
                    return Ok(Some(notice));
                }
                if let Some(network) = self.selected_id().and_then(|id| self.ctl.get(&id).cloned()) {
                    self.form = Some(NetworkForm::edit(&network));
                }
                Ok(None)
            }
            KeyCode::Char('d') => {
                if let Some(notice) = self.read_only_notice() {
                    return Ok(Some(notice));
                }
                self.confirm_delete = self.selected_id();
                Ok(None)
            }
            KeyCode::Enter => Ok(self.selected_id().map(Action::RememberNetwork)),
            _ => Ok(None),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::NetworksLoaded(result) => {
                self.ctl.finish_load(result.clone());
                let len = self.view().rows.len();
                self.nav.clamp_selection(len);
            }

            Action::NetworkUpdateDone { id, result } => match result {
                Ok(network) => {
                    self.pending.remove(id);
                    self.ctl.commit(id, Some(network.clone()));
                    return Ok(Some(Action::Notify(Toast::success(
                        "Network updated",
                        &network.ssid,
                    ))));
                }
                Err(report) => {
                    if let Some(snap) = self.pending.remove(id) {
                        self.ctl.fail(snap);
                    }
                    return Ok(Some(Action::Notify(Toast::error("Update failed", report))));
                }
            },

            Action::NetworkCreateDone(result) => match result {
                Ok(network) => {
                    self.pending_create = None;
                    self.ctl.commit_insert(PLACEHOLDER_ID, network.clone());
                    return Ok(Some(Action::Notify(Toast::success(
                        "SSID created",
                        &network.ssid,
                    ))));
                }
                Err(report) => {
                    if let Some(snap) = self.pending_create.take() {
                        self.ctl.fail(snap);
                    }
                    return Ok(Some(Action::Notify(Toast::error("Create failed", report))));
                }
            },

            Action::NetworkDeleteDone { id, result } => match result {
                Ok(()) => {
                    self.pending.remove(id);
                    self.ctl.commit_remove(id);
                    let len = self.view().rows.len();
                    self.nav.clamp_selection(len);
                    return Ok(Some(Action::Notify(Toast::success(
                        "Network deleted",
                        id.clone(),
                    ))));
                }
                Err(report) => {
                    if let Some(snap) = self.pending.remove(id) {
                        self.ctl.fail(snap);
                    }
                    return Ok(Some(Action::Notify(Toast::error("Delete failed", report))));
                }
            },

            Action::SearchInput(query) => {
                self.nav.query.set_filter(query.clone());
                let len = self.view().rows.len();
                self.nav.clamp_selection(len);
            }
            Action::CloseSearch => {
                self.nav.query.set_filter("");
            }

            Action::LoginDone(Ok(user)) => {
                self.can_operate = user.role.can_operate();
            }
            Action::Logout => {
                self.can_operate = false;
            }

            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let view = self.view();
        let title = format!(" Networks ({}/{}) ", view.filtered_rows, view.total_rows);

        let block = Block::default()
            .title(title)
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
            Constraint::Length(1), // error banner / status
            Constraint::Min(1),    // table
            Constraint::Length(1), // pagination
            Constraint::Length(1), // hints
        ])
        .split(inner);

        // load state banner
        if let Some(report) = self.ctl.error() {
            let retry = if self.ctl.has_data() {
                "showing last data — r to retry"
            } else {
                "r to retry"
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!(" {} ", report.message), theme::err_style()),
                    Span::styled(format!("({retry})"), theme::key_hint()),
                ])),
                layout[0],
            );
        } else if self.ctl.is_loading() && !self.ctl.has_data() {
            frame.render_widget(
                Paragraph::new(Span::styled(" Loading networks…", theme::key_hint())),
                layout[0],
            );
        }

        if self.ctl.has_data() {
            self.render_table(frame, layout[1]);
        }

        frame.render_widget(
            Paragraph::new(pagination_line(&view, &self.nav.query.filter)),
            layout[2],
        );

        let hints = Line::from(vec![
            Span::styled("  Space ", theme::key_hint_key()),
            Span::styled("enable/disable  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("create  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("←/→ s ", theme::key_hint_key()),
            Span::styled("sort", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);

        // overlays
        if let Some(form) = &self.form {
            form.render(frame, area);
        }
        if let Some(id) = &self.confirm_delete {
            let ssid = self
                .ctl
                .get(id)
                .map_or_else(|| id.clone(), |n| n.ssid.clone());
            render_confirm(frame, area, &format!("Delete {ssid}? This cannot be undone."));
        }
    }

    fn capturing_input(&self) -> bool {
        self.form.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

/// Small centered y/n confirmation box.
pub(crate) fn render_confirm(frame: &mut Frame, area: Rect, message: &str) {
    #[allow(clippy::cast_possible_truncation)]
    let width = (message.len() as u16 + 6).clamp(24, area.width.saturating_sub(4));
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + area.height.saturating_sub(7) / 2,
        width,
        5,
    );

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::from(Span::styled(message.to_owned(), theme::table_row())),
        Line::from(""),
        Line::from(vec![
            Span::styled("y ", theme::key_hint_key()),
            Span::styled("confirm   ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
