//! Alerts screen — severity-filtered alert table with acknowledge
//! toggle (optimistic, rolled back on failure).

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;

use airgrid_core::table::{TableView, compute};
use airgrid_core::{Alert, ListController, Severity, Snapshot};

use crate::action::{Action, Toast};
use crate::component::Component;
use crate::theme;
use crate::widgets::status::severity_span;
use crate::widgets::sub_tabs::render_sub_tabs;
use crate::widgets::table::{TableNav, header_row, pagination_line};

/// Severity sub-tab filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SeverityFilter {
    #[default]
    All,
    Critical,
    Warning,
    Info,
    Unacked,
}

impl SeverityFilter {
    const ALL: [SeverityFilter; 5] = [
        Self::All,
        Self::Critical,
        Self::Warning,
        Self::Info,
        Self::Unacked,
    ];

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }

    fn matches(self, alert: &Alert) -> bool {
        match self {
            Self::All => true,
            Self::Critical => alert.severity == Severity::Critical,
            Self::Warning => alert.severity == Severity::Warning,
            Self::Info => alert.severity == Severity::Info,
            Self::Unacked => !alert.acknowledged,
        }
    }
}

pub struct AlertsScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    ctl: ListController<Alert>,
    nav: TableNav,
    filter: SeverityFilter,
    can_operate: bool,
    pending: HashMap<String, Snapshot<Alert>>,
    filtered: Vec<Alert>,
}

impl AlertsScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            focused: false,
            action_tx: None,
            ctl: ListController::new(),
            nav: TableNav::new::<Alert>(page_size, Some("created")),
            filter: SeverityFilter::All,
            can_operate: false,
            pending: HashMap::new(),
            filtered: Vec::new(),
        }
    }

    /// The severity sub-tab pre-filters before the table engine runs.
    fn recompute_filtered(&mut self) {
        self.filtered = self
            .ctl
            .rows()
            .iter()
            .filter(|a| self.filter.matches(a))
            .cloned()
            .collect();
    }

    fn view(&self) -> TableView<'_, Alert> {
        compute(&self.filtered, &self.nav.query)
    }

    fn selected_id(&self) -> Option<String> {
        self.view()
            .rows
            .get(self.nav.selected)
            .map(|a| a.id.clone())
    }

    fn toggle_ack(&mut self) -> Option<Action> {
        if !self.can_operate {
            return Some(Action::Notify(Toast::info(
                "Read-only session",
                "sign in as an operator or admin to make changes (Users screen, L)",
            )));
        }
        let id = self.selected_id()?;
        let acknowledged = !self.ctl.get(&id)?.acknowledged;

        let snap = self
            .ctl
            .optimistic_patch(&id, |a| a.acknowledged = acknowledged)?;
        self.pending.insert(id.clone(), snap);
        self.recompute_filtered();
        Some(Action::AcknowledgeAlert { id, acknowledged })
    }
}

impl Component for AlertsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
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
                Ok(Some(Action::LoadAlerts))
            }
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.nav.query.first_page();
                self.nav.selected = 0;
                self.recompute_filtered();
                Ok(None)
            }
            KeyCode::Char('a') | KeyCode::Enter => Ok(self.toggle_ack()),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::AlertsLoaded(result) => {
                self.ctl.finish_load(result.clone());
                self.recompute_filtered();
                let len = self.view().rows.len();
                self.nav.clamp_selection(len);
            }

            Action::AlertAckDone { id, result } => match result {
                Ok(alert) => {
                    self.pending.remove(id);
                    self.ctl.commit(id, Some(alert.clone()));
                    self.recompute_filtered();
                    let verb = if alert.acknowledged {
                        "acknowledged"
                    } else {
                        "reopened"
                    };
                    return Ok(Some(Action::Notify(Toast::success(
                        format!("Alert {verb}"),
                        &alert.title,
                    ))));
                }
                Err(report) => {
                    if let Some(snap) = self.pending.remove(id) {
                        self.ctl.fail(snap);
                        self.recompute_filtered();
                    }
                    return Ok(Some(Action::Notify(Toast::error(
                        "Acknowledge failed",
                        report,
                    ))));
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
        let unacked = self.ctl.rows().iter().filter(|a| !a.acknowledged).count();
        let title = format!(" Alerts ({unacked} unacked) ");

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
            Constraint::Length(1), // sub-tabs
            Constraint::Length(1), // banner
            Constraint::Min(1),    // table
            Constraint::Length(1), // pagination
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let labels = ["All", "Critical", "Warning", "Info", "Unacked"];
        frame.render_widget(
            Paragraph::new(render_sub_tabs(&labels, self.filter.index())),
            layout[0],
        );

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
                layout[1],
            );
        } else if self.ctl.is_loading() && !self.ctl.has_data() {
            frame.render_widget(
                Paragraph::new(Span::styled(" Loading alerts…", theme::key_hint())),
                layout[1],
            );
        }

        if self.ctl.has_data() {
            let now = chrono::Utc::now();
            let rows: Vec<Row> = view
                .rows
                .iter()
                .enumerate()
                .map(|(i, alert)| {
                    let selected = i == self.nav.selected;
                    let mutating = self.ctl.is_mutating(&alert.id);
                    let ack = match (mutating, alert.acknowledged) {
                        (true, _) => "…",
                        (false, true) => "✓",
                        (false, false) => " ",
                    };

                    Row::new(vec![
                        Cell::from(Line::from(severity_span(alert.severity))),
                        Cell::from(alert.title.clone()),
                        Cell::from(alert.description.clone()).style(theme::key_hint()),
                        Cell::from(ack).style(theme::ok_style()),
                        Cell::from(crate::widgets::fmt::fmt_ago(Some(alert.created_at), now))
                            .style(theme::key_hint()),
                    ])
                    .style(if selected {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    })
                })
                .collect();

            let widths = [
                Constraint::Length(10),
                Constraint::Fill(1),
                Constraint::Fill(2),
                Constraint::Length(4),
                Constraint::Length(10),
            ];

            let table = Table::new(rows, widths).header(header_row::<Alert>(&self.nav.query));
            frame.render_widget(table, layout[2]);
        }

        frame.render_widget(
            Paragraph::new(pagination_line(&view, &self.nav.query.filter)),
            layout[3],
        );

        let hints = Line::from(vec![
            Span::styled("  a ", theme::key_hint_key()),
            Span::styled("acknowledge  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("filter severity  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[4]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
