//! Clients screen — the full client table with block/unblock and a
//! detail panel. Blocking applies optimistically and rolls back when
//! the backend rejects it.

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;

use airgrid_core::table::{TableView, compute};
use airgrid_core::{Client, ClientPatch, DetailController, DetailPhase, ListController, Snapshot};

use crate::action::{Action, Toast};
use crate::component::Component;
use crate::theme;
use crate::widgets::fmt;
use crate::widgets::status::{presence_span, signal_style};
use crate::widgets::table::{TableNav, header_row, pagination_line};

pub struct ClientsScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    ctl: ListController<Client>,
    nav: TableNav,
    can_operate: bool,
    pending: HashMap<String, Snapshot<Client>>,
    detail_open: bool,
    /// Detail fetches go through the gateway, so a row that vanished
    /// server-side surfaces as not-found rather than stale data.
    detail: DetailController<Client>,
}

impl ClientsScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            focused: false,
            action_tx: None,
            ctl: ListController::new(),
            nav: TableNav::new::<Client>(page_size, Some("name")),
            can_operate: false,
            pending: HashMap::new(),
            detail_open: false,
            detail: DetailController::new(),
        }
    }

    fn view(&self) -> TableView<'_, Client> {
        compute(self.ctl.rows(), &self.nav.query)
    }

    fn selected_id(&self) -> Option<String> {
        self.view()
            .rows
            .get(self.nav.selected)
            .map(|c| c.id.clone())
    }

    fn set_blocked(&mut self, blocked: bool) -> Option<Action> {
        if !self.can_operate {
            return Some(Action::Notify(Toast::info(
                "Read-only session",
                "sign in as an operator or admin to make changes (Users screen, L)",
            )));
        }
        let id = self.selected_id()?;
        if self.ctl.get(&id)?.blocked == blocked {
            return None;
        }

        let snap = self.ctl.optimistic_patch(&id, |c| c.blocked = blocked)?;
        self.pending.insert(id.clone(), snap);
        Some(Action::UpdateClient {
            id,
            patch: ClientPatch::blocked(blocked),
        })
    }

    fn render_detail_panel(&self, frame: &mut Frame, area: Rect) {
        match self.detail.phase() {
            DetailPhase::Ready(client) => self.render_detail(frame, area, client),
            phase => {
                let block = Block::default()
                    .title(" Client ")
                    .title_style(theme::title_style())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_default());
                let inner = block.inner(area);
                frame.render_widget(block, area);

                let line = match phase {
                    DetailPhase::Loading => {
                        Line::from(Span::styled("  loading client…", theme::key_hint()))
                    }
                    DetailPhase::NotFound => Line::from(Span::styled(
                        "  client not found — it may have been forgotten",
                        theme::warn_style(),
                    )),
                    DetailPhase::Failed(report) => Line::from(Span::styled(
                        format!("  {}", report.message),
                        theme::err_style(),
                    )),
                    DetailPhase::Ready(_) => Line::from(""),
                };
                frame.render_widget(Paragraph::new(vec![Line::from(""), line]), inner);
            }
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, client: &Client) {
        let title = format!(" {}  ·  {} ", client.name, client.mac);
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let ip = client
            .ip
            .map_or_else(|| "─".into(), |ip| ip.to_string());
        let network = client.network_id.as_deref().unwrap_or("─");
        let ap = client.ap_id.as_deref().unwrap_or("─");
        let quality = client
            .quality
            .map_or_else(|| "─".into(), |q| format!("{q}%"));
        let now = chrono::Utc::now();

        let field = |label: &'static str, value: String| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("  {label:<12}"), theme::field_label()),
                Span::styled(value, theme::table_row()),
            ])
        };

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Status      ", theme::field_label()),
                presence_span(client.presence()),
            ]),
            field("IP", ip),
            Line::from(vec![
                Span::styled("  Signal      ", theme::field_label()),
                Span::styled(fmt::fmt_signal(client.signal_dbm), signal_style(client.signal_dbm)),
            ]),
            field("Quality", quality),
            field("Network", network.to_owned()),
            field("AP", ap.to_owned()),
            field(
                "Rates",
                format!(
                    "↓ {}   ↑ {}",
                    fmt::fmt_mbps(client.rx_mbps),
                    fmt::fmt_mbps(client.tx_mbps)
                ),
            ),
            field("Last seen", fmt::fmt_ago(client.last_seen_at, now)),
            Line::from(""),
            Line::from(vec![
                Span::styled("  b ", theme::key_hint_key()),
                Span::styled("block  ", theme::key_hint()),
                Span::styled("B ", theme::key_hint_key()),
                Span::styled("unblock  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("close", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for ClientsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail_open && key.code == KeyCode::Esc {
            self.detail_open = false;
            return Ok(None);
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
                Ok(Some(Action::LoadClients))
            }
            KeyCode::Char('b') => Ok(self.set_blocked(true)),
            KeyCode::Char('B') => Ok(self.set_blocked(false)),
            KeyCode::Enter => {
                if self.detail_open {
                    self.detail_open = false;
                    return Ok(None);
                }
                if let Some(id) = self.selected_id() {
                    self.detail_open = true;
                    self.detail.begin_load();
                    return Ok(Some(Action::LoadClientDetail(id)));
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ClientsLoaded(result) => {
                self.ctl.finish_load(result.clone());
                let len = self.view().rows.len();
                self.nav.clamp_selection(len);
            }

            Action::ClientDetailLoaded(result) => {
                self.detail.finish_load(result.clone());
            }

            Action::ClientUpdateDone { id, result } => match result {
                Ok(client) => {
                    self.pending.remove(id);
                    self.ctl.commit(id, Some(client.clone()));
                    // keep an open detail panel in sync
                    if self.detail.record().is_some_and(|c| c.id == client.id) {
                        self.detail.finish_load(Ok::<_, airgrid_core::ErrorReport>(client.clone()));
                    }
                    let verb = if client.blocked { "blocked" } else { "unblocked" };
                    return Ok(Some(Action::Notify(Toast::success(
                        format!("Client {verb}"),
                        &client.name,
                    ))));
                }
                Err(report) => {
                    if let Some(snap) = self.pending.remove(id) {
                        self.ctl.fail(snap);
                    }
                    return Ok(Some(Action::Notify(Toast::error("Update failed", report))));
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
        let title = format!(" Clients ({}/{}) ", view.filtered_rows, view.total_rows);

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

        let (table_area, detail_area) = if self.detail_open {
            let chunks =
                Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(table_area);

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
                Paragraph::new(Span::styled(" Loading clients…", theme::key_hint())),
                layout[0],
            );
        }

        if self.ctl.has_data() {
            let rows: Vec<Row> = view
                .rows
                .iter()
                .enumerate()
                .map(|(i, client)| {
                    let selected = i == self.nav.selected;
                    let mutating = self.ctl.is_mutating(&client.id);

                    let name = if mutating {
                        format!("{} …", client.name)
                    } else {
                        client.name.clone()
                    };

                    Row::new(vec![
                        Cell::from(name),
                        Cell::from(client.mac.to_string()).style(theme::key_hint()),
                        Cell::from(
                            client
                                .ip
                                .map_or_else(|| "─".into(), |ip| ip.to_string()),
                        ),
                        Cell::from(Line::from(presence_span(client.presence()))),
                        Cell::from(fmt::fmt_signal(client.signal_dbm))
                            .style(signal_style(client.signal_dbm)),
                        Cell::from(
                            client
                                .quality
                                .map_or_else(|| "─".into(), |q| format!("{q}%")),
                        ),
                        Cell::from(fmt::fmt_mbps(client.rx_mbps)),
                        Cell::from(fmt::fmt_mbps(client.tx_mbps)),
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
                Constraint::Length(18),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(10),
            ];

            let table = Table::new(rows, widths).header(header_row::<Client>(&self.nav.query));
            frame.render_widget(table, layout[1]);
        }

        frame.render_widget(
            Paragraph::new(pagination_line(&view, &self.nav.query.filter)),
            layout[2],
        );

        let hints = Line::from(vec![
            Span::styled("  b/B ", theme::key_hint_key()),
            Span::styled("block/unblock  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("detail  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("←/→ s ", theme::key_hint_key()),
            Span::styled("sort", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);

        if let Some(detail_area) = detail_area {
            self.render_detail_panel(frame, detail_area);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
