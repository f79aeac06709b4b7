//! Access points screen — AP table with a detail panel.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;

use airgrid_core::table::{TableView, compute};
use airgrid_core::{AccessPoint, ListController};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::fmt;
use crate::widgets::status::ap_status_span;
use crate::widgets::table::{TableNav, header_row, pagination_line};

pub struct AccessPointsScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    ctl: ListController<AccessPoint>,
    nav: TableNav,
    detail_open: bool,
}

impl AccessPointsScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            focused: false,
            action_tx: None,
            ctl: ListController::new(),
            nav: TableNav::new::<AccessPoint>(page_size, Some("name")),
            detail_open: false,
        }
    }

    fn view(&self) -> TableView<'_, AccessPoint> {
        compute(self.ctl.rows(), &self.nav.query)
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, ap: &AccessPoint) {
        let block = Block::default()
            .title(format!(" {}  ·  {} ", ap.name, ap.site))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

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
                ap_status_span(ap.status),
            ]),
            field("Channel", ap.channel.to_string()),
            field("Throughput", fmt::fmt_mbps(ap.throughput_mbps)),
            field("Uplink", ap.uplink.clone().unwrap_or_else(|| "─".into())),
            field(
                "Network",
                ap.network_id.clone().unwrap_or_else(|| "─".into()),
            ),
            field("Last seen", fmt::fmt_ago(ap.last_seen_at, now)),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for AccessPointsScreen {
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
                Ok(Some(Action::LoadAccessPoints))
            }
            KeyCode::Enter => {
                let selected = self
                    .view()
                    .rows
                    .get(self.nav.selected)
                    .map(|ap| ap.id.clone());
                if let Some(id) = selected {
                    self.detail_open = !self.detail_open;
                    return Ok(Some(Action::RememberAccessPoint(id)));
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::AccessPointsLoaded(result) => {
                self.ctl.finish_load(result.clone());
                let len = self.view().rows.len();
                self.nav.clamp_selection(len);
            }
            Action::AccessPointUpdateDone { id, result } => {
                if let Ok(ap) = result {
                    self.ctl.commit(id, Some(ap.clone()));
                }
            }
            Action::SearchInput(query) => {
                self.nav.query.set_filter(query.clone());
                let len = self.view().rows.len();
                self.nav.clamp_selection(len);
            }
            Action::CloseSearch => {
                self.nav.query.set_filter("");
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let view = self.view();
        let title = format!(" Access Points ({}/{}) ", view.filtered_rows, view.total_rows);

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
                Paragraph::new(Span::styled(" Loading access points…", theme::key_hint())),
                layout[0],
            );
        }

        if self.ctl.has_data() {
            let now = chrono::Utc::now();
            let rows: Vec<Row> = view
                .rows
                .iter()
                .enumerate()
                .map(|(i, ap)| {
                    let selected = i == self.nav.selected;
                    Row::new(vec![
                        Cell::from(ap.name.clone()),
                        Cell::from(ap.site.clone()),
                        Cell::from(Line::from(ap_status_span(ap.status))),
                        Cell::from(ap.channel.to_string()),
                        Cell::from(fmt::fmt_mbps(ap.throughput_mbps)),
                        Cell::from(ap.uplink.clone().unwrap_or_else(|| "─".into()))
                            .style(theme::key_hint()),
                        Cell::from(fmt::fmt_ago(ap.last_seen_at, now)).style(theme::key_hint()),
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
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(5),
                Constraint::Length(11),
                Constraint::Length(8),
                Constraint::Length(10),
            ];

            let table = Table::new(rows, widths).header(header_row::<AccessPoint>(&self.nav.query));
            frame.render_widget(table, layout[1]);
        }

        frame.render_widget(
            Paragraph::new(pagination_line(&view, &self.nav.query.filter)),
            layout[2],
        );

        let hints = Line::from(vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("detail/select  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload  ", theme::key_hint()),
            Span::styled("←/→ s ", theme::key_hint_key()),
            Span::styled("sort", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);

        if let Some(detail_area) = detail_area {
            if let Some(ap) = view.rows.get(self.nav.selected) {
                self.render_detail(frame, detail_area, ap);
            }
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
