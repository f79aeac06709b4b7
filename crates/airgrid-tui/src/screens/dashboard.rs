//! Dashboard screen — fleet health at a glance.
//!
//! Layout:
//! ┌─ Networks ─┐ ┌─ Access Points ─┐ ┌─ Clients ─┐ ┌─ Alerts ─┐
//! │ stat card  │ │ stat card       │ │ stat card │ │ stat card│
//! └────────────┘ └─────────────────┘ └───────────┘ └──────────┘
//! ┌─ Recent alerts ──────────────────────────────────────────┐
//! │ latest five, worst first                                  │
//! └──────────────────────────────────────────────────────────┘

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use airgrid_core::{AccessPoint, Alert, ApStatus, Client, ClientPresence, Network};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::fmt;
use crate::widgets::status::severity_span;

pub struct DashboardScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    networks: Vec<Network>,
    access_points: Vec<AccessPoint>,
    clients: Vec<Client>,
    alerts: Vec<Alert>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            networks: Vec::new(),
            access_points: Vec::new(),
            clients: Vec::new(),
            alerts: Vec::new(),
        }
    }

    fn render_card(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn big_stat(value: String, caption: &'static str) -> Vec<Line<'static>> {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {value}"),
                theme::title_style(),
            )),
            Line::from(Span::styled(format!("  {caption}"), theme::key_hint())),
        ]
    }
}

impl Component for DashboardScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('r') => {
                // refresh the whole overview
                if let Some(tx) = &self.action_tx {
                    let _ = tx.send(Action::LoadNetworks);
                    let _ = tx.send(Action::LoadAccessPoints);
                    let _ = tx.send(Action::LoadClients);
                    let _ = tx.send(Action::CheckHealth);
                }
                Ok(Some(Action::LoadAlerts))
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::NetworksLoaded(Ok(networks)) => {
                self.networks = networks.clone();
            }
            Action::AccessPointsLoaded(Ok(aps)) => {
                self.access_points = aps.clone();
            }
            Action::ClientsLoaded(Ok(clients)) => {
                self.clients = clients.clone();
            }
            Action::AlertsLoaded(Ok(alerts)) => {
                self.alerts = alerts.clone();
            }
            // optimistic confirmations keep the overview current
            Action::NetworkUpdateDone { result: Ok(network), .. } => {
                if let Some(slot) = self.networks.iter_mut().find(|n| n.id == network.id) {
                    *slot = network.clone();
                }
            }
            Action::ClientUpdateDone { result: Ok(client), .. } => {
                if let Some(slot) = self.clients.iter_mut().find(|c| c.id == client.id) {
                    *slot = client.clone();
                }
            }
            Action::AlertAckDone { result: Ok(alert), .. } => {
                if let Some(slot) = self.alerts.iter_mut().find(|a| a.id == alert.id) {
                    *slot = alert.clone();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Dashboard ")
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
            Constraint::Length(5), // stat cards
            Constraint::Min(3),    // recent alerts
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let cards = Layout::horizontal([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(layout[0]);

        // networks card
        let enabled = self.networks.iter().filter(|n| n.enabled).count();
        Self::render_card(
            frame,
            cards[0],
            "Networks",
            Self::big_stat(
                format!("{enabled}/{}", self.networks.len()),
                "SSIDs enabled",
            ),
        );

        // access points card
        let online = self
            .access_points
            .iter()
            .filter(|ap| ap.status == ApStatus::Online)
            .count();
        let degraded = self
            .access_points
            .iter()
            .filter(|ap| ap.status == ApStatus::Degraded)
            .count();
        let offline = self
            .access_points
            .iter()
            .filter(|ap| ap.status == ApStatus::Offline)
            .count();
        Self::render_card(
            frame,
            cards[1],
            "Access Points",
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!("  ● {online} "), theme::ok_style()),
                    Span::styled(format!(" ◐ {degraded} "), theme::warn_style()),
                    Span::styled(format!(" ○ {offline}"), theme::err_style()),
                ]),
                Line::from(Span::styled(
                    "  online / degraded / offline",
                    theme::key_hint(),
                )),
            ],
        );

        // clients card
        let connected = self
            .clients
            .iter()
            .filter(|c| c.presence() == ClientPresence::Online)
            .count();
        let blocked = self.clients.iter().filter(|c| c.blocked).count();
        Self::render_card(
            frame,
            cards[2],
            "Clients",
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!("  {connected} online"), theme::ok_style()),
                    Span::styled(format!("   {blocked} blocked"), theme::err_style()),
                ]),
                Line::from(Span::styled(
                    format!("  {} known devices", self.clients.len()),
                    theme::key_hint(),
                )),
            ],
        );

        // alerts card
        let unacked = self.alerts.iter().filter(|a| !a.acknowledged).count();
        Self::render_card(
            frame,
            cards[3],
            "Alerts",
            Self::big_stat(unacked.to_string(), "unacknowledged"),
        );

        // recent alerts, newest first
        let alerts_block = Block::default()
            .title(" Recent alerts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let alerts_inner = alerts_block.inner(layout[1]);
        frame.render_widget(alerts_block, layout[1]);

        let mut recent: Vec<&Alert> = self.alerts.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let now = chrono::Utc::now();

        let lines: Vec<Line> = if recent.is_empty() {
            vec![Line::from(Span::styled(
                "  no alerts — all quiet",
                theme::key_hint(),
            ))]
        } else {
            recent
                .iter()
                .take(usize::from(alerts_inner.height))
                .map(|alert| {
                    Line::from(vec![
                        Span::raw("  "),
                        severity_span(alert.severity),
                        Span::styled(format!("  {}", alert.title), theme::table_row()),
                        Span::styled(
                            format!("  — {}", alert.description),
                            theme::key_hint(),
                        ),
                        Span::styled(
                            format!("  ({})", fmt::fmt_ago(Some(alert.created_at), now)),
                            theme::key_hint(),
                        ),
                    ])
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(lines), alerts_inner);

        let hints = Line::from(vec![
            Span::styled("  r ", theme::key_hint_key()),
            Span::styled("refresh all  ", theme::key_hint()),
            Span::styled("2-7 ", theme::key_hint_key()),
            Span::styled("open a section  ", theme::key_hint()),
            Span::styled("? ", theme::key_hint_key()),
            Span::styled("help", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
