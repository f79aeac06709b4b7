//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use airgrid_config::prefs::{Theme, UiPrefs};
use airgrid_core::{BackendHealth, Gateway, GatewayMode, Session};

use crate::action::{Action, Toast, ToastLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::jobs::Jobs;
use crate::screen::ScreenId;
use crate::screens::{RuntimeInfo, create_screens};
use crate::theme;
use crate::tui::Tui;

const TOAST_TTL: Duration = Duration::from_secs(5);
/// Health re-check cadence in ticks (4 Hz ticks → every 30s).
const HEALTH_EVERY_TICKS: u64 = 120;

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    gateway_mode: GatewayMode,
    health: Option<BackendHealth>,
    session: Session,
    help_visible: bool,
    search: Option<Input>,
    toasts: Vec<(Toast, Instant)>,
    prefs: UiPrefs,
    tick_count: u64,
    jobs: Jobs,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(gateway: Gateway, runtime: RuntimeInfo, page_size: usize, prefs: UiPrefs) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        theme::set_theme(prefs.theme);

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(page_size, runtime).into_iter().collect();
        let gateway_mode = gateway.mode();
        let jobs = Jobs::new(gateway, action_tx.clone());

        Self {
            active_screen: ScreenId::Dashboard,
            previous_screen: None,
            screens,
            running: true,
            gateway_mode,
            health: None,
            session: Session::anonymous(),
            help_visible: false,
            search: None,
            toasts: Vec::new(),
            prefs,
            tick_count: 0,
            jobs,
            action_tx,
            action_rx,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Kick off the initial loads: every section plus a health check,
    /// and (in mock mode) an automatic sign-in as the seeded admin.
    fn initial_actions(&self) {
        for action in [
            Action::LoadNetworks,
            Action::LoadAccessPoints,
            Action::LoadClients,
            Action::LoadAlerts,
            Action::LoadUsers,
            Action::LoadSettings,
            Action::CheckHealth,
        ] {
            let _ = self.action_tx.send(action);
        }
        if self.gateway_mode == GatewayMode::Mock {
            let _ = self
                .action_tx
                .send(Action::Login("admin@ocean.local".into()));
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;
        self.initial_actions();

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("event loop ended");
        Ok(())
    }

    // ── Key routing ──────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+C always quits, even inside forms
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if let Some(input) = &mut self.search {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => Ok(Some(Action::CloseSearch)),
                _ => {
                    input.handle_event(&crossterm::event::Event::Key(key));
                    Ok(Some(Action::SearchInput(input.value().to_owned())))
                }
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // A screen in form-editing mode owns the keyboard.
        let capturing = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.capturing_input());
        if capturing {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),
            (KeyModifiers::NONE, KeyCode::Char('t')) => return Ok(Some(Action::ToggleTheme)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='7')) => {
                #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    // ── Action routing ───────────────────────────────────────────────

    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(_, _) | Action::Render => {}

            Action::Tick => {
                self.tick_count += 1;
                self.toasts.retain(|(_, at)| at.elapsed() < TOAST_TTL);
                if self.tick_count % HEALTH_EVERY_TICKS == 0 {
                    let _ = self.action_tx.send(Action::CheckHealth);
                }
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {target}", self.active_screen);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::ToggleTheme => {
                self.prefs.theme = match self.prefs.theme {
                    Theme::Dark => Theme::Light,
                    Theme::Light => Theme::Dark,
                };
                theme::set_theme(self.prefs.theme);
                self.persist_prefs();
            }

            Action::OpenSearch => {
                self.search = Some(Input::default());
            }

            Action::CloseSearch => {
                self.search = None;
                self.forward_to_active(action)?;
            }

            Action::SearchInput(_) => {
                self.forward_to_active(action)?;
            }

            Action::Notify(toast) => {
                self.toasts.push((toast.clone(), Instant::now()));
            }

            Action::RememberNetwork(id) => {
                self.prefs.last_network_id = Some(id.clone());
                self.persist_prefs();
                let _ = self.action_tx.send(Action::Notify(Toast::info(
                    "Network selected",
                    id.clone(),
                )));
            }

            Action::RememberAccessPoint(id) => {
                self.prefs.last_ap_id = Some(id.clone());
                self.persist_prefs();
            }

            Action::Logout => {
                self.session.logout();
                let _ = self.action_tx.send(Action::Notify(Toast::info(
                    "Signed out",
                    "session is now read-only",
                )));
                self.broadcast(action)?;
            }

            Action::LoginDone(result) => {
                match result {
                    Ok(user) => {
                        self.session = Session::with_user(user.clone());
                        let _ = self.action_tx.send(Action::Notify(Toast::success(
                            "Signed in",
                            format!("{} ({})", user.name, user.role),
                        )));
                    }
                    Err(report) => {
                        let _ = self
                            .action_tx
                            .send(Action::Notify(Toast::error("Sign-in failed", report)));
                    }
                }
                self.broadcast(action)?;
            }

            Action::HealthChecked(result) => {
                match result {
                    Ok(health) => self.health = Some(health.clone()),
                    Err(report) => {
                        // only toast on a change, not every periodic failure
                        if self.health.is_some() {
                            let _ = self
                                .action_tx
                                .send(Action::Notify(Toast::error("Backend unhealthy", report)));
                        }
                        self.health = None;
                    }
                }
            }

            other => {
                // request actions go to the job runner…
                if self.jobs.handle(other) {
                    return Ok(());
                }
                // …results reach every screen (dashboard aggregates them all)
                self.broadcast(other)?;
            }
        }

        Ok(())
    }

    fn forward_to_active(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn persist_prefs(&self) {
        if let Err(e) = airgrid_config::prefs::save_prefs(&self.prefs) {
            warn!(error = %e, "failed to persist UI preferences");
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // screen content
            Constraint::Length(1), // tab bar
            Constraint::Length(1), // status bar / search
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);

        if let Some(input) = &self.search {
            self.render_search_bar(frame, layout[2], input);
        } else {
            self.render_status_bar(frame, layout[2]);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode = match self.gateway_mode {
            GatewayMode::Mock => Span::styled("◆ mock data", theme::warn_style()),
            GatewayMode::Remote => Span::styled("◆ remote", theme::info_style()),
        };

        let health = match &self.health {
            Some(h) => Span::styled(format!(" │ backend {}", h.status), theme::ok_style()),
            None => Span::styled(" │ backend unreachable", theme::err_style()),
        };

        let session = match self.session.user() {
            Some(user) => Span::styled(
                format!(" │ {} ({})", user.name, user.role),
                theme::info_style(),
            ),
            None => Span::styled(" │ signed out (read-only)", theme::key_hint()),
        };

        // newest toast wins the remaining space
        let toast = self.toasts.last().map(|(toast, _)| {
            let style = match toast.level {
                ToastLevel::Success => theme::ok_style(),
                ToastLevel::Error => theme::err_style(),
                ToastLevel::Info => theme::info_style(),
            };
            Span::styled(
                format!("  {}: {}", toast.title, toast.detail),
                style,
            )
        });

        let mut spans = vec![Span::raw(" "), mode, health, session];
        if let Some(toast) = toast {
            spans.push(toast);
        } else {
            spans.push(Span::styled(
                "  │ ? help  / search  q quit",
                theme::key_hint(),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_search_bar(&self, frame: &mut Frame, area: Rect, input: &Input) {
        let line = Line::from(vec![
            Span::styled(" filter ▸ ", theme::key_hint_key()),
            Span::styled(input.value().to_owned(), theme::table_row()),
            Span::styled("▏", theme::title_style()),
            Span::styled("   Enter/Esc close", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 62u16.min(area.width.saturating_sub(4));
        let help_height = 20u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::palette().highlight)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let key = |k: &'static str, desc: &'static str| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("  {k:<10}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled("  Navigation", theme::info_style())),
            key("1-7", "jump to section"),
            key("Tab", "next section"),
            key("j/k ↑/↓", "move selection"),
            key("n/p", "next / previous page"),
            key("←/→", "sort column"),
            key("s", "flip sort direction"),
            key("Enter", "select / detail"),
            key("Esc", "back / close"),
            Line::from(""),
            Line::from(Span::styled("  Global", theme::info_style())),
            key("/", "filter current table"),
            key("r", "reload current section"),
            key("t", "toggle theme"),
            key("?", "this help"),
            key("q", "quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                        Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
