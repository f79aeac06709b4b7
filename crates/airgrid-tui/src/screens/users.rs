//! Users screen — console accounts: enable/disable, role cycling, and
//! login-as (session switch by email lookup).

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;

use airgrid_core::table::{TableView, compute};
use airgrid_core::{ListController, Role, Snapshot, User, UserPatch};

use crate::action::{Action, Toast};
use crate::component::Component;
use crate::theme;
use crate::widgets::status::enabled_span;
use crate::widgets::table::{TableNav, header_row, pagination_line};

pub struct UsersScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    ctl: ListController<User>,
    nav: TableNav,
    is_admin: bool,
    session_user_id: Option<String>,
    pending: HashMap<String, Snapshot<User>>,
}

impl UsersScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            focused: false,
            action_tx: None,
            ctl: ListController::new(),
            nav: TableNav::new::<User>(page_size, Some("name")),
            is_admin: false,
            session_user_id: None,
            pending: HashMap::new(),
        }
    }

    fn view(&self) -> TableView<'_, User> {
        compute(self.ctl.rows(), &self.nav.query)
    }

    fn selected_id(&self) -> Option<String> {
        self.view()
            .rows
            .get(self.nav.selected)
            .map(|u| u.id.clone())
    }

    fn admin_notice(&self) -> Option<Action> {
        if self.is_admin {
            None
        } else {
            Some(Action::Notify(Toast::info(
                "Admins only",
                "managing accounts requires the admin role",
            )))
        }
    }

    fn toggle_enabled(&mut self) -> Option<Action> {
        if let Some(notice) = self.admin_notice() {
            return Some(notice);
        }
        let id = self.selected_id()?;
        if self.session_user_id.as_deref() == Some(id.as_str()) {
            return Some(Action::Notify(Toast::info(
                "Not allowed",
                "you cannot disable the signed-in account",
            )));
        }
        let enabled = !self.ctl.get(&id)?.enabled;

        let snap = self.ctl.optimistic_patch(&id, |u| u.enabled = enabled)?;
        self.pending.insert(id.clone(), snap);
        Some(Action::UpdateUser {
            id,
            patch: UserPatch {
                enabled: Some(enabled),
                ..UserPatch::default()
            },
        })
    }

    fn cycle_role(&mut self) -> Option<Action> {
        if let Some(notice) = self.admin_notice() {
            return Some(notice);
        }
        let id = self.selected_id()?;
        let role = match self.ctl.get(&id)?.role {
            Role::Admin => Role::Operator,
            Role::Operator => Role::Viewer,
            Role::Viewer => Role::Admin,
        };

        let snap = self.ctl.optimistic_patch(&id, |u| u.role = role)?;
        self.pending.insert(id.clone(), snap);
        Some(Action::UpdateUser {
            id,
            patch: UserPatch {
                role: Some(role),
                ..UserPatch::default()
            },
        })
    }
}

impl Component for UsersScreen {
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
                Ok(Some(Action::LoadUsers))
            }
            KeyCode::Char(' ') => Ok(self.toggle_enabled()),
            KeyCode::Char('R') => Ok(self.cycle_role()),
            KeyCode::Char('L') => {
                let email = self
                    .selected_id()
                    .and_then(|id| self.ctl.get(&id).map(|u| u.email.clone()));
                Ok(email.map(Action::Login))
            }
            KeyCode::Char('o') => Ok(Some(Action::Logout)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::UsersLoaded(result) => {
                self.ctl.finish_load(result.clone());
                let len = self.view().rows.len();
                self.nav.clamp_selection(len);
            }

            Action::UserUpdateDone { id, result } => match result {
                Ok(user) => {
                    self.pending.remove(id);
                    self.ctl.commit(id, Some(user.clone()));
                    return Ok(Some(Action::Notify(Toast::success(
                        "User updated",
                        &user.name,
                    ))));
                }
                Err(report) => {
                    if let Some(snap) = self.pending.remove(id) {
                        self.ctl.fail(snap);
                    }
                    return Ok(Some(Action::Notify(Toast::error("Update failed", report))));
                }
            },

            Action::LoginDone(Ok(user)) => {
                self.is_admin = user.role.is_admin();
                self.session_user_id = Some(user.id.clone());
            }
            Action::Logout => {
                self.is_admin = false;
                self.session_user_id = None;
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
        let title = format!(" Users ({}) ", view.total_rows);

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
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

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
                Paragraph::new(Span::styled(" Loading users…", theme::key_hint())),
                layout[0],
            );
        }

        if self.ctl.has_data() {
            let rows: Vec<Row> = view
                .rows
                .iter()
                .enumerate()
                .map(|(i, user)| {
                    let selected = i == self.nav.selected;
                    let session_marker = if self.session_user_id.as_deref() == Some(&user.id) {
                        "▸ "
                    } else {
                        "  "
                    };
                    let name = if self.ctl.is_mutating(&user.id) {
                        format!("{session_marker}{} …", user.name)
                    } else {
                        format!("{session_marker}{}", user.name)
                    };

                    Row::new(vec![
                        Cell::from(name),
                        Cell::from(user.email.clone()).style(theme::key_hint()),
                        Cell::from(user.role.to_string()).style(theme::info_style()),
                        Cell::from(Line::from(enabled_span(user.enabled))),
                    ])
                    .style(if selected {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    })
                })
                .collect();

            let widths = [
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Length(10),
                Constraint::Length(10),
            ];

            let table = Table::new(rows, widths).header(header_row::<User>(&self.nav.query));
            frame.render_widget(table, layout[1]);
        }

        frame.render_widget(
            Paragraph::new(pagination_line(&view, &self.nav.query.filter)),
            layout[2],
        );

        let hints = Line::from(vec![
            Span::styled("  L ", theme::key_hint_key()),
            Span::styled("sign in as  ", theme::key_hint()),
            Span::styled("o ", theme::key_hint_key()),
            Span::styled("sign out  ", theme::key_hint()),
            Span::styled("Space ", theme::key_hint_key()),
            Span::styled("enable/disable  ", theme::key_hint()),
            Span::styled("R ", theme::key_hint_key()),
            Span::styled("cycle role", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
