//! Shared table chrome: navigation state, header row with sort glyphs,
//! pagination footer. Screens own the rows and the styling of their
//! cells; the sorting/filtering/paging semantics live in
//! `airgrid_core::table`.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Row};

use airgrid_core::table::{SortDir, TableQuery, TableView, Tabular};

use crate::theme;

/// Per-screen table state: the engine query plus cursor position and
/// the active sort column index.
pub struct TableNav {
    pub query: TableQuery,
    /// Selected row within the current page.
    pub selected: usize,
    sort_keys: Vec<&'static str>,
    sort_idx: usize,
}

impl TableNav {
    /// Build for a row type, optionally starting sorted on `initial`.
    pub fn new<T: Tabular>(page_size: usize, initial: Option<&'static str>) -> Self {
        let sort_keys: Vec<&'static str> = T::columns()
            .iter()
            .filter(|c| c.sortable)
            .map(|c| c.key)
            .collect();

        let mut query = TableQuery::new(page_size);
        let mut sort_idx = 0;
        if let Some(key) = initial {
            query.toggle_sort(key);
            sort_idx = sort_keys.iter().position(|&k| k == key).unwrap_or(0);
        }

        Self {
            query,
            selected: 0,
            sort_keys,
            sort_idx,
        }
    }

    /// Uniform navigation keys. Returns `true` when the key was
    /// consumed. `page_len` is the row count of the current page.
    pub fn handle_key(&mut self, key: KeyEvent, page_len: usize) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if page_len > 0 {
                    self.selected = (self.selected + 1).min(page_len - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = page_len.saturating_sub(1);
            }
            KeyCode::Char('n') | KeyCode::Char(']') => {
                self.query.next_page();
                self.selected = 0;
            }
            KeyCode::Char('p') | KeyCode::Char('[') => {
                self.query.prev_page();
                self.selected = 0;
            }
            KeyCode::Left => {
                if !self.sort_keys.is_empty() {
                    self.sort_idx =
                        (self.sort_idx + self.sort_keys.len() - 1) % self.sort_keys.len();
                    self.query.toggle_sort(self.sort_keys[self.sort_idx]);
                    self.force_ascending();
                }
            }
            KeyCode::Right => {
                if !self.sort_keys.is_empty() {
                    self.sort_idx = (self.sort_idx + 1) % self.sort_keys.len();
                    self.query.toggle_sort(self.sort_keys[self.sort_idx]);
                    self.force_ascending();
                }
            }
            KeyCode::Char('s') => {
                // flip direction on the active column
                if let Some(key) = self.sort_keys.get(self.sort_idx) {
                    self.query.toggle_sort(key);
                }
            }
            _ => return false,
        }
        true
    }

    /// Arrow navigation always lands on a fresh ascending sort, even
    /// when stepping back onto the previously active column.
    fn force_ascending(&mut self) {
        if let Some((key, SortDir::Desc)) = self.query.sort {
            self.query.toggle_sort(key);
        }
    }

    /// Clamp the cursor after the view shrank (filter, reload, page).
    pub fn clamp_selection(&mut self, page_len: usize) {
        if page_len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(page_len - 1);
        }
    }

    /// Sync the stored page back from a computed (clamped) view.
    pub fn sync_page<T>(&mut self, view: &TableView<'_, T>) {
        self.query.page = view.page;
    }
}

/// Header row with ▲/▼ on the active sort column.
pub fn header_row<T: Tabular>(query: &TableQuery) -> Row<'static> {
    let cells: Vec<Cell> = T::columns()
        .iter()
        .map(|col| {
            let glyph = match query.sort {
                Some((key, SortDir::Asc)) if key == col.key => " ▲",
                Some((key, SortDir::Desc)) if key == col.key => " ▼",
                _ if col.sortable => " ↕",
                _ => "",
            };
            Cell::from(format!("{}{glyph}", col.label)).style(theme::table_header())
        })
        .collect();
    Row::new(cells)
}

/// Footer: "14 items • page 2/3  filter: guest".
pub fn pagination_line<T>(view: &TableView<'_, T>, filter: &str) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(
            "{} items • page {}/{}",
            view.filtered_rows, view.page, view.total_pages
        ),
        theme::key_hint(),
    )];
    if !filter.is_empty() {
        spans.push(Span::styled(
            format!("  filter: {filter}"),
            theme::info_style(),
        ));
    }
    Line::from(spans)
}
