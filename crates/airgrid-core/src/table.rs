// ── Client-side table engine ──
//
// Transforms a slice of records into a displayable page given a
// free-text query, an optional sort key/direction, and a page size.
// Pure with respect to its inputs: same rows + query ⇒ same view, and
// the source slice is never mutated.
//
// Semantics:
//   filter    case-insensitive substring match over the record's
//             declared columns (an explicit allow-list, not a blind
//             serialization of the whole record)
//   sort      stable, single key; null cells sort last in BOTH
//             directions; numbers compare numerically, text
//             case-insensitively
//   paginate  total_pages = max(1, ceil(count / page_size));
//             page clamps to [1, total_pages]

use std::cmp::Ordering;

/// One cell of a row, as the engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Displays and filters as `label`, sorts by `rank` — for closed
    /// enumerations whose order is not alphabetical (severity, status).
    Ordinal { rank: f64, label: String },
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text form used for filtering. Null cells contribute nothing.
    fn filter_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.to_lowercase()),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Ordinal { label, .. } => Some(label.to_lowercase()),
            Self::Null => None,
        }
    }

    /// Natural ordering between two non-null cells: numeric when both
    /// sides are numeric/bool/ordinal, case-insensitive text otherwise.
    fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => {
                let a = self.filter_text().unwrap_or_default();
                let b = other.filter_text().unwrap_or_default();
                a.cmp(&b)
            }
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            Self::Ordinal { rank, .. } => Some(*rank),
            _ => None,
        }
    }
}

/// Column descriptor: the allow-list the filter and sorter operate on.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

/// A record the table engine can display.
pub trait Tabular {
    fn columns() -> &'static [Column];

    /// The cell for a column key. Unknown keys return `Null`.
    fn cell(&self, key: &str) -> CellValue;
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The view state a screen owns: query string, sort, current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub filter: String,
    pub sort: Option<(&'static str, SortDir)>,
    /// 1-based; clamped during compute.
    pub page: usize,
    pub page_size: usize,
}

impl TableQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn with_sort(mut self, key: &'static str, dir: SortDir) -> Self {
        self.sort = Some((key, dir));
        self
    }

    /// Replace the filter text. Always resets to page 1.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 1;
    }

    /// Toggle sort on `key`: same key flips direction, a new key
    /// resets to ascending. Either way the view jumps to page 1.
    pub fn toggle_sort(&mut self, key: &'static str) {
        self.sort = match self.sort {
            Some((current, dir)) if current == key => Some((key, dir.flip())),
            _ => Some((key, SortDir::Asc)),
        };
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn first_page(&mut self) {
        self.page = 1;
    }
}

/// One computed page plus the totals a screen needs for its chrome.
#[derive(Debug)]
pub struct TableView<'a, T> {
    /// Rows of the current page, in display order.
    pub rows: Vec<&'a T>,
    /// Effective (clamped) 1-based page.
    pub page: usize,
    pub total_pages: usize,
    /// Rows surviving the filter, across all pages.
    pub filtered_rows: usize,
    /// Rows in the input, before filtering.
    pub total_rows: usize,
}

/// Run filter → sort → paginate over `rows`.
pub fn compute<'a, T: Tabular>(rows: &'a [T], query: &TableQuery) -> TableView<'a, T> {
    let needle = query.filter.trim().to_lowercase();

    let mut matched: Vec<&T> = if needle.is_empty() {
        rows.iter().collect()
    } else {
        rows.iter().filter(|r| matches_filter(*r, &needle)).collect()
    };

    if let Some((key, dir)) = query.sort {
        // Stable sort; null cells pinned last regardless of direction.
        matched.sort_by(|a, b| {
            let ca = a.cell(key);
            let cb = b.cell(key);
            match (ca.is_null(), cb.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ord = ca.natural_cmp(&cb);
                    match dir {
                        SortDir::Asc => ord,
                        SortDir::Desc => ord.reverse(),
                    }
                }
            }
        });
    }

    let filtered_rows = matched.len();
    let total_pages = filtered_rows.div_ceil(query.page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let start = (page - 1) * query.page_size;
    let page_rows = matched
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .collect();

    TableView {
        rows: page_rows,
        page,
        total_pages,
        filtered_rows,
        total_rows: rows.len(),
    }
}

fn matches_filter<T: Tabular>(row: &T, needle: &str) -> bool {
    T::columns()
        .iter()
        .filter_map(|col| row.cell(col.key).filter_text())
        .any(|text| text.contains(needle))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: &'static str,
        name: &'static str,
        signal: Option<i32>,
    }

    impl Tabular for Row {
        fn columns() -> &'static [Column] {
            const COLS: &[Column] = &[
                Column {
                    key: "id",
                    label: "Id",
                    sortable: true,
                },
                Column {
                    key: "name",
                    label: "Name",
                    sortable: true,
                },
                Column {
                    key: "signal",
                    label: "Signal",
                    sortable: true,
                },
            ];
            COLS
        }

        fn cell(&self, key: &str) -> CellValue {
            match key {
                "id" => CellValue::Text(self.id.into()),
                "name" => CellValue::Text(self.name.into()),
                "signal" => self
                    .signal
                    .map_or(CellValue::Null, |s| CellValue::Number(f64::from(s))),
                _ => CellValue::Null,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "a",
                name: "Ocean-Staff",
                signal: Some(-55),
            },
            Row {
                id: "b",
                name: "Ocean-Guest",
                signal: Some(-48),
            },
            Row {
                id: "c",
                name: "Ocean-IoT",
                signal: None,
            },
            Row {
                id: "d",
                name: "lab-guest",
                signal: Some(-70),
            },
        ]
    }

    fn ids<'a>(view: &TableView<'a, Row>) -> Vec<&'static str> {
        view.rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let data = rows();
        let view = compute(&data, &TableQuery::new(10));
        assert_eq!(ids(&view), vec!["a", "b", "c", "d"]);
        assert_eq!(view.filtered_rows, 4);
        assert_eq!(view.total_rows, 4);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let data = rows();
        let mut q = TableQuery::new(10);
        q.set_filter("GUEST");
        let view = compute(&data, &q);
        assert_eq!(ids(&view), vec!["b", "d"]);
    }

    #[test]
    fn filter_resets_page() {
        let mut q = TableQuery::new(2);
        q.page = 3;
        q.set_filter("x");
        assert_eq!(q.page, 1);
    }

    #[test]
    fn sort_by_name_ascending() {
        let data = rows();
        let q = TableQuery::new(10).with_sort("name", SortDir::Asc);
        let view = compute(&data, &q);
        // case-insensitive: lab-guest before the Ocean-* group
        assert_eq!(ids(&view), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn nulls_sort_last_in_both_directions() {
        let data = rows();

        let asc = compute(&data, &TableQuery::new(10).with_sort("signal", SortDir::Asc));
        assert_eq!(ids(&asc), vec!["d", "a", "b", "c"]);

        let desc = compute(&data, &TableQuery::new(10).with_sort("signal", SortDir::Desc));
        assert_eq!(ids(&desc), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn toggling_same_key_twice_restores_original_order() {
        let data = rows();
        let mut q = TableQuery::new(10);

        q.toggle_sort("name");
        let first = ids(&compute(&data, &q));

        q.toggle_sort("name");
        q.toggle_sort("name");
        let third = ids(&compute(&data, &q));

        assert_eq!(first, third);
        assert_eq!(q.sort, Some(("name", SortDir::Asc)));
    }

    #[test]
    fn selecting_new_key_resets_to_ascending() {
        let mut q = TableQuery::new(10);
        q.toggle_sort("name");
        q.toggle_sort("name");
        assert_eq!(q.sort, Some(("name", SortDir::Desc)));

        q.toggle_sort("signal");
        assert_eq!(q.sort, Some(("signal", SortDir::Asc)));
        assert_eq!(q.page, 1);
    }

    #[test]
    fn pagination_covers_every_row_exactly_once() {
        let data: Vec<Row> = (0..23)
            .map(|i| Row {
                id: Box::leak(format!("r{i:02}").into_boxed_str()),
                name: Box::leak(format!("row {i:02}").into_boxed_str()),
                signal: Some(i),
            })
            .collect();

        let mut q = TableQuery::new(5).with_sort("name", SortDir::Asc);
        let first = compute(&data, &q);
        assert_eq!(first.total_pages, 5); // ceil(23 / 5)

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            q.page = page;
            let view = compute(&data, &q);
            seen.extend(ids(&view));
        }

        let full = {
            q.page = 1;
            let mut q_all = q.clone();
            q_all.page_size = 100;
            ids(&compute(&data, &q_all))
        };
        assert_eq!(seen, full);
        assert_eq!(seen.len(), 23);
    }

    #[test]
    fn page_clamps_to_valid_range() {
        let data = rows();
        let mut q = TableQuery::new(2);
        q.page = 99;
        let view = compute(&data, &q);
        assert_eq!(view.page, 2);
        assert_eq!(view.rows.len(), 2);

        q.page = 0;
        let view = compute(&data, &q);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn empty_input_still_reports_one_page() {
        let data: Vec<Row> = Vec::new();
        let view = compute(&data, &TableQuery::new(10));
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn compute_does_not_mutate_input_order() {
        let data = rows();
        let q = TableQuery::new(10).with_sort("name", SortDir::Desc);
        let _ = compute(&data, &q);
        assert_eq!(data[0].id, "a");
        assert_eq!(data[3].id, "d");
    }
}
