//! Table column layouts.
//!
//! Authored lists exist in more than one table shape. Each [`Layout`] pairs a
//! predicate over a row's columns with the column positions it implies, and
//! [`detect`] returns the first layout in [`LAYOUTS`] that accepts the row.
//! New shapes are added by extending the table.

/// Substrings that mark a cell as pointing at a problem site.
pub const PROBLEM_SITES: &[&str] = &[
    "leetcode.cn",
    "leetcode.com",
    "leetcode-cn.com",
    "kamacoder.com",
    "nowcoder.com",
    "luogu.com.cn",
    "codeforces.com",
    "acwing.com",
];

/// Column positions for one table shape.
///
/// Indices address the trimmed segments of a split row, where segment 0 is
/// the empty text before the leading pipe, so column 1 is the first real
/// cell.
#[derive(Clone, Copy)]
pub struct Layout {
    pub name: &'static str,
    pub matches: fn(&[&str]) -> bool,
    pub primary: usize,
    pub secondary: usize,
    pub note: usize,
}

/// `|[title](url)|[label](url)|note|`
pub const CURRENT: Layout = Layout {
    name: "current",
    matches: primary_in_first_column,
    primary: 1,
    secondary: 2,
    note: 3,
};

/// `|category|[title](url)|[label](url)|note|`
pub const LEGACY: Layout = Layout {
    name: "legacy",
    matches: primary_in_second_column,
    primary: 2,
    secondary: 3,
    note: 4,
};

/// Best effort when no column names a known site.
pub const FALLBACK: Layout = Layout {
    name: "fallback",
    matches: any_row,
    primary: 1,
    secondary: 2,
    note: 3,
};

/// Layouts in priority order.
pub const LAYOUTS: &[Layout] = &[CURRENT, LEGACY, FALLBACK];

/// Pick the layout for a split row.
pub fn detect(cols: &[&str]) -> Layout {
    LAYOUTS
        .iter()
        .copied()
        .find(|layout| (layout.matches)(cols))
        .unwrap_or(FALLBACK)
}

fn primary_in_first_column(cols: &[&str]) -> bool {
    column_has_problem_site(cols, 1)
}

fn primary_in_second_column(cols: &[&str]) -> bool {
    column_has_problem_site(cols, 2)
}

fn any_row(_cols: &[&str]) -> bool {
    true
}

/// Whether the cell at `index` mentions a problem site.
pub fn column_has_problem_site(cols: &[&str], index: usize) -> bool {
    cols.get(index)
        .map(|cell| PROBLEM_SITES.iter().any(|site| cell.contains(site)))
        .unwrap_or(false)
}
