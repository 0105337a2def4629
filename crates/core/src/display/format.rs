use std::collections::BTreeSet;

use super::width::char_width;

/// Separator of script-style items, `name: command`.
pub const SCRIPT_SEPARATOR: &str = ": ";
/// Separator of workspace items, `name  -  path`.
pub const WORKSPACE_SEPARATOR: &str = "  -  ";

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];
/// Shown in place of control characters, which would move the cursor.
const CONTROL_PLACEHOLDER: char = ' ';

/// Structure recognised in an item string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemShape<'a> {
    Plain,
    Script { name: &'a str, detail: &'a str },
    Workspace { name: &'a str, path: &'a str },
}

impl<'a> ItemShape<'a> {
    #[must_use]
    pub fn detect(item: &'a str) -> Self {
        // A separator inside the detail of the other shape does not count.
        let workspace_at = item.find(WORKSPACE_SEPARATOR);
        let workspace_first = match (workspace_at, item.find(SCRIPT_SEPARATOR)) {
            (Some(workspace), Some(script)) => workspace < script,
            (workspace, _) => workspace.is_some(),
        };

        if workspace_first {
            if let Some((name, path)) = item.split_once(WORKSPACE_SEPARATOR) {
                if !name.trim().is_empty() {
                    return ItemShape::Workspace { name, path };
                }
            }
        }

        if let Some((name, detail)) = item.split_once(SCRIPT_SEPARATOR) {
            if !name.trim().is_empty() {
                return ItemShape::Script { name, detail };
            }
        }

        ItemShape::Plain
    }
}

/// What part of an item a displayed cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    Text,
    Name,
    Separator,
    Detail,
    /// Ellipsis or padding inserted by truncation.
    Filler,
}

/// One displayed character. `source` is its character offset in the item,
/// `None` for characters inserted by truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub source: Option<usize>,
    pub role: CellRole,
}

impl Cell {
    fn filler(ch: char) -> Self {
        Self {
            ch,
            source: None,
            role: CellRole::Filler,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        char_width(self.ch)
    }

    /// Whether this cell shows one of the matched `positions`.
    #[must_use]
    pub fn is_matched(&self, positions: &BTreeSet<usize>) -> bool {
        self.source.is_some_and(|s| positions.contains(&s))
    }
}

/// An item laid out for a given number of columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedItem {
    pub cells: Vec<Cell>,
}

impl FormattedItem {
    #[must_use]
    pub fn width(&self) -> usize {
        width_of(&self.cells)
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

fn width_of(cells: &[Cell]) -> usize {
    cells.iter().map(Cell::width).sum()
}

fn cells_for(text: &str, first_source: usize, role: CellRole) -> Vec<Cell> {
    text.chars()
        .enumerate()
        .map(|(i, ch)| Cell {
            ch: if ch.is_control() { CONTROL_PLACEHOLDER } else { ch },
            source: Some(first_source + i),
            role,
        })
        .collect()
}

/// Longest prefix of `cells` fitting in `budget` columns.
fn take_width(cells: &[Cell], budget: usize) -> Vec<Cell> {
    let mut used = 0;
    cells
        .iter()
        .take_while(|c| {
            used += c.width();
            used <= budget
        })
        .copied()
        .collect()
}

fn ellipsis() -> impl Iterator<Item = Cell> {
    ELLIPSIS.chars().map(Cell::filler)
}

/// Cuts `cells` down to `budget` columns. When anything is cut and there is
/// room, the result ends with an ellipsis and fills the budget exactly.
fn truncate_cells(cells: Vec<Cell>, budget: usize) -> Vec<Cell> {
    if width_of(&cells) <= budget {
        return cells;
    }

    if budget <= ELLIPSIS_WIDTH {
        return take_width(&cells, budget);
    }

    let mut kept = take_width(&cells, budget - ELLIPSIS_WIDTH);
    let padding = budget - ELLIPSIS_WIDTH - width_of(&kept);
    kept.extend(std::iter::repeat(Cell::filler(' ')).take(padding));
    kept.extend(ellipsis());
    kept
}

/// Cuts a path from the left, keeping its tail and preferring to start at a
/// path separator so the last segments stay whole.
fn truncate_path(cells: Vec<Cell>, budget: usize) -> Vec<Cell> {
    if width_of(&cells) <= budget {
        return cells;
    }

    if budget <= ELLIPSIS_WIDTH {
        return take_width(&cells, budget);
    }

    let tail_budget = budget - ELLIPSIS_WIDTH;
    let mut tail_width = 0;
    let mut min_start = cells.len();
    for (i, cell) in cells.iter().enumerate().rev() {
        tail_width += cell.width();
        if tail_width > tail_budget {
            break;
        }
        min_start = i;
    }

    let start = cells[min_start..]
        .iter()
        .position(|c| PATH_SEPARATORS.contains(&c.ch))
        .map_or(min_start, |offset| min_start + offset);

    ellipsis().chain(cells[start..].iter().copied()).collect()
}

fn format_structured(
    name: &str,
    separator: &str,
    rest: &str,
    available_columns: usize,
    truncate_rest: fn(Vec<Cell>, usize) -> Vec<Cell>,
) -> Vec<Cell> {
    let name_len = name.chars().count();
    let separator_len = separator.chars().count();

    let mut fixed = cells_for(name, 0, CellRole::Name);
    fixed.extend(cells_for(separator, name_len, CellRole::Separator));
    let rest = cells_for(rest, name_len + separator_len, CellRole::Detail);

    let fixed_width = width_of(&fixed);
    if fixed_width > available_columns {
        fixed.extend(rest);
        return truncate_cells(fixed, available_columns);
    }

    fixed.extend(truncate_rest(rest, available_columns - fixed_width));
    fixed
}

/// Lays out `item` in at most `available_columns` columns.
///
/// Structured items keep their name and separator whole and truncate only
/// the detail (or path) part, unless the name alone does not fit.
#[must_use]
pub fn format_item(item: &str, available_columns: usize) -> FormattedItem {
    let cells = match ItemShape::detect(item) {
        ItemShape::Plain => truncate_cells(cells_for(item, 0, CellRole::Text), available_columns),
        ItemShape::Script { name, detail } => format_structured(
            name,
            SCRIPT_SEPARATOR,
            detail,
            available_columns,
            truncate_cells,
        ),
        ItemShape::Workspace { name, path } => format_structured(
            name,
            WORKSPACE_SEPARATOR,
            path,
            available_columns,
            truncate_path,
        ),
    };

    FormattedItem { cells }
}

/// Plain truncation of a whole line of text to `available_columns`.
#[must_use]
pub fn truncate_line(text: &str, available_columns: usize) -> String {
    truncate_cells(cells_for(text, 0, CellRole::Text), available_columns)
        .into_iter()
        .map(|c| c.ch)
        .collect()
}
