// Output formatting utilities: column views, task cards, the creation dialog

use crate::board::{CreationModal, Projection};
use crate::models::{Column, Task};
use anyhow::Result;
use serde::Serialize;
use std::io::IsTerminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_CYAN: &str = "\x1b[36m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

/// Narrowest column that still fits an id handle and a few title characters
const MIN_COLUMN_WIDTH: usize = 20;
const GUTTER: &str = " | ";
const DESCRIPTION_INDENT: &str = "    ";
const EMPTY_COLUMN: &str = "(empty)";

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Apply bold formatting if in TTY mode
fn bold_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Truncate to a terminal display width; wide characters count as two cells
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(2);
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let cells = ch.width().unwrap_or(0);
        if used + cells > budget {
            break;
        }
        used += cells;
        truncated.push(ch);
    }
    format!("{}..", truncated)
}

/// Left-align `text` in `width` display cells
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Rendering options for the board
#[derive(Debug, Clone)]
pub struct BoardRenderOptions {
    /// Total width available
    pub width: usize,
    /// Emit ANSI styling
    pub color: bool,
    /// Per-column drop hover flags, in column order
    pub hover: [bool; 3],
}

impl BoardRenderOptions {
    /// Options for the current terminal
    pub fn for_terminal() -> Self {
        Self {
            width: get_terminal_width(),
            color: is_tty(),
            hover: [false; 3],
        }
    }

    pub fn with_hover(mut self, hover: [bool; 3]) -> Self {
        self.hover = hover;
        self
    }
}

/// Column heading: label and live count; hovered drop targets are marked
pub fn format_column_heading(column: Column, count: usize, hovered: bool) -> String {
    if hovered {
        format!("> {} ({}) <", column.label(), count)
    } else {
        format!("{} ({})", column.label(), count)
    }
}

/// One task card: `[id] title` then indented description lines
pub fn format_card(task: &Task, width: usize) -> Vec<String> {
    let mut lines = vec![truncate(&format!("[{}] {}", task.id, task.title), width)];
    let inner = width.saturating_sub(DESCRIPTION_INDENT.len());
    for line in task.description.lines() {
        lines.push(format!("{}{}", DESCRIPTION_INDENT, truncate(line, inner)));
    }
    lines
}

/// A column view as plain, unpadded lines: heading, rule, then cards
fn column_lines(column: Column, tasks: &[&Task], hovered: bool, width: usize) -> Vec<String> {
    let heading = truncate(&format_column_heading(column, tasks.len(), hovered), width);
    let rule = "-".repeat(heading.width());
    let mut lines = vec![heading, rule];
    if tasks.is_empty() {
        lines.push(EMPTY_COLUMN.to_string());
    }
    for (idx, task) in tasks.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.extend(format_card(task, width));
    }
    lines
}

/// Style a padded cell according to which row of the column it is
fn style_cell(cell: &str, row: usize, hovered: bool, is_placeholder: bool, color: bool) -> String {
    if row == 0 {
        let heading = bold_if_tty(cell, color);
        if hovered && color {
            paint(&heading, ANSI_FG_CYAN, true)
        } else {
            heading
        }
    } else if is_placeholder {
        paint(cell, ANSI_FG_BRIGHT_BLACK, color)
    } else {
        cell.to_string()
    }
}

/// Render a single column view
pub fn format_column(column: Column, tasks: &[&Task], options: &BoardRenderOptions) -> String {
    let hovered = options.hover[column.index()];
    let lines = column_lines(column, tasks, hovered, options.width);
    let mut output = String::new();
    for (row, line) in lines.iter().enumerate() {
        let placeholder = tasks.is_empty() && row == 2;
        output.push_str(&style_cell(line, row, hovered, placeholder, options.color));
        output.push('\n');
    }
    output
}

/// Render the whole board.
///
/// Columns sit side by side when the width allows it, otherwise they are
/// stacked top to bottom.
pub fn format_board(projection: &Projection<'_>, options: &BoardRenderOptions) -> String {
    let gutters = GUTTER.len() * (Column::ALL.len() - 1);
    let column_width = options.width.saturating_sub(gutters) / Column::ALL.len();

    if column_width < MIN_COLUMN_WIDTH {
        let sections: Vec<String> = projection
            .iter()
            .map(|(column, tasks)| format_column(column, tasks, options))
            .collect();
        return sections.join("\n");
    }

    let columns: Vec<(Column, Vec<String>)> = projection
        .iter()
        .map(|(column, tasks)| {
            let hovered = options.hover[column.index()];
            (column, column_lines(column, tasks, hovered, column_width))
        })
        .collect();
    let height = columns.iter().map(|(_, lines)| lines.len()).max().unwrap_or(0);

    let mut output = String::new();
    for row in 0..height {
        let cells: Vec<String> = columns
            .iter()
            .map(|(column, lines)| {
                let text = lines.get(row).map(String::as_str).unwrap_or("");
                let padded = pad(text, column_width);
                let placeholder = projection.count(*column) == 0 && row == 2;
                style_cell(&padded, row, options.hover[column.index()], placeholder, options.color)
            })
            .collect();
        output.push_str(cells.join(GUTTER).trim_end());
        output.push('\n');
    }
    output
}

#[derive(Serialize)]
struct BoardJson<'a> {
    todo: &'a [&'a Task],
    progress: &'a [&'a Task],
    done: &'a [&'a Task],
}

/// Board as JSON, tasks grouped by column and carrying their ids
pub fn format_board_json(projection: &Projection<'_>) -> Result<String> {
    let json = BoardJson {
        todo: projection.tasks(Column::Todo),
        progress: projection.tasks(Column::Progress),
        done: projection.tasks(Column::Done),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Creation dialog, or nothing when it is closed
pub fn format_modal(modal: &CreationModal, color: bool) -> String {
    if !modal.is_open() {
        return String::new();
    }
    let input = modal.input();
    let mut output = format!("{}\n", bold_if_tty("=== New Task ===", color));
    output.push_str(&format!("Title: {}\n", input.title));
    output.push_str("Description:\n");
    for line in input.description.lines() {
        output.push_str(&format!("{}{}\n", DESCRIPTION_INDENT, line));
    }
    output
}
