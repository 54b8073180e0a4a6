//! TUI layout and rendering with ratatui.
//!
//! # Overview
//!
//! Two mutually exclusive screens:
//! - **Loading**: a spinner and nothing else
//! - **Loaded**: header, search input, Hash/Files table, footer
//!
//! Rendering reads [`ReportView`] only; the filtered rows are derived during
//! the draw.
//!
//! # Example
//!
//! ```no_run
//! use dupview::tui::app::ReportView;
//! use dupview::tui::ui::render;
//! use ratatui::Frame;
//!
//! fn draw(frame: &mut Frame, view: &ReportView) {
//!     render(frame, view);
//! }
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::app::ReportView;
use crate::report::ReportEntry;

/// Title shown above the search box.
pub const TITLE: &str = "Duplicate File Report";

/// Placeholder shown in the empty search box.
pub const SEARCH_PLACEHOLDER: &str = "Search files...";

/// Text of the loading indicator.
pub const LOADING_TEXT: &str = "Loading report...";

/// Header, search box, footer, table borders and the column header row.
const CHROME_ROWS: u16 = 3 + 3 + 3 + 2 + 1;

/// Widest the hash column may grow, in cells.
const MAX_HASH_WIDTH: u16 = 64;

/// ASCII border set for terminals without box-drawing glyphs.
const ASCII_BORDER_SET: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

fn create_block<'a>(ascii: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(if ascii { ASCII_BORDER_SET } else { border::ROUNDED })
}

/// Number of terminal lines available to table rows for a given screen.
#[must_use]
pub fn table_viewport_rows(area: Rect) -> usize {
    area.height.saturating_sub(CHROME_ROWS).max(1) as usize
}

/// Render the view.
pub fn render(frame: &mut Frame, view: &ReportView) {
    if view.is_loading() {
        render_loading(frame, view, frame.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_search(frame, view, chunks[1]);
    render_table(frame, view, chunks[2]);
    render_footer(frame, view, chunks[3]);
}

/// Render the loading indicator alone, centered.
fn render_loading(frame: &mut Frame, view: &ReportView, area: Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let indicator = Paragraph::new(format!("{} {}", view.spinner_frame(), LOADING_TEXT))
        .style(Style::default().fg(view.theme().primary))
        .alignment(Alignment::Center);
    frame.render_widget(indicator, vertical[1]);
}

fn render_header(frame: &mut Frame, view: &ReportView, area: Rect) {
    let header = Paragraph::new(TITLE)
        .style(
            Style::default()
                .fg(view.theme().primary)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            create_block(view.ascii_borders())
                .border_style(Style::default().fg(view.theme().primary)),
        );
    frame.render_widget(header, area);
}

fn render_search(frame: &mut Frame, view: &ReportView, area: Rect) {
    let theme = view.theme();
    let term = view.search_term();

    let content = if term.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(theme.dim))
    } else {
        Span::styled(term.to_string(), Style::default().fg(theme.secondary))
    };

    let input = Paragraph::new(Line::from(content)).block(
        create_block(view.ascii_borders())
            .title("Search")
            .border_style(Style::default().fg(theme.secondary)),
    );
    frame.render_widget(input, area);

    // Cursor sits after the typed text, inside the border
    let typed = u16::try_from(term.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.x + area.width.saturating_sub(2);
    let x = (area.x + 1).saturating_add(typed).min(max_x);
    frame.set_cursor_position((x, area.y + 1));
}

fn render_table(frame: &mut Frame, view: &ReportView, area: Rect) {
    let theme = view.theme();
    let rows_data = view.filtered_view();
    let total = view.report().len();

    let hash_width = rows_data
        .iter()
        .map(|entry| u16::try_from(entry.hash.chars().count()).unwrap_or(u16::MAX))
        .max()
        .unwrap_or(4)
        .clamp(4, MAX_HASH_WIDTH)
        .min(area.width / 3);

    // Lines that fit below the column header, inside the borders
    let visible_lines = usize::from(area.height.saturating_sub(3));
    let rows = visible_rows(&rows_data, view.scroll(), visible_lines)
        .into_iter()
        .map(|line| {
            let hash_style = if line.continued {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.accent)
            };
            Row::new(vec![
                Cell::from(line.hash).style(hash_style),
                Cell::from(line.file).style(Style::default().fg(theme.normal)),
            ])
        });

    let header = Row::new(vec![Cell::from("Hash"), Cell::from("Files")]).style(
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    );

    let (title, title_style) = if view.shows_fetch_error() {
        (
            "Report unavailable".to_string(),
            Style::default().fg(theme.danger),
        )
    } else {
        (
            format!("Groups ({}/{})", rows_data.len(), total),
            Style::default().fg(theme.primary),
        )
    };

    let table = Table::new(rows, [Constraint::Length(hash_width), Constraint::Min(0)])
        .header(header)
        .column_spacing(2)
        .block(
            create_block(view.ascii_borders())
                .title(Span::styled(title, title_style))
                .border_style(Style::default().fg(theme.primary)),
        );

    frame.render_widget(table, area);
}

/// One table line: a single file of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TableLine<'a> {
    /// Hash on the group's first line and on the top visible line, else empty
    hash: &'a str,
    /// True when the hash repeats a group that started above the viewport
    continued: bool,
    file: &'a str,
}

/// Flatten the filtered groups into table lines, starting `scroll` lines in
/// and stopping after `limit` lines.
fn visible_rows<'a>(entries: &[&'a ReportEntry], scroll: usize, limit: usize) -> Vec<TableLine<'a>> {
    let mut lines = Vec::with_capacity(limit);
    let mut start = 0;

    for &entry in entries {
        let height = entry.line_count();
        if start + height <= scroll {
            start += height;
            continue;
        }

        let files: Vec<&'a str> = if entry.files.is_empty() {
            vec![""]
        } else {
            entry.files.iter().map(String::as_str).collect()
        };

        for (index, file) in files.into_iter().enumerate() {
            if start + index < scroll {
                continue;
            }
            if lines.len() == limit {
                return lines;
            }
            let top = lines.is_empty();
            lines.push(TableLine {
                hash: if index == 0 || top { entry.hash.as_str() } else { "" },
                continued: index > 0 && top,
                file,
            });
        }
        start += height;
    }
    lines
}

fn render_footer(frame: &mut Frame, view: &ReportView, area: Rect) {
    let theme = view.theme();
    let scroll_keys = if view.ascii_borders() {
        "Up/Dn PgUp/PgDn"
    } else {
        "↑↓ PgUp/PgDn"
    };
    let hints = [
        ("Type", "Filter"),
        ("Bksp", "Erase"),
        (scroll_keys, "Scroll"),
        ("Esc", "Quit"),
    ];

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(
                    format!("[{}]", key),
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}  ", desc), Style::default().fg(theme.normal)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(create_block(view.ascii_borders()).border_style(Style::default().fg(theme.dim)));
    frame.render_widget(footer, area);
}
