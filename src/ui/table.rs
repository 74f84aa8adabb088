use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use unicode_width::UnicodeWidthStr;

use crate::state::BrowseFacet;

const MAX_COLUMN_WIDTH: usize = 40;

pub fn draw_browse(frame: &mut Frame<'_>, area: Rect, browse: &BrowseFacet, cursor: usize) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let title = browse.class.title();
    let block = Block::default()
        .title(if title.is_empty() {
            String::new()
        } else {
            format!(" {title} ")
        })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let widths = column_widths(browse);
    let header = Row::new(
        browse
            .headers()
            .iter()
            .map(|h| Cell::from(h.as_str()).style(Style::default().add_modifier(Modifier::BOLD))),
    );
    let rows = browse.rows().iter().map(|row| {
        Row::new(
            row.cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| Cell::from(truncate(cell, *width))),
        )
    });

    let table = Table::new(rows, widths.iter().map(|w| Constraint::Length(*w as u16)))
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::Rgb(45, 45, 50)));

    let mut state = TableState::default();
    if !browse.rows().is_empty() {
        state.select(Some(cursor.min(browse.rows().len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Display width of the widest cell per column, capped.
pub(crate) fn column_widths(browse: &BrowseFacet) -> Vec<usize> {
    let mut widths: Vec<usize> = browse.headers().iter().map(|h| h.width()).collect();
    for row in browse.rows() {
        for (idx, cell) in row.cells.iter().enumerate() {
            let width = cell.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
            match widths.get_mut(idx) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }
    widths
        .into_iter()
        .map(|w| w.clamp(1, MAX_COLUMN_WIDTH))
        .collect()
}

pub(crate) fn truncate(text: &str, max_width: usize) -> String {
    let text = text.lines().next().unwrap_or("");
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}
