use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tui_input::Input;

pub fn draw_prompt(frame: &mut Frame<'_>, area: Rect, prefix: &str, input: &Input) {
    if area.width == 0 {
        return;
    }
    let width = (area.width as usize).saturating_sub(prefix.len() + 1).max(1);
    let scroll = input.visual_scroll(width);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(build_prompt_line(prefix, input.value(), input.visual_cursor()))
            .scroll((0, scroll as u16)),
        area,
    );
}

pub fn draw_editor(frame: &mut Frame<'_>, area: Rect, text: &str) {
    let block = Block::default()
        .title(" SQL editor (F5 execute) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(format!("{text}▏")).block(block), area);
}

pub fn draw_detail(frame: &mut Frame<'_>, area: Rect, text: &str) {
    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn build_prompt_line(prefix: &str, value: &str, cursor: usize) -> Line<'static> {
    let mut spans = vec![Span::styled(prefix.to_string(), Style::default().fg(Color::Yellow))];
    let chars: Vec<char> = value.chars().collect();
    let cursor = cursor.min(chars.len());
    for (idx, ch) in chars.iter().enumerate() {
        if idx == cursor {
            spans.push(Span::raw(ch.to_string()).reversed());
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    if cursor == chars.len() {
        spans.push(Span::raw(" ").reversed());
    }
    Line::from(spans)
}
