use ratatui::Frame;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::{FetchStatus, SessionState};

use super::layout::UiLayout;

pub fn draw_chrome(frame: &mut Frame<'_>, layout: UiLayout, state: &SessionState) {
    let key_style = Style::default().fg(Color::Yellow);
    let header: Vec<Line<'_>> = if state.header_info().is_empty() {
        vec![Line::from("rel8")]
    } else {
        state
            .header_info()
            .iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::styled(format!("{key}: "), key_style),
                    Span::raw(value.as_str()),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(header), layout.header);

    frame.render_widget(
        Paragraph::new(status_text(state)).style(Style::default().fg(Color::DarkGray)),
        layout.status,
    );
}

pub(crate) fn status_text(state: &SessionState) -> String {
    let browse = state.browse();
    let summary = match &browse.status {
        FetchStatus::Loaded => format!("{} rows", browse.rows().len()),
        FetchStatus::Empty => "no rows".to_string(),
        FetchStatus::Failed(message) => format!("fetch failed: {message}"),
    };
    format!("{state} | {summary} | : command  ! sql  s editor  esc back  ctrl-c quit")
}
