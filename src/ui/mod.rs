mod chrome;
mod layout;
mod overlay;
mod table;

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::ViewState;
use crate::state::{FacetKind, SessionState};

pub use chrome::draw_chrome;
pub use layout::{UiLayout, split_layout};
pub use overlay::{draw_detail, draw_editor, draw_prompt};
pub use table::draw_browse;

/// Renders one session state; facets that are absent draw nothing.
pub fn draw_session(frame: &mut Frame<'_>, area: Rect, state: &SessionState, view: &ViewState) {
    let layout = split_layout(area, state);
    draw_chrome(frame, layout, state);
    draw_browse(frame, layout.body, state.browse(), view.cursor());

    if let Some(detail) = layout.detail {
        draw_detail(frame, detail, &state.detail().text);
    }
    if let Some(editor) = layout.editor {
        draw_editor(frame, editor, view.editor());
    }
    if let Some(prompt) = layout.prompt {
        let prefix = match state.active_text_facet() {
            Some(FacetKind::Sql) => "SQL> ",
            _ => ":",
        };
        draw_prompt(frame, prompt, prefix, view.line());
    }
}
