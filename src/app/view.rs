use crossterm::event::{Event as TerminalEvent, KeyCode, KeyEvent, KeyModifiers};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::state::{FacetKind, SessionState};

const PAGE_ROWS: usize = 10;

/// Widget-local state the core never sees: text buffers and the row cursor.
#[derive(Debug, Default)]
pub struct ViewState {
    line: Input,
    editor: String,
    cursor: usize,
    row_count: usize,
}

impl ViewState {
    pub fn for_state(state: &SessionState) -> Self {
        let mut view = Self::default();
        view.reset_for(state);
        view
    }

    /// Re-seeds buffers and cursor after the current state changed.
    pub fn reset_for(&mut self, state: &SessionState) {
        self.line = Input::new(match state.active_text_facet() {
            Some(FacetKind::Command) => state.command().text.clone(),
            Some(FacetKind::Sql) => state.sql().text.clone(),
            _ => String::new(),
        });
        self.editor = state.full_sql().text.clone();
        self.row_count = state.browse().rows().len();
        self.cursor = state.browse().selected.min(self.row_count.saturating_sub(1));
    }

    pub fn line(&self) -> &Input {
        &self.line
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text submitted with the next event for `state`.
    pub fn text_for(&self, state: &SessionState) -> &str {
        match state.active_text_facet() {
            Some(FacetKind::Command | FacetKind::Sql) => self.line.value(),
            Some(FacetKind::FullSql) => &self.editor,
            _ => "",
        }
    }

    /// Applies a key the router forwarded. Returns `true` when something
    /// visible changed.
    pub fn apply_forwarded(&mut self, state: &SessionState, key: KeyEvent) -> bool {
        match state.active_text_facet() {
            Some(FacetKind::Command | FacetKind::Sql) => self
                .line
                .handle_event(&TerminalEvent::Key(key))
                .is_some_and(|change| change.value || change.cursor),
            Some(FacetKind::FullSql) => self.edit(key),
            _ => self.move_cursor(key),
        }
    }

    fn edit(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => self.editor.push(ch),
            KeyCode::Enter => self.editor.push('\n'),
            KeyCode::Tab => self.editor.push_str("    "),
            KeyCode::Backspace => return self.editor.pop().is_some(),
            _ => return false,
        }
        true
    }

    fn move_cursor(&mut self, key: KeyEvent) -> bool {
        if self.row_count == 0 {
            return false;
        }
        let last = self.row_count - 1;
        let next = match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.cursor.saturating_add(1).min(last),
            KeyCode::Up | KeyCode::Char('k') => self.cursor.saturating_sub(1),
            KeyCode::PageDown => self.cursor.saturating_add(PAGE_ROWS).min(last),
            KeyCode::PageUp => self.cursor.saturating_sub(PAGE_ROWS),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => last,
            _ => return false,
        };
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::ViewState;
    use crate::state::{BrowseClass, BrowseFacet, Row, RowSet, StateBuilder};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn listing(rows: usize, selected: usize) -> crate::state::SessionState {
        let rows = (0..rows).map(|i| Row::new([format!("t{i}")])).collect();
        StateBuilder::new()
            .browse(
                BrowseFacet::new(BrowseClass::DatabaseTable, RowSet::new(["NAME"], rows))
                    .with_selected(selected),
            )
            .build()
    }

    #[test]
    fn cursor_starts_at_recorded_selection_and_clamps() {
        let state = listing(3, 2);
        let mut view = ViewState::for_state(&state);
        assert_eq!(view.cursor(), 2);

        assert!(!view.apply_forwarded(&state, key(KeyCode::Down)));
        assert!(view.apply_forwarded(&state, key(KeyCode::Home)));
        assert_eq!(view.cursor(), 0);
        assert!(!view.apply_forwarded(&state, key(KeyCode::Up)));
        assert!(view.apply_forwarded(&state, key(KeyCode::PageDown)));
        assert_eq!(view.cursor(), 2);
    }

    #[test]
    fn prompt_keys_edit_the_line_buffer() {
        let state = StateBuilder::from_state(&listing(1, 0)).empty_command().build();
        let mut view = ViewState::for_state(&state);
        for ch in "tablex".chars() {
            view.apply_forwarded(&state, key(KeyCode::Char(ch)));
        }
        view.apply_forwarded(&state, key(KeyCode::Backspace));

        assert_eq!(view.text_for(&state), "table");
        assert_eq!(view.cursor(), 0);
    }

    #[test]
    fn editor_keeps_newlines() {
        let state = StateBuilder::new().empty_full_sql().build();
        let mut view = ViewState::for_state(&state);
        for code in [KeyCode::Char('a'), KeyCode::Enter, KeyCode::Char('b')] {
            assert!(view.apply_forwarded(&state, key(code)));
        }
        assert_eq!(view.text_for(&state), "a\nb");
        assert_eq!(view.editor(), "a\nb");
    }
}
