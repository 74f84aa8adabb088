use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::{FacetKind, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeymapPreset {
    #[default]
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Emacs => "emacs",
        }
    }
}

/// Which widget currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Browse,
    /// Single-line prompt (command or SQL bar).
    Line,
    Editor,
}

impl KeyContext {
    pub fn for_state(state: &SessionState) -> Self {
        match state.active_text_facet() {
            Some(FacetKind::Command | FacetKind::Sql) => Self::Line,
            Some(FacetKind::FullSql) => Self::Editor,
            _ => Self::Browse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Terminate,
    Back,
    Submit,
    Execute,
    OpenCommand,
    OpenSql,
    OpenEditor,
    OpenRows,
    Describe,
}

pub fn map_key(key: KeyEvent, context: KeyContext) -> Option<KeyAction> {
    map_key_with_preset(key, context, KeymapPreset::Default)
}

pub fn map_key_with_preset(
    key: KeyEvent,
    context: KeyContext,
    preset: KeymapPreset,
) -> Option<KeyAction> {
    if let Some(action) = map_global_key(key, preset) {
        return Some(action);
    }

    match context {
        KeyContext::Line => (plain(key) && key.code == KeyCode::Enter).then_some(KeyAction::Submit),
        KeyContext::Editor => (key.code == KeyCode::F(5)).then_some(KeyAction::Execute),
        KeyContext::Browse => match preset {
            KeymapPreset::Default => map_browse_key_default(key),
            KeymapPreset::Emacs => map_browse_key_emacs(key),
        },
    }
}

fn map_global_key(key: KeyEvent, preset: KeymapPreset) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match (key.code, preset) {
            (KeyCode::Char('c'), _) => Some(KeyAction::Terminate),
            (KeyCode::Char('g'), KeymapPreset::Emacs) => Some(KeyAction::Back),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(KeyAction::Back),
        _ => None,
    }
}

fn map_browse_key_default(key: KeyEvent) -> Option<KeyAction> {
    if !plain(key) {
        return None;
    }

    match key.code {
        KeyCode::Char(':') => Some(KeyAction::OpenCommand),
        KeyCode::Char('!') => Some(KeyAction::OpenSql),
        KeyCode::Char('s') => Some(KeyAction::OpenEditor),
        KeyCode::Enter | KeyCode::Char('q') => Some(KeyAction::OpenRows),
        KeyCode::Char('d') => Some(KeyAction::Describe),
        _ => None,
    }
}

fn map_browse_key_emacs(key: KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('x') => Some(KeyAction::OpenCommand),
            _ => None,
        };
    }

    map_browse_key_default(key)
}

// Shift is allowed because ':' and '!' arrive shifted on most layouts.
fn plain(key: KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{KeyAction, KeyContext, KeymapPreset, map_key, map_key_with_preset};
    use crate::state::StateBuilder;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keymap_preset_parse_defaults_on_unknown_values() {
        assert_eq!(KeymapPreset::parse("default"), KeymapPreset::Default);
        assert_eq!(KeymapPreset::parse("emacs"), KeymapPreset::Emacs);
        assert_eq!(KeymapPreset::parse("vim"), KeymapPreset::Default);
    }

    #[test]
    fn terminate_and_back_apply_in_every_context() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for context in [KeyContext::Browse, KeyContext::Line, KeyContext::Editor] {
            assert_eq!(map_key(ctrl_c, context), Some(KeyAction::Terminate));
            assert_eq!(map_key(key(KeyCode::Esc), context), Some(KeyAction::Back));
        }
    }

    #[test]
    fn text_contexts_only_claim_their_completion_key() {
        assert_eq!(map_key(key(KeyCode::Enter), KeyContext::Line), Some(KeyAction::Submit));
        assert_eq!(map_key(key(KeyCode::Char('q')), KeyContext::Line), None);
        assert_eq!(map_key(key(KeyCode::Enter), KeyContext::Editor), None);
        assert_eq!(map_key(key(KeyCode::F(5)), KeyContext::Editor), Some(KeyAction::Execute));
    }

    #[test]
    fn browse_keys_open_overlays_and_rows() {
        let colon = KeyEvent::new(KeyCode::Char(':'), KeyModifiers::SHIFT);
        assert_eq!(map_key(colon, KeyContext::Browse), Some(KeyAction::OpenCommand));
        assert_eq!(map_key(key(KeyCode::Char('!')), KeyContext::Browse), Some(KeyAction::OpenSql));
        assert_eq!(map_key(key(KeyCode::Char('s')), KeyContext::Browse), Some(KeyAction::OpenEditor));
        assert_eq!(map_key(key(KeyCode::Char('q')), KeyContext::Browse), Some(KeyAction::OpenRows));
        assert_eq!(map_key(key(KeyCode::Char('d')), KeyContext::Browse), Some(KeyAction::Describe));
        assert_eq!(map_key(key(KeyCode::Down), KeyContext::Browse), None);
    }

    #[test]
    fn emacs_preset_maps_ctrl_g_and_alt_x() {
        let back = map_key_with_preset(
            KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL),
            KeyContext::Line,
            KeymapPreset::Emacs,
        );
        assert_eq!(back, Some(KeyAction::Back));

        let command = map_key_with_preset(
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT),
            KeyContext::Browse,
            KeymapPreset::Emacs,
        );
        assert_eq!(command, Some(KeyAction::OpenCommand));

        let default_ctrl_g = map_key(
            KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL),
            KeyContext::Browse,
        );
        assert_eq!(default_ctrl_g, None);
    }

    #[test]
    fn context_follows_active_text_facet() {
        let browse = StateBuilder::new().build();
        assert_eq!(KeyContext::for_state(&browse), KeyContext::Browse);
        let sql = StateBuilder::new().empty_sql().build();
        assert_eq!(KeyContext::for_state(&sql), KeyContext::Line);
        let editor = StateBuilder::new().empty_full_sql().build();
        assert_eq!(KeyContext::for_state(&editor), KeyContext::Editor);
    }
}
