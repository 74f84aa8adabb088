use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::state::SessionState;

/// One stack mutation as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Arc<SessionState>,
    pub to: Arc<SessionState>,
    pub is_pop: bool,
}

impl Transition {
    pub fn push(from: Arc<SessionState>, to: Arc<SessionState>) -> Self {
        Self {
            from,
            to,
            is_pop: false,
        }
    }

    pub fn pop(from: Arc<SessionState>, to: Arc<SessionState>) -> Self {
        Self {
            from,
            to,
            is_pop: true,
        }
    }

    /// Degenerate transition fired for input the presentation handles alone.
    pub fn unchanged(current: Arc<SessionState>) -> Self {
        Self {
            from: Arc::clone(&current),
            to: current,
            is_pop: false,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        !self.is_pop && Arc::ptr_eq(&self.from, &self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Init,
    Quit,
    Other,
}

/// Tree node the presentation had selected when the event was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub path: Vec<String>,
}

/// One user input, produced by the presentation and routed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub key: Option<KeyEvent>,
    /// Contents of the active text widget at the time of the key press.
    pub text: String,
    /// 0-based index of the selected data row.
    pub row: usize,
    pub tree_node: Option<TreeNode>,
}

impl Event {
    pub fn init() -> Self {
        Self {
            kind: EventKind::Init,
            key: None,
            text: String::new(),
            row: 0,
            tree_node: None,
        }
    }

    pub fn quit() -> Self {
        Self {
            kind: EventKind::Quit,
            ..Self::init()
        }
    }

    pub fn key(key: KeyEvent) -> Self {
        Self {
            kind: EventKind::Other,
            key: Some(key),
            ..Self::init()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    pub fn with_tree_node(mut self, node: TreeNode) -> Self {
        self.tree_node = Some(node);
        self
    }
}
