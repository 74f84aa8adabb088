use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::KeyEvent;

use crate::config::Config;
use crate::db::DatabaseServer;
use crate::error::AppResult;
use crate::event::Event;
use crate::history::StateStack;
use crate::logging::attach_transition_log;
use crate::router::{RouteOutcome, Router};
use crate::state::SessionState;

use super::view::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Break,
}

pub struct App {
    pub router: Router,
    pub view: ViewState,
    pub config: Config,
    dirty: Arc<AtomicBool>,
    shown: Option<Arc<SessionState>>,
}

impl App {
    pub fn new(server: Arc<dyn DatabaseServer>) -> AppResult<Self> {
        let config = Config::load()?;
        Self::new_with_config(server, config)
    }

    pub fn new_with_config(server: Arc<dyn DatabaseServer>, config: Config) -> AppResult<Self> {
        let stack = Arc::new(StateStack::new(config.session.max_history)?);
        attach_transition_log(stack.bus());

        let dirty = Arc::new(AtomicBool::new(true));
        {
            let dirty = Arc::clone(&dirty);
            stack
                .bus()
                .add_sync_observer(move |_| dirty.store(true, Ordering::Release));
        }

        let router = Router::new(stack, server)
            .with_fetch_timeout(config.session.fetch_timeout())
            .with_preset(config.keymap.preset());

        Ok(Self {
            router,
            view: ViewState::default(),
            config,
            dirty,
            shown: None,
        })
    }

    pub fn current(&self) -> Option<Arc<SessionState>> {
        self.router.stack().current()
    }

    pub fn start(&mut self) -> AppResult<LoopControl> {
        self.router.handle_event(&Event::init())?;
        Ok(self.sync_view())
    }

    pub fn request_quit(&mut self) -> AppResult<LoopControl> {
        if self.current().is_none() {
            return Ok(LoopControl::Break);
        }
        self.router.handle_event(&Event::quit())?;
        Ok(self.sync_view())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppResult<LoopControl> {
        let Some(current) = self.current() else {
            return Ok(LoopControl::Continue);
        };
        let event = Event::key(key)
            .with_text(self.view.text_for(&current))
            .with_row(self.view.cursor());

        if self.router.handle_event(&event)? == RouteOutcome::Forwarded
            && self.view.apply_forwarded(&current, key)
        {
            self.mark_dirty();
        }
        Ok(self.sync_view())
    }

    /// Clears the dirty flag, returning whether a redraw is due.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    fn sync_view(&mut self) -> LoopControl {
        let Some(current) = self.current() else {
            return LoopControl::Continue;
        };
        if current.is_quit() {
            return LoopControl::Break;
        }
        let changed = self
            .shown
            .as_ref()
            .is_none_or(|shown| !Arc::ptr_eq(shown, &current));
        if changed {
            self.view.reset_for(&current);
            self.shown = Some(current);
        }
        LoopControl::Continue
    }
}
