use crossterm::event::{Event as TerminalEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::AppResult;
use crate::ui::draw_session;

use super::core::{App, LoopControl};
use super::event_bus::{InputEvent, InputPump};
use super::terminal_session::{TerminalSession, TerminalSurface};

impl App {
    /// Drives the session until a quit state is reached or input closes.
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        let (mut input_rx, mut pump) = InputPump::spawn();

        let result = self.drive(&mut session, &mut input_rx).await;

        pump.shutdown();
        self.router.stack().bus().drain().await;
        session.restore()?;
        result
    }

    async fn drive(
        &mut self,
        surface: &mut impl TerminalSurface,
        input_rx: &mut UnboundedReceiver<InputEvent>,
    ) -> AppResult<()> {
        if self.start()? == LoopControl::Break {
            return Ok(());
        }

        loop {
            self.redraw_if_dirty(surface)?;

            let Some(event) = input_rx.recv().await else {
                tracing::info!("input stream closed");
                return Ok(());
            };
            if self.handle_input(event)? == LoopControl::Break {
                return Ok(());
            }
        }
    }

    fn handle_input(&mut self, event: InputEvent) -> AppResult<LoopControl> {
        match event {
            InputEvent::Terminal(TerminalEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                self.handle_key(key)
            }
            InputEvent::Terminal(TerminalEvent::Resize(width, height)) => {
                tracing::debug!(width, height, "terminal resized");
                self.mark_dirty();
                Ok(LoopControl::Continue)
            }
            InputEvent::Terminal(_) => Ok(LoopControl::Continue),
            InputEvent::Failed(message) => {
                tracing::error!(error = %message, "terminal input failed");
                self.request_quit()
            }
        }
    }

    pub(crate) fn redraw_if_dirty(&mut self, surface: &mut impl TerminalSurface) -> AppResult<()> {
        if !self.take_dirty() {
            return Ok(());
        }
        let Some(current) = self.current() else {
            return Ok(());
        };
        surface.draw(|frame| draw_session(frame, frame.area(), &current, &self.view))?;
        Ok(())
    }
}
