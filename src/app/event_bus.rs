use crossterm::event::{Event as TerminalEvent, EventStream};
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

/// Raw terminal input as delivered to the shell loop.
#[derive(Debug)]
pub(crate) enum InputEvent {
    Terminal(TerminalEvent),
    Failed(String),
}

/// Owns the task that pumps the crossterm event stream into a channel.
pub(crate) struct InputPump {
    task: Option<JoinHandle<()>>,
}

impl InputPump {
    pub(crate) fn spawn() -> (UnboundedReceiver<InputEvent>, Self) {
        let (tx, rx) = unbounded_channel();
        let task = spawn_input_task(tx);
        (rx, Self { task: Some(task) })
    }

    pub(crate) fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_input_task(tx: UnboundedSender<InputEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let event = match event {
                Ok(event) => InputEvent::Terminal(event),
                Err(err) => InputEvent::Failed(err.to_string()),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    })
}
