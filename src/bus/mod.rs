mod dispatcher;

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::AppResult;
use crate::event::Transition;

use dispatcher::AsyncDispatcher;

pub type Observer = Arc<dyn Fn(&Transition) + Send + Sync>;

/// Delivers every [`Transition`] to two observer registries.
///
/// Synchronous observers run inline, in registration order, before the
/// mutating call returns. Asynchronous observers are handed to a background
/// dispatcher and may still be running when the next mutation starts; use
/// them only for side effects such as logging.
pub struct NotificationBus {
    sync_observers: RwLock<Vec<Observer>>,
    async_observers: RwLock<Vec<Observer>>,
    dispatcher: AsyncDispatcher,
}

impl NotificationBus {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            sync_observers: RwLock::new(Vec::new()),
            async_observers: RwLock::new(Vec::new()),
            dispatcher: AsyncDispatcher::spawn()?,
        })
    }

    pub fn add_sync_observer<F>(&self, observer: F)
    where
        F: Fn(&Transition) + Send + Sync + 'static,
    {
        self.sync_observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    pub fn add_async_observer<F>(&self, observer: F)
    where
        F: Fn(&Transition) + Send + Sync + 'static,
    {
        self.async_observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    pub fn publish(&self, transition: &Transition) {
        // Snapshot so observers may register further observers without deadlocking.
        let sync_observers = snapshot(&self.sync_observers);
        for observer in &sync_observers {
            observer(transition);
        }

        for observer in snapshot(&self.async_observers) {
            self.dispatcher.dispatch(observer, transition.clone());
        }
    }

    /// Waits until every asynchronous notification queued so far has run.
    pub async fn drain(&self) {
        self.dispatcher.flush().await;
    }

    /// Blocking form of [`drain`](Self::drain) for callers outside an async
    /// context.
    pub fn drain_blocking(&self) {
        self.dispatcher.flush_blocking();
    }

    pub fn shutdown(&self) {
        self.dispatcher.shutdown();
    }
}

fn snapshot(observers: &RwLock<Vec<Observer>>) -> Vec<Observer> {
    observers
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
