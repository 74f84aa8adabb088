mod core;
mod event_bus;
mod event_loop;
pub(crate) mod terminal_session;
mod view;


pub use core::{App, LoopControl};
pub use view::ViewState;
