mod stack;

pub use stack::{PopOutcome, StateStack};
