pub mod app;
pub mod bus;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod event;
pub mod history;
pub mod input;
pub mod logging;
pub mod router;
pub mod state;
pub mod ui;
