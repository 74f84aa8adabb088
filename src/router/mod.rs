mod dispatch;
mod vocabulary;

#[cfg(test)]
mod tests;

pub use dispatch::{DEFAULT_FETCH_TIMEOUT, RouteOutcome, Router};
pub use vocabulary::{CatalogCommand, CommandSpec, all_command_specs, lookup_command};
