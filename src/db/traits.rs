use crate::context::FetchContext;
use crate::state::{HeaderInfo, RowSet};

/// Outcome of one collaborator call.
///
/// `Empty` and `Failed` never abort routing; they are recorded on the
/// resulting state so the presentation can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult<T> {
    Ok(T),
    Empty,
    Failed(String),
}

impl<T> FetchResult<T> {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn expired() -> Self {
        Self::Failed("context expired".to_string())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        match self {
            Self::Ok(value) => FetchResult::Ok(f(value)),
            Self::Empty => FetchResult::Empty,
            Self::Failed(message) => FetchResult::Failed(message),
        }
    }
}

impl FetchResult<RowSet> {
    /// `Empty` when the set carries no rows.
    pub fn rows(rows: RowSet) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Ok(rows)
        }
    }
}

/// Catalog listings reachable from the command vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Tables,
    Databases,
    Views,
    Procedures,
    Functions,
    Triggers,
}

pub trait DatabaseServer: Send + Sync {
    fn fetch_tables(&self, ctx: &FetchContext) -> FetchResult<RowSet>;
    fn fetch_databases(&self, ctx: &FetchContext) -> FetchResult<RowSet>;
    fn fetch_views(&self, ctx: &FetchContext) -> FetchResult<RowSet>;
    fn fetch_procedures(&self, ctx: &FetchContext) -> FetchResult<RowSet>;
    fn fetch_functions(&self, ctx: &FetchContext) -> FetchResult<RowSet>;
    fn fetch_triggers(&self, ctx: &FetchContext) -> FetchResult<RowSet>;
    fn fetch_table_rows(&self, ctx: &FetchContext, name: &str) -> FetchResult<RowSet>;
    fn fetch_sql_rows(&self, ctx: &FetchContext, query: &str) -> FetchResult<RowSet>;
    fn fetch_table_descr(&self, ctx: &FetchContext, name: &str) -> FetchResult<String>;
    fn server_info(&self, ctx: &FetchContext) -> FetchResult<HeaderInfo>;

    fn fetch_catalog(&self, ctx: &FetchContext, kind: CatalogKind) -> FetchResult<RowSet> {
        match kind {
            CatalogKind::Tables => self.fetch_tables(ctx),
            CatalogKind::Databases => self.fetch_databases(ctx),
            CatalogKind::Views => self.fetch_views(ctx),
            CatalogKind::Procedures => self.fetch_procedures(ctx),
            CatalogKind::Functions => self.fetch_functions(ctx),
            CatalogKind::Triggers => self.fetch_triggers(ctx),
        }
    }
}
