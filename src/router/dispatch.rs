use std::sync::Arc;
use std::time::Duration;

use crate::context::FetchContext;
use crate::db::{DatabaseServer, FetchResult};
use crate::error::AppResult;
use crate::event::{Event, EventKind};
use crate::history::StateStack;
use crate::input::{KeyAction, KeyContext, KeymapPreset, map_key_with_preset};
use crate::state::{
    BrowseClass, BrowseFacet, FacetKind, FetchStatus, HeaderInfo, RowSet, SessionState,
    StateBuilder,
};

use super::vocabulary::{CatalogCommand, lookup_command};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether the presentation should still hand the raw key to its widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Consumed,
    Forwarded,
}

impl RouteOutcome {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}

/// Maps one input event onto at most one stack mutation.
///
/// Every collaborator call gets its own `fetch_timeout` context. Stack
/// mutations use the session context instead, so a fetch that ran out its
/// deadline still records its (failed) result.
pub struct Router {
    stack: Arc<StateStack>,
    server: Arc<dyn DatabaseServer>,
    fetch_timeout: Duration,
    preset: KeymapPreset,
    session: FetchContext,
}

impl Router {
    pub fn new(stack: Arc<StateStack>, server: Arc<dyn DatabaseServer>) -> Self {
        Self {
            stack,
            server,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            preset: KeymapPreset::Default,
            session: FetchContext::background(),
        }
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn with_preset(mut self, preset: KeymapPreset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_session_context(mut self, session: FetchContext) -> Self {
        self.session = session;
        self
    }

    pub fn stack(&self) -> &Arc<StateStack> {
        &self.stack
    }

    pub fn preset(&self) -> KeymapPreset {
        self.preset
    }

    pub fn handle_event(&self, event: &Event) -> AppResult<RouteOutcome> {
        if event.kind == EventKind::Init {
            self.init()?;
            return Ok(RouteOutcome::Consumed);
        }

        // Only init may push onto an empty stack.
        let Some(current) = self.stack.current() else {
            tracing::debug!(kind = ?event.kind, "event before init");
            return Ok(match event.kind {
                EventKind::Quit => RouteOutcome::Consumed,
                _ => RouteOutcome::Forwarded,
            });
        };
        if event.kind == EventKind::Quit {
            self.push_quit()?;
            return Ok(RouteOutcome::Consumed);
        }
        let Some(key) = event.key else {
            self.stack.notify_unchanged();
            return Ok(RouteOutcome::Forwarded);
        };
        let action = map_key_with_preset(key, KeyContext::for_state(&current), self.preset);

        match action {
            Some(KeyAction::Terminate) => {
                self.push_quit()?;
                return Ok(RouteOutcome::Consumed);
            }
            Some(KeyAction::Back) => {
                let outcome = self.stack.pop_state(&self.session)?;
                tracing::debug!(popped = outcome.popped(), "back");
                return Ok(RouteOutcome::Consumed);
            }
            _ => {}
        }

        if let Some(facet) = current.active_text_facet() {
            let text = submitted_text(&current, facet, event);
            return match (facet, action) {
                (FacetKind::Command, Some(KeyAction::Submit)) => {
                    self.submit_command(&current, text)?;
                    Ok(RouteOutcome::Consumed)
                }
                (FacetKind::Sql, Some(KeyAction::Submit))
                | (FacetKind::FullSql, Some(KeyAction::Execute)) => {
                    self.submit_sql(&current, text)?;
                    Ok(RouteOutcome::Consumed)
                }
                _ => Ok(RouteOutcome::Forwarded),
            };
        }

        if let Some(action @ (KeyAction::OpenRows | KeyAction::Describe)) = action {
            if self.open_row(&current, action, event.row)? {
                return Ok(RouteOutcome::Consumed);
            }
        }

        let overlay = match action {
            Some(KeyAction::OpenCommand) => Some(StateBuilder::from_state(&current).empty_command()),
            Some(KeyAction::OpenSql) => Some(StateBuilder::from_state(&current).empty_sql()),
            Some(KeyAction::OpenEditor) => Some(StateBuilder::from_state(&current).empty_full_sql()),
            _ => None,
        };
        if let Some(builder) = overlay {
            self.stack.push_state(&self.session, builder.build())?;
            return Ok(RouteOutcome::Consumed);
        }

        if let Some(node) = &event.tree_node {
            tracing::debug!(path = ?node.path, "tree navigation");
        }
        self.stack.notify_unchanged();
        Ok(RouteOutcome::Forwarded)
    }

    fn init(&self) -> AppResult<()> {
        let tables = self.server.fetch_tables(&self.fetch_context());
        let info = match self.server.server_info(&self.fetch_context()) {
            FetchResult::Ok(info) => info,
            FetchResult::Empty => HeaderInfo::new(),
            FetchResult::Failed(message) => {
                tracing::warn!(error = %message, "server info fetch failed");
                HeaderInfo::new()
            }
        };
        let state = StateBuilder::new()
            .common(info)
            .browse(browse_facet(BrowseClass::DatabaseTable, tables, "tables"))
            .build();
        self.stack.push_state(&self.session, state)
    }

    fn push_quit(&self) -> AppResult<()> {
        tracing::debug!("quit requested");
        self.stack.push_state(&self.session, SessionState::quit())
    }

    fn submit_command(&self, current: &SessionState, text: &str) -> AppResult<()> {
        match lookup_command(text) {
            None => {
                tracing::debug!(command = text, "unrecognised command");
                Ok(())
            }
            Some(CatalogCommand::Quit) => self.push_quit(),
            Some(CatalogCommand::Catalog { kind, class }) => {
                tracing::debug!(command = text, ?kind, "catalog command");
                let rows = self.server.fetch_catalog(&self.fetch_context(), kind);
                self.push_browse(current, browse_facet(class, rows, text))
            }
        }
    }

    fn submit_sql(&self, current: &SessionState, query: &str) -> AppResult<()> {
        tracing::debug!(query, "executing sql");
        let rows = self.server.fetch_sql_rows(&self.fetch_context(), query);
        self.push_browse(current, browse_facet(BrowseClass::TableRow, rows, "sql"))
    }

    /// Returns `false` when the action does not apply, so routing continues.
    fn open_row(&self, current: &SessionState, action: KeyAction, row: usize) -> AppResult<bool> {
        if current.has_detail()
            || !current.has_browse()
            || current.browse().class != BrowseClass::DatabaseTable
        {
            return Ok(false);
        }
        let Some(name) = current.browse().row_name(row).map(str::to_string) else {
            tracing::debug!(row, "row action outside table");
            return Ok(false);
        };

        // Record the selection on the top entry so popping back restores it.
        let selected = StateBuilder::from_state(current)
            .browse(current.browse().clone().with_selected(row))
            .build();
        self.stack.replace_current(&self.session, selected.clone())?;

        if action == KeyAction::Describe {
            let text = match self.server.fetch_table_descr(&self.fetch_context(), &name) {
                FetchResult::Ok(text) => text,
                FetchResult::Empty => String::new(),
                FetchResult::Failed(message) => {
                    tracing::warn!(table = %name, error = %message, "describe failed");
                    String::new()
                }
            };
            let state = StateBuilder::from_state(&selected).detail(text).build();
            self.stack.push_state(&self.session, state)?;
        } else {
            let rows = self.server.fetch_table_rows(&self.fetch_context(), &name);
            self.push_browse(&selected, browse_facet(BrowseClass::TableRow, rows, &name))?;
        }
        Ok(true)
    }

    fn push_browse(&self, current: &SessionState, browse: BrowseFacet) -> AppResult<()> {
        let mut builder = StateBuilder::new();
        if current.has_common() {
            builder = builder.common(current.header_info().clone());
        }
        self.stack.push_state(&self.session, builder.browse(browse).build())
    }

    fn fetch_context(&self) -> FetchContext {
        FetchContext::with_timeout(self.fetch_timeout)
    }
}

fn submitted_text<'a>(current: &'a SessionState, facet: FacetKind, event: &'a Event) -> &'a str {
    if !event.text.is_empty() {
        return &event.text;
    }
    match facet {
        FacetKind::Command => &current.command().text,
        FacetKind::Sql => &current.sql().text,
        FacetKind::FullSql => &current.full_sql().text,
        _ => "",
    }
}

fn browse_facet(class: BrowseClass, result: FetchResult<RowSet>, what: &str) -> BrowseFacet {
    match result {
        FetchResult::Ok(rows) => BrowseFacet::new(class, rows),
        FetchResult::Empty => {
            BrowseFacet::new(class, RowSet::empty()).with_status(FetchStatus::Empty)
        }
        FetchResult::Failed(message) => {
            tracing::warn!(what, error = %message, "fetch failed");
            BrowseFacet::new(class, RowSet::empty()).with_status(FetchStatus::Failed(message))
        }
    }
}
