use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::context::FetchContext;
use crate::db::{DatabaseServer, FetchResult};
use crate::event::{Event, Transition};
use crate::history::StateStack;
use crate::router::Router;
use crate::state::{HeaderInfo, Row, RowSet};

/// Canned collaborator that records every call it receives.
pub(super) struct StubServer {
    pub tables: FetchResult<RowSet>,
    pub info: FetchResult<HeaderInfo>,
    pub calls: Mutex<Vec<String>>,
    pub deadlines: Mutex<Vec<Option<Duration>>>,
}

impl StubServer {
    pub fn new() -> Self {
        Self {
            tables: FetchResult::Ok(RowSet::new(
                ["NAME", "TYPE"],
                vec![Row::new(["users", "BASE TABLE"]), Row::new(["orders", "BASE TABLE"])],
            )),
            info: FetchResult::Ok(HeaderInfo::from([("version".to_string(), "X".to_string())])),
            calls: Mutex::new(Vec::new()),
            deadlines: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tables(mut self, tables: FetchResult<RowSet>) -> Self {
        self.tables = tables;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, ctx: &FetchContext, call: String) {
        self.calls.lock().expect("calls lock").push(call);
        self.deadlines
            .lock()
            .expect("deadlines lock")
            .push(ctx.remaining());
    }

    fn listing(&self, ctx: &FetchContext, name: &str) -> FetchResult<RowSet> {
        self.record(ctx, name.to_string());
        FetchResult::Ok(RowSet::new(["NAME"], vec![Row::new([format!("{name}_1")])]))
    }
}

impl DatabaseServer for StubServer {
    fn fetch_tables(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        self.record(ctx, "tables".to_string());
        self.tables.clone()
    }

    fn fetch_databases(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        self.listing(ctx, "databases")
    }

    fn fetch_views(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        self.listing(ctx, "views")
    }

    fn fetch_procedures(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        self.listing(ctx, "procedures")
    }

    fn fetch_functions(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        self.listing(ctx, "functions")
    }

    fn fetch_triggers(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        self.listing(ctx, "triggers")
    }

    fn fetch_table_rows(&self, ctx: &FetchContext, name: &str) -> FetchResult<RowSet> {
        self.record(ctx, format!("rows:{name}"));
        FetchResult::Ok(RowSet::new(["id"], vec![Row::new(["1"])]))
    }

    fn fetch_sql_rows(&self, ctx: &FetchContext, query: &str) -> FetchResult<RowSet> {
        self.record(ctx, format!("sql:{query}"));
        if query == "broken" {
            return FetchResult::failed("syntax error");
        }
        FetchResult::Ok(RowSet::new(["result"], vec![Row::new([query])]))
    }

    fn fetch_table_descr(&self, ctx: &FetchContext, name: &str) -> FetchResult<String> {
        self.record(ctx, format!("descr:{name}"));
        FetchResult::Ok(format!("CREATE TABLE {name}"))
    }

    fn server_info(&self, ctx: &FetchContext) -> FetchResult<HeaderInfo> {
        self.record(ctx, "info".to_string());
        self.info.clone()
    }
}

pub(super) struct Harness {
    pub router: Router,
    pub server: Arc<StubServer>,
    pub seen: Arc<Mutex<Vec<Transition>>>,
}

impl Harness {
    pub fn new(server: StubServer) -> Self {
        Self::with_capacity(server, 20)
    }

    pub fn with_capacity(server: StubServer, max_history: usize) -> Self {
        let stack = Arc::new(StateStack::new(max_history).expect("stack should start"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            stack
                .bus()
                .add_sync_observer(move |t| seen.lock().expect("seen lock").push(t.clone()));
        }
        let server = Arc::new(server);
        let router = Router::new(stack, Arc::clone(&server) as Arc<dyn DatabaseServer>);
        Self {
            router,
            server,
            seen,
        }
    }

    pub fn started(server: StubServer) -> Self {
        let harness = Self::new(server);
        harness.send(Event::init());
        harness.clear_seen();
        harness
    }

    pub fn send(&self, event: Event) -> crate::router::RouteOutcome {
        self.router
            .handle_event(&event)
            .expect("routing should succeed")
    }

    pub fn press(&self, code: KeyCode) -> crate::router::RouteOutcome {
        self.send(Event::key(key(code)))
    }

    pub fn seen(&self) -> Vec<Transition> {
        self.seen.lock().expect("seen lock").clone()
    }

    pub fn clear_seen(&self) {
        self.seen.lock().expect("seen lock").clear();
    }

    pub fn depth(&self) -> usize {
        self.router.stack().len()
    }

    pub fn current(&self) -> Arc<crate::state::SessionState> {
        self.router.stack().current().expect("stack should be non-empty")
    }
}

pub(super) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
