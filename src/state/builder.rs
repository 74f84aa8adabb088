use super::facet::{
    BrowseFacet, CommandFacet, DetailFacet, FullSqlFacet, HeaderInfo, SqlFacet, TreeFacet,
};
use super::session::SessionState;

/// Assembles [`SessionState`] values.
///
/// `from_state` seeds the builder with copies of every facet on an existing
/// state, so a following setter either replaces that facet or layers a new
/// one on top of it.
#[derive(Debug, Clone, Default)]
pub struct StateBuilder {
    state: SessionState,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(existing: &SessionState) -> Self {
        let mut state = existing.clone();
        state.quit = false;
        Self { state }
    }

    pub fn common(mut self, info: HeaderInfo) -> Self {
        self.state.common = Some(info);
        self
    }

    pub fn browse(mut self, facet: BrowseFacet) -> Self {
        self.state.browse = Some(facet);
        self
    }

    pub fn command(mut self, text: impl Into<String>) -> Self {
        self.state.command = Some(CommandFacet { text: text.into() });
        self
    }

    pub fn empty_command(self) -> Self {
        self.command(String::new())
    }

    pub fn sql(mut self, text: impl Into<String>) -> Self {
        self.state.sql = Some(SqlFacet { text: text.into() });
        self
    }

    pub fn empty_sql(self) -> Self {
        self.sql(String::new())
    }

    pub fn full_sql(mut self, text: impl Into<String>) -> Self {
        self.state.full_sql = Some(FullSqlFacet { text: text.into() });
        self
    }

    pub fn empty_full_sql(self) -> Self {
        self.full_sql(String::new())
    }

    pub fn tree(mut self, label: impl Into<String>) -> Self {
        self.state.tree = Some(TreeFacet {
            label: label.into(),
        });
        self
    }

    pub fn detail(mut self, text: impl Into<String>) -> Self {
        self.state.detail = Some(DetailFacet { text: text.into() });
        self
    }

    pub fn quit(mut self) -> Self {
        self.state.quit = true;
        self
    }

    pub fn build(self) -> SessionState {
        self.state
    }
}
