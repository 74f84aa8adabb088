use std::collections::BTreeMap;
use std::fmt;

use super::facet::{
    BrowseClass, BrowseFacet, CommandFacet, DetailFacet, FacetKind, FullSqlFacet, HeaderInfo,
    RowSet, SqlFacet, TreeFacet,
};

static EMPTY_HEADER: HeaderInfo = BTreeMap::new();
static EMPTY_BROWSE: BrowseFacet = BrowseFacet::EMPTY;
static EMPTY_COMMAND: CommandFacet = CommandFacet {
    text: String::new(),
};
static EMPTY_SQL: SqlFacet = SqlFacet {
    text: String::new(),
};
static EMPTY_FULL_SQL: FullSqlFacet = FullSqlFacet {
    text: String::new(),
};
static EMPTY_TREE: TreeFacet = TreeFacet {
    label: String::new(),
};
static EMPTY_DETAIL: DetailFacet = DetailFacet {
    text: String::new(),
};

/// Immutable composite of the facets currently navigable/visible.
///
/// Holds at most one facet per kind. Values are produced by
/// [`StateBuilder`](super::StateBuilder) and never mutated afterwards; the
/// getters return an empty facet when the kind is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub(super) common: Option<HeaderInfo>,
    pub(super) browse: Option<BrowseFacet>,
    pub(super) command: Option<CommandFacet>,
    pub(super) sql: Option<SqlFacet>,
    pub(super) full_sql: Option<FullSqlFacet>,
    pub(super) tree: Option<TreeFacet>,
    pub(super) detail: Option<DetailFacet>,
    pub(super) quit: bool,
}

impl SessionState {
    /// Placeholder shown before the first catalog fetch completes.
    pub fn initial() -> Self {
        Self {
            browse: Some(BrowseFacet::new(BrowseClass::EmptyTable, RowSet::empty())),
            ..Self::default()
        }
    }

    /// Terminal marker; observers shut the presentation down when they see it.
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    pub fn has_common(&self) -> bool {
        self.common.is_some()
    }

    pub fn header_info(&self) -> &HeaderInfo {
        self.common.as_ref().unwrap_or(&EMPTY_HEADER)
    }

    pub fn has_browse(&self) -> bool {
        self.browse.is_some()
    }

    pub fn browse(&self) -> &BrowseFacet {
        self.browse.as_ref().unwrap_or(&EMPTY_BROWSE)
    }

    pub fn has_command(&self) -> bool {
        self.command.is_some()
    }

    pub fn command(&self) -> &CommandFacet {
        self.command.as_ref().unwrap_or(&EMPTY_COMMAND)
    }

    pub fn has_sql(&self) -> bool {
        self.sql.is_some()
    }

    pub fn sql(&self) -> &SqlFacet {
        self.sql.as_ref().unwrap_or(&EMPTY_SQL)
    }

    pub fn has_full_sql(&self) -> bool {
        self.full_sql.is_some()
    }

    pub fn full_sql(&self) -> &FullSqlFacet {
        self.full_sql.as_ref().unwrap_or(&EMPTY_FULL_SQL)
    }

    pub fn has_tree(&self) -> bool {
        self.tree.is_some()
    }

    pub fn tree(&self) -> &TreeFacet {
        self.tree.as_ref().unwrap_or(&EMPTY_TREE)
    }

    pub fn has_detail(&self) -> bool {
        self.detail.is_some()
    }

    pub fn detail(&self) -> &DetailFacet {
        self.detail.as_ref().unwrap_or(&EMPTY_DETAIL)
    }

    pub fn has(&self, kind: FacetKind) -> bool {
        match kind {
            FacetKind::Common => self.has_common(),
            FacetKind::Browse => self.has_browse(),
            FacetKind::Command => self.has_command(),
            FacetKind::Sql => self.has_sql(),
            FacetKind::FullSql => self.has_full_sql(),
            FacetKind::Tree => self.has_tree(),
            FacetKind::Detail => self.has_detail(),
        }
    }

    pub fn facet_kinds(&self) -> Vec<FacetKind> {
        FacetKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }

    /// The modal text facet that owns keyboard input, in routing priority order.
    pub fn active_text_facet(&self) -> Option<FacetKind> {
        if self.has_command() {
            Some(FacetKind::Command)
        } else if self.has_sql() {
            Some(FacetKind::Sql)
        } else if self.has_full_sql() {
            Some(FacetKind::FullSql)
        } else {
            None
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quit {
            return f.write_str("quit");
        }
        let kinds = self.facet_kinds();
        if kinds.is_empty() {
            return f.write_str("empty");
        }
        for (i, kind) in kinds.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            f.write_str(kind.id())?;
            if *kind == FacetKind::Browse {
                write!(f, "({:?})", self.browse().class)?;
            }
        }
        Ok(())
    }
}
