use std::collections::BTreeMap;

/// Server/header key-value pairs shown above every view.
pub type HeaderInfo = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    Common,
    Browse,
    Command,
    Sql,
    FullSql,
    Tree,
    Detail,
}

impl FacetKind {
    pub const ALL: [FacetKind; 7] = [
        Self::Common,
        Self::Browse,
        Self::Command,
        Self::Sql,
        Self::FullSql,
        Self::Tree,
        Self::Detail,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Browse => "browse",
            Self::Command => "command",
            Self::Sql => "sql",
            Self::FullSql => "full-sql",
            Self::Tree => "tree",
            Self::Detail => "detail",
        }
    }
}

/// Which catalog object a Browse facet is listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrowseClass {
    #[default]
    None,
    EmptyTable,
    DatabaseTable,
    View,
    Procedure,
    Function,
    Trigger,
    Database,
    TableRow,
}

impl BrowseClass {
    pub fn title(self) -> &'static str {
        match self {
            Self::None | Self::EmptyTable => "",
            Self::DatabaseTable => "Tables",
            Self::View => "Views",
            Self::Procedure => "Procedures",
            Self::Function => "Functions",
            Self::Trigger => "Triggers",
            Self::Database => "Databases",
            Self::TableRow => "Rows",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolves the catalog object name this row describes: the `NAME`
    /// column when the headers carry one, otherwise the first cell.
    pub fn name(&self, headers: &[String]) -> Option<&str> {
        let column = headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case("name"))
            .unwrap_or(0);
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub const fn empty() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn new<I, S>(headers: I, rows: Vec<Row>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// How the rows of a Browse facet came to be.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Loaded,
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowseFacet {
    pub class: BrowseClass,
    pub table: RowSet,
    /// 0-based index into `table.rows`.
    pub selected: usize,
    pub status: FetchStatus,
}

impl BrowseFacet {
    pub const EMPTY: BrowseFacet = BrowseFacet {
        class: BrowseClass::None,
        table: RowSet::empty(),
        selected: 0,
        status: FetchStatus::Loaded,
    };

    pub fn new(class: BrowseClass, table: RowSet) -> Self {
        Self {
            class,
            table,
            selected: 0,
            status: FetchStatus::Loaded,
        }
    }

    pub fn with_status(mut self, status: FetchStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.table.rows
    }

    pub fn row_name(&self, index: usize) -> Option<&str> {
        self.table.rows.get(index)?.name(&self.table.headers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandFacet {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlFacet {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FullSqlFacet {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeFacet {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailFacet {
    pub text: String,
}
