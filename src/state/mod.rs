mod builder;
mod facet;
mod session;

pub use builder::StateBuilder;
pub use facet::{
    BrowseClass, BrowseFacet, CommandFacet, DetailFacet, FacetKind, FetchStatus, FullSqlFacet,
    HeaderInfo, Row, RowSet, SqlFacet, TreeFacet,
};
pub use session::SessionState;
