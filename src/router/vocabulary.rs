use crate::db::CatalogKind;
use crate::state::BrowseClass;

/// What a recognised command line asks the router to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCommand {
    Catalog {
        kind: CatalogKind,
        class: BrowseClass,
    },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub aliases: &'static [&'static str],
    pub command: CatalogCommand,
}

impl CommandSpec {
    fn matches(&self, text: &str) -> bool {
        self.id == text || self.aliases.contains(&text)
    }
}

const fn catalog(kind: CatalogKind, class: BrowseClass) -> CatalogCommand {
    CatalogCommand::Catalog { kind, class }
}

const COMMAND_SPECS: [CommandSpec; 7] = [
    CommandSpec {
        id: "table",
        aliases: &[],
        command: catalog(CatalogKind::Tables, BrowseClass::DatabaseTable),
    },
    CommandSpec {
        id: "db",
        aliases: &["database"],
        command: catalog(CatalogKind::Databases, BrowseClass::Database),
    },
    CommandSpec {
        id: "view",
        aliases: &["views"],
        command: catalog(CatalogKind::Views, BrowseClass::View),
    },
    CommandSpec {
        id: "procedure",
        aliases: &["procedures", "proc", "procs"],
        command: catalog(CatalogKind::Procedures, BrowseClass::Procedure),
    },
    CommandSpec {
        id: "function",
        aliases: &["functions", "func", "funcs"],
        command: catalog(CatalogKind::Functions, BrowseClass::Function),
    },
    CommandSpec {
        id: "trigger",
        aliases: &["triggers"],
        command: catalog(CatalogKind::Triggers, BrowseClass::Trigger),
    },
    CommandSpec {
        id: "q",
        aliases: &["quit"],
        command: CatalogCommand::Quit,
    },
];

pub fn all_command_specs() -> &'static [CommandSpec] {
    &COMMAND_SPECS
}

/// Case-sensitive lookup after trimming surrounding whitespace.
pub fn lookup_command(text: &str) -> Option<CatalogCommand> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    COMMAND_SPECS
        .iter()
        .find(|spec| spec.matches(text))
        .map(|spec| spec.command)
}
