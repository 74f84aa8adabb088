use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use rel8::app::App;
use rel8::config::Config;
use rel8::db;
use rel8::error::AppResult;
use rel8::logging;

/// Terminal browser for database catalogs.
#[derive(Debug, Parser)]
#[command(name = "rel8", version, about)]
struct Cli {
    /// Connection string, e.g. postgres://user@host/db or user:pw@tcp(host:3306)/db
    connection: Option<String>,

    /// Serve an in-memory demo catalog instead of connecting.
    #[arg(short, long)]
    mock: bool,

    /// Log more: -v warn, -vv info, -vvv debug.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file to load instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file, overriding the config.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let log_file = cli.log_file.clone().unwrap_or_else(|| config.log.file.clone());
    logging::init(&log_file, cli.verbose)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting rel8");

    let server = db::connect(cli.connection.as_deref(), cli.mock)?;
    let mut app = App::new_with_config(Arc::from(server), config)?;
    app.run().await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::Cli;

    #[test]
    fn cli_accepts_connection_mock_and_verbosity() {
        let cli = Cli::try_parse_from(["rel8", "mysql://root@localhost/app", "-m", "-vv"])
            .expect("args should parse");
        assert_eq!(cli.connection.as_deref(), Some("mysql://root@localhost/app"));
        assert!(cli.mock);
        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_accepts_paths_and_rejects_extra_positionals() {
        let cli = Cli::try_parse_from(["rel8", "--mock", "--config", "c.toml", "--log-file", "x.log"])
            .expect("args should parse");
        assert!(cli.connection.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("x.log")));

        assert!(Cli::try_parse_from(["rel8", "a", "b"]).is_err());
    }
}
