//! CLI argument definitions.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use quotegrid_lib::api::query::SortOrder;
use simplelog::LevelFilter;

#[derive(Parser)]
#[command(
    name = "quotegrid",
    version,
    about = "Fetch and display a page of market quotes",
    long_about = "Fetch one page of market quotes from a quote endpoint and print it as a table.\n\n\
                  Sorting, filtering and paging are resolved server-side."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: <config_dir>/config.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Quote endpoint URL (overrides the config file).
    #[arg(long = "endpoint", value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Log level for the log file, and for stderr with -v.
    #[arg(long = "log-level", value_enum, default_value = "info", global = true)]
    pub log_level: LogLevelArg,

    /// Also log to stderr.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch one page of quotes.
    Fetch(FetchArgs),

    /// List the configured columns.
    Columns,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Page to fetch, starting at 1.
    #[arg(long = "page", default_value_t = 1)]
    pub page: u32,

    /// Rows per page (default: from config).
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<u32>,

    /// Column to sort by.
    #[arg(long = "sort", value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort direction (asc or desc).
    #[arg(long = "order", value_name = "ORDER", default_value = "asc")]
    pub order: SortOrder,

    /// Column filter, repeatable.
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_pair)]
    pub filters: Vec<(String, String)>,

    /// Extra request parameter sent as-is, repeatable (e.g. market=sh).
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub params: Vec<(String, String)>,

    /// Request timeout in seconds, 0 disables it.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("market=sh").unwrap(),
            ("market".to_string(), "sh".to_string())
        );
        assert_eq!(
            parse_pair("name=A=B").unwrap(),
            ("name".to_string(), "A=B".to_string())
        );
        assert!(parse_pair("market").is_err());
        assert!(parse_pair("=sh").is_err());
    }

    #[test]
    fn test_fetch_args() {
        let cli = Cli::try_parse_from([
            "quotegrid",
            "fetch",
            "--page",
            "3",
            "--sort",
            "change_pct",
            "--order",
            "desc",
            "--filter",
            "code=600",
            "--param",
            "market=sh",
        ])
        .unwrap();

        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.page, 3);
        assert_eq!(args.sort.as_deref(), Some("change_pct"));
        assert_eq!(args.order, SortOrder::Desc);
        assert_eq!(args.filters, vec![("code".to_string(), "600".to_string())]);
        assert_eq!(args.params, vec![("market".to_string(), "sh".to_string())]);
        assert_eq!(cli.log_level, LogLevelArg::Info);
    }

    #[test]
    fn test_rejects_bad_order() {
        assert!(Cli::try_parse_from(["quotegrid", "fetch", "--order", "sideways"]).is_err());
    }
}
