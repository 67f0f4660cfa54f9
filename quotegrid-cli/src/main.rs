//! quotegrid: fetch and print one page of market quotes.

mod cli;
mod error;
mod paths;
mod settings;
mod table;

use std::fs;
use std::fs::File;
use std::time::Duration;

use clap::Parser;
use log::error;
use log::info;
use quotegrid_lib::QuoteGridClient;
use quotegrid_lib::api::RequestState;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::Config;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

use crate::cli::Cli;
use crate::cli::Command;
use crate::cli::FetchArgs;
use crate::error::CliError;
use crate::settings::FileSettings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("error: {e}");
    }

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32, CliError> {
    let settings = FileSettings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Columns => {
            table::print_columns(&settings.column_model()?);
            Ok(0)
        }
        Command::Fetch(args) => fetch(&settings, cli.endpoint, args).await,
    }
}

async fn fetch(
    settings: &FileSettings,
    endpoint: Option<String>,
    args: FetchArgs,
) -> Result<i32, CliError> {
    let mut config = settings.grid_config();
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }
    match args.timeout {
        Some(0) => config = config.without_timeout(),
        Some(secs) => config = config.with_timeout(Duration::from_secs(secs)),
        None => {}
    }
    for (name, value) in args.params {
        config.extra_params.retain(|(existing, _)| *existing != name);
        config = config.with_extra_param(name, value);
    }

    let grid = QuoteGridClient::from_config(config)
        .columns(settings.column_model()?)
        .build()?;

    let mut query = grid.new_query();
    if let Some(size) = args.page_size {
        query.set_page_size(size);
    }
    if let Some(field) = args.sort {
        query.sort_by(field, args.order);
    }
    query.submit_filters(args.filters);
    query.set_page(args.page);

    info!("Fetching from {}", grid.config().endpoint);
    let state = grid.load(query).await;
    table::print_grid(&grid.view());

    Ok(match state {
        RequestState::Error(_) => 2,
        _ => 0,
    })
}

/// Logs to `<cache_dir>/latest.log`, and to stderr with `-v`.
fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let level = cli.log_level.level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if let (Some(cache), Some(log_file)) = (paths::cache_dir(), paths::log_file()) {
        let opened = fs::create_dir_all(&cache)
            .and_then(|()| paths::rotate_logs(&cache, paths::KEEP_ARCHIVED_LOGS))
            .and_then(|()| File::create(log_file));
        match opened {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(e) => eprintln!("warning: log file unavailable: {e}"),
        }
    }
    if cli.verbose {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    CombinedLogger::init(loggers).map_err(|e| CliError::Logging(e.to_string()))
}
