//! Tessera CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use tessera_cli::{
    Args,
    error_adapter::{Reportable, to_reportable, warnings_to_reportables},
};

fn render_report(reporter: &miette::GraphicalReportHandler, reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    if reporter.render_report(&mut writer, reportable).is_err() {
        return reportable.to_string();
    }
    writer
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Tessera");
    debug!(args:?; "Parsed arguments");

    let reporter = miette::GraphicalReportHandler::new();

    match tessera_cli::run(&args) {
        Ok(outcome) => {
            for reportable in warnings_to_reportables(outcome.diagnostics(), outcome.source()) {
                warn!("{}", render_report(&reporter, &reportable));
            }
            info!(diagrams = outcome.diagram_count(); "Completed successfully");
        }
        Err(err) => {
            error!("{}", render_report(&reporter, &to_reportable(&err)));
            process::exit(1);
        }
    }
}
