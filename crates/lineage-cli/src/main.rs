//! Lineage CLI: the `lineage` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Styles { styles, json } => commands::styles::run(styles, json),

        Commands::Number {
            ancestor,
            style,
            params,
            tree,
            styles,
            format,
            no_header,
            delimiter,
            out,
        } => commands::number::run(commands::number::Args {
            ancestor,
            style,
            params,
            tree,
            styles,
            format,
            no_header,
            delimiter,
            out,
        }),
    }
}

/// Logs go to stderr so stdout stays parseable. `LINEAGE_LOG` takes the
/// usual `EnvFilter` directives; `-v` forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("LINEAGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
