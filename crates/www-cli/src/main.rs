//! www CLI - serve a directory with live reload.
//!
//! Parses the command line, initializes logging and colors, and runs the
//! serve command.

use clap::Parser;
use miette::Result;
use www_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();
    if args.no_color {
        ui::disable_colors();
    }

    // Convert CLI errors to miette diagnostics for error reporting
    commands::serve_execute(args)
        .await
        .map_err(error::cli_error_to_miette)
}
