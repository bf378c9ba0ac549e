// specter/src/main.rs
//! Specter CLI entry point.
//!
//! Parses arguments, initializes logging, and dispatches to the command
//! implementations. Exits 0 on success and non-zero with a single
//! descriptive message on any fatal error.

use clap::Parser;

use specter::cli::{Cli, Commands};
use specter::{commands, logger, ui};

fn main() {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    let result = match &args.command {
        Commands::Text(cmd) => commands::text::run(cmd, args.quiet),
        Commands::Doc(cmd) => commands::doc::run(cmd, args.quiet),
    };

    if let Err(error) = result {
        ui::error_msg(format!("{:#}", error));
        std::process::exit(1);
    }
}
