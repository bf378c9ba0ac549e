// specter/src/commands/text.rs
//! The `text` command: process a literal string and print the result.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io;

use specter_core::{Engine, TransformationReport};

use crate::cli::TextCommand;
use crate::ui;

pub fn run(cmd: &TextCommand, quiet: bool) -> Result<()> {
    info!("Starting text processing.");

    let mut config = super::load_config(cmd.config.as_deref())?;
    super::select_detectors(&mut config, &cmd.detectors)?;
    let mut engine = Engine::from_config(&config, &cmd.language, cmd.replacer.as_deref())
        .context("Failed to initialize the engine")?;

    let outcome = engine
        .process_text(&cmd.text)
        .context("Text processing failed")?;

    debug!(
        "Processed text. Original length: {}, transformed length: {}.",
        cmd.text.len(),
        outcome.result.transformed_text.len()
    );

    println!("{}", outcome.result.transformed_text);

    if let Some(path) = &cmd.report {
        let mut report = TransformationReport::new("cli-text", &cmd.language);
        report.push_page(0, &outcome);
        report.write_json(path)?;
        if !quiet {
            ui::info_msg(format!("Report written to {}", path.display()));
        }
    }

    if !cmd.no_summary && !quiet {
        ui::summary::print_summary(&outcome.spans, &mut io::stderr())?;
    }

    info!("Text processing completed.");
    Ok(())
}
