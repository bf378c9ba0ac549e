// specter/src/commands/doc.rs
//! The `doc` command: process document files page by page.
//!
//! Concrete OCR engines and PDF rasterizers are external collaborators;
//! integrations register them with the registry before dispatching here.
//! The stock binary ships without any, so this command reports the
//! configuration error rather than guessing at page content.

use anyhow::{Context, Result};
use log::info;

use specter_core::{
    process_document, Document, Engine, OcrProvider, OcrRegistry, RenderStyle,
    TransformationReport,
};

use crate::cli::DocCommand;
use crate::ui;

pub fn run(cmd: &DocCommand, quiet: bool) -> Result<()> {
    let mut config = super::load_config(cmd.config.as_deref())?;
    super::select_detectors(&mut config, &cmd.detectors)?;
    let mut engine = Engine::from_config(&config, &cmd.language, cmd.replacer.as_deref())
        .context("Failed to initialize the engine")?;

    // Providers come from integrations; selection failures surface before
    // any document is touched.
    let registry = OcrRegistry::new();
    let provider = registry.provider_for(&cmd.language, cmd.ocr.as_deref())?;
    let style = RenderStyle::from_config(&config.render)?;

    std::fs::create_dir_all(&cmd.out_dir)
        .with_context(|| format!("Failed to create output directory: {}", cmd.out_dir.display()))?;

    let mut failed_documents = 0usize;
    for file in &cmd.files {
        match process_one(file, &mut engine, provider, &style, cmd, quiet) {
            Ok(()) => {}
            Err(error) => {
                ui::error_msg(format!("Failed to process '{}': {:#}", file.display(), error));
                failed_documents += 1;
            }
        }
    }

    if failed_documents > 0 {
        anyhow::bail!("{} document(s) failed", failed_documents);
    }

    Ok(())
}

fn process_one(
    path: &std::path::Path,
    engine: &mut Engine,
    provider: &dyn OcrProvider,
    style: &RenderStyle,
    cmd: &DocCommand,
    quiet: bool,
) -> Result<()> {
    info!("Processing document '{}'.", path.display());

    let document = Document::load(path, None)?;
    let processed = process_document(&document, engine, provider, style)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let mut report = TransformationReport::new(path.display().to_string(), &cmd.language);
    for page in &processed.pages {
        let out_path = cmd.out_dir.join(format!("{}_page{}.png", stem, page.page));
        page.image
            .save(&out_path)
            .with_context(|| format!("Failed to write page image: {}", out_path.display()))?;

        if let Some(outcome) = &page.outcome {
            report.push_page(page.page, outcome);
        }
    }

    if cmd.report {
        let report_path = cmd.out_dir.join(format!("{}_report.json", stem));
        report.write_json(&report_path)?;
    }

    if processed.failed_pages > 0 {
        ui::warn_msg(format!(
            "{} page(s) aborted in '{}'; their output was skipped.",
            processed.failed_pages,
            path.display()
        ));
    } else if !quiet {
        ui::info_msg(format!(
            "Processed '{}' ({} page(s)).",
            path.display(),
            processed.pages.len()
        ));
    }

    Ok(())
}
