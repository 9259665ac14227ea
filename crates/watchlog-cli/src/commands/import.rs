use super::{render, settle, AppContext};
use crate::output::Output;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use watchlog_core::{ImportReport, ImportSession};

pub fn run_import(ctx: &AppContext, file: &Path, overview: bool, top: bool, output: &Output) -> Result<()> {
    let mut session = ImportSession::new(ctx.importer());

    if settle(import_with_spinner(&mut session, file, output), output)?.is_none() {
        return Ok(());
    }

    if overview {
        if let Some(summary) = settle(session.overview(), output)? {
            render::overview(&summary, output);
        }
    }
    if top {
        if let Some(titles) = settle(session.top_titles(ctx.config.stats.top_k), output)? {
            render::top_titles(&titles, output);
        }
    }
    Ok(())
}

pub fn run_overview(ctx: &AppContext, normalized: Option<PathBuf>, output: &Output) -> Result<()> {
    let Some(session) = settle(ctx.session(normalized), output)? else {
        return Ok(());
    };
    if let Some(summary) = settle(session.overview(), output)? {
        render::overview(&summary, output);
    }
    Ok(())
}

pub fn run_top(ctx: &AppContext, k: Option<usize>, normalized: Option<PathBuf>, output: &Output) -> Result<()> {
    let Some(session) = settle(ctx.session(normalized), output)? else {
        return Ok(());
    };
    let k = k.unwrap_or(ctx.config.stats.top_k);
    if let Some(titles) = settle(session.top_titles(k), output)? {
        render::top_titles(&titles, output);
    }
    Ok(())
}

/// Import, with a spinner while the export is read on an interactive terminal
pub fn import_with_spinner(
    session: &mut ImportSession,
    file: &Path,
    output: &Output,
) -> watchlog_core::Result<ImportReport> {
    let interactive = output.is_human() && !output.is_quiet() && std::io::stderr().is_terminal();
    if !interactive {
        tracing::info!(operation = "import", source = %file.display(), "Importing export");
        let report = session.import(file)?;
        render::import_report(&report, output);
        return Ok(report);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Simplifying {}...", file.display()));

    let result = session.import(file);
    spinner.finish_and_clear();

    let report = result?;
    render::import_report(&report, output);
    Ok(report)
}
