use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlog_config::{Config, PathManager};

pub fn show_config(ctx: &AppContext, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let watch_log = config.watch_log_path(&ctx.paths);
    let normalized = config.normalized_import_path(&ctx.paths);
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string());
    let suggested_log_file = ctx.paths.log_file();

    output.json(&json!({
        "config_file": ctx.config_file.display().to_string(),
        "config_file_exists": ctx.config_file.exists(),
        "watch_log": watch_log.display().to_string(),
        "normalized_import": normalized.display().to_string(),
        "top_k": config.stats.top_k,
        "log_file": log_file,
        "suggested_log_file": suggested_log_file.display().to_string(),
    }));

    if !output.is_human() || output.is_quiet() {
        return Ok(());
    }

    if !ctx.config_file.exists() {
        output.warn(format!(
            "No config file at {} (using defaults; run 'watchlog config init' to create one)",
            ctx.config_file.display()
        ));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config File"), Cell::new(ctx.config_file.display())]);
    table.add_row(vec![Cell::new("Watch Log"), Cell::new(watch_log.display())]);
    table.add_row(vec![Cell::new("Normalized Import"), Cell::new(normalized.display())]);
    table.add_row(vec![Cell::new("Top Titles (k)"), Cell::new(config.stats.top_k)]);
    table.add_row(vec![
        Cell::new("Log File"),
        Cell::new(log_target(config, &ctx.paths)),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    Ok(())
}

/// Configured log file, or stderr with the conventional location as a hint
fn log_target(config: &Config, paths: &PathManager) -> String {
    match &config.logging.file {
        Some(path) => path.display().to_string(),
        None => format!(
            "stderr {}",
            format!("(set logging.file, e.g. {})", paths.log_file().display()).bright_black()
        ),
    }
}

pub fn init_config(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    if ctx.config_file.exists() && !force {
        output.warn(format!(
            "Config file already exists at {} (use --force to overwrite)",
            ctx.config_file.display()
        ));
        return Ok(());
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;

    // Write the resolved paths so the file documents where data lives
    let mut config = Config::default();
    config.storage.watch_log = Some(ctx.config.watch_log_path(&ctx.paths));
    config.storage.normalized_import = Some(ctx.config.normalized_import_path(&ctx.paths));
    config.stats = ctx.config.stats.clone();
    config.logging = ctx.config.logging.clone();

    config
        .save_to_file(&ctx.config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", ctx.config_file.display(), e))?;
    tracing::info!(path = %ctx.config_file.display(), "Wrote config file");
    output.success(format!("Config written to {}", ctx.config_file.display()));
    Ok(())
}
