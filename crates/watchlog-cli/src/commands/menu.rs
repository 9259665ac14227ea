use super::{add, import, prompts, render, show, AppContext};
use crate::output::Output;
use color_eyre::Result;
use std::path::PathBuf;
use watchlog_core::{manual_stats, ImportSession};

const ACTIONS: [&str; 7] = [
    "💾 Save Entry",
    "📖 View Watch Log",
    "📊 View Stats",
    "📈 View Import Stats",
    "🏆 Show Top Titles",
    "📁 Upload & Simplify Export CSV",
    "Quit",
];

/// Interactive loop over every action. The import session lives as long as
/// the menu, so stats become available once an upload succeeds.
pub fn run_menu(ctx: &AppContext, output: &Output) -> Result<()> {
    if !prompts::can_prompt() {
        return Err(color_eyre::eyre::eyre!("The menu needs an interactive terminal"));
    }

    let store = ctx.store();
    let mut session = ImportSession::new(ctx.importer());
    let top_k = ctx.config.stats.top_k;

    output.info(format!("🎬 watchlog: {}", store.path().display()));

    loop {
        let choice = prompts::prompt_select("What next?", &ACTIONS)?;
        tracing::debug!(action = ACTIONS[choice], "Menu action");

        match choice {
            0 => {
                let form = add::prompt_form()?;
                add::show_saved(store.append(&form), output);
            }
            1 => match store.read_all() {
                Ok(entries) if entries.is_empty() => output.warn("No entries available yet."),
                Ok(entries) => render::watch_log(&entries, output),
                Err(err) => show(&err, output),
            },
            2 => match manual_stats(&store) {
                Ok(stats) => render::manual_stats(&stats, output),
                Err(err) => show(&err, output),
            },
            3 => match session.overview() {
                Ok(summary) => render::overview(&summary, output),
                Err(err) => show(&err, output),
            },
            4 => match session.top_titles(top_k) {
                Ok(titles) => render::top_titles(&titles, output),
                Err(err) => show(&err, output),
            },
            5 => {
                let path = prompts::prompt_string("Path to export CSV", None)?;
                let path = path.trim();
                if path.is_empty() {
                    continue;
                }
                if let Err(err) = import::import_with_spinner(&mut session, &PathBuf::from(path), output) {
                    show(&err, output);
                }
            }
            _ => break,
        }
    }

    Ok(())
}
