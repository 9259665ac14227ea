use super::{render, settle, AppContext};
use crate::output::Output;
use color_eyre::Result;

pub fn run_log(ctx: &AppContext, output: &Output) -> Result<()> {
    let store = ctx.store();
    tracing::debug!(path = %store.path().display(), "Reading watch log");

    if let Some(entries) = settle(store.read_all(), output)? {
        if entries.is_empty() && output.is_human() {
            output.warn("No entries available yet.");
        } else {
            render::watch_log(&entries, output);
        }
    }
    Ok(())
}
