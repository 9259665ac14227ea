use super::{render, settle, AppContext};
use crate::output::Output;
use color_eyre::Result;
use watchlog_core::manual_stats;

pub fn run_stats(ctx: &AppContext, output: &Output) -> Result<()> {
    if let Some(stats) = settle(manual_stats(&ctx.store()), output)? {
        render::manual_stats(&stats, output);
    }
    Ok(())
}
