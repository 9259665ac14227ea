use super::{prompts, settle, AppContext};
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;
use watchlog_models::EntryForm;

/// Entry fields given on the command line
#[derive(Debug, Default)]
pub struct AddFields {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub minutes: Option<String>,
    pub date: Option<String>,
    pub rating: Option<String>,
}

impl AddFields {
    /// Form from the flags alone; the date falls back to today
    pub fn into_form(self) -> EntryForm {
        let today = EntryForm::today();
        EntryForm {
            title: self.title.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            watch_time: self.minutes.unwrap_or_default(),
            date_watched: self.date.unwrap_or(today.date_watched),
            rating: self.rating.unwrap_or_default(),
        }
    }
}

pub fn run_add(ctx: &AppContext, fields: AddFields, no_prompt: bool, output: &Output) -> Result<()> {
    let mut form = fields.into_form();
    if !no_prompt && prompts::can_prompt() {
        complete_form(&mut form)?;
    }

    if let Some(entry) = settle(ctx.store().append(&form), output)? {
        output.json(&json!({ "type": "saved", "entry": entry }));
        if output.is_human() {
            output.success(format!("'{}' added to your watch log!", entry.title));
        }
    }
    Ok(())
}

/// Prompt for every field still blank, keeping what is already filled in
pub fn complete_form(form: &mut EntryForm) -> Result<()> {
    let fields: [(&str, &mut String); 5] = [
        ("Title", &mut form.title),
        ("Genre", &mut form.genre),
        ("Watch Time (mins)", &mut form.watch_time),
        ("Date Watched (YYYY-MM-DD)", &mut form.date_watched),
        ("Your Rating (1-5)", &mut form.rating),
    ];
    for (prompt, value) in fields {
        if value.trim().is_empty() {
            *value = prompts::prompt_string(prompt, None)?;
        }
    }
    Ok(())
}

/// Full entry form for the interactive menu, date pre-filled with today
pub fn prompt_form() -> Result<EntryForm> {
    let today = EntryForm::today();
    Ok(EntryForm {
        title: prompts::prompt_string("Title", None)?,
        genre: prompts::prompt_string("Genre", None)?,
        watch_time: prompts::prompt_string("Watch Time (mins)", None)?,
        date_watched: prompts::prompt_string("Date Watched (YYYY-MM-DD)", Some(&today.date_watched))?,
        rating: prompts::prompt_string("Your Rating (1-5)", None)?,
    })
}

pub fn show_saved(result: watchlog_core::Result<watchlog_models::WatchEntry>, output: &Output) {
    match result {
        Ok(entry) => output.success(format!("'{}' added to your watch log!", entry.title)),
        Err(err) => super::show(&err, output),
    }
}
