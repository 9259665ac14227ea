use super::chart;
use crate::output::Output;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlog_core::ImportReport;
use watchlog_models::{format_rating, ImportedOverview, ManualStats, TitleCount, WatchEntry, WATCH_LOG_COLUMNS};

const NOT_AVAILABLE: &str = "N/A";

pub fn manual_stats_lines(stats: &ManualStats) -> Vec<String> {
    vec![
        format!("📺 Total Shows Watched: {}", stats.total_entries),
        format!("⏱️ Total Watch Time: {} mins", stats.total_minutes),
        format!("📉 Average Watch Time: {:.2} mins", stats.average_minutes),
        format!("⭐ Average Rating: {:.2}/5", stats.average_rating),
        format!(
            "🎬 Most Watched Genre: {}",
            stats.top_genre.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
    ]
}

pub fn overview_lines(overview: &ImportedOverview) -> Vec<String> {
    vec![
        format!("🎬 Total Shows Watched: {}", overview.total_entries),
        format!(
            "🔥 Most Watched Title: {}",
            overview.top_title.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        format!(
            "📆 Most Active Month: {}",
            overview.top_month.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        format!(
            "📅 Most Active Year: {}",
            overview
                .top_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ),
    ]
}

fn heading(title: &str, output: &Output) {
    output.println(format!("\n{}", title.bright_red().bold()));
}

pub fn manual_stats(stats: &ManualStats, output: &Output) {
    output.json(&json!({
        "type": "manual_stats",
        "total_entries": stats.total_entries,
        "total_minutes": stats.total_minutes,
        "average_minutes": round2(stats.average_minutes),
        "average_rating": round2(stats.average_rating),
        "top_genre": stats.top_genre,
    }));
    heading("Your Watch Stats", output);
    for line in manual_stats_lines(stats) {
        output.println(line);
    }
}

pub fn overview(overview: &ImportedOverview, output: &Output) {
    output.json(&json!({
        "type": "import_overview",
        "overview": overview,
    }));
    heading("Viewing History Stats", output);
    for line in overview_lines(overview) {
        output.println(line);
    }
    let undated = overview.total_entries - overview.dated_entries;
    if undated > 0 && output.is_human() {
        output.warn(format!("{} row(s) had no usable date_added and were left out of month/year", undated));
    }
}

fn watch_log_payload(entries: &[WatchEntry]) -> serde_json::Value {
    json!({
        "type": "watch_log",
        "entries": entries,
    })
}

pub fn watch_log(entries: &[WatchEntry], output: &Output) {
    output.json(&watch_log_payload(entries));
    if !output.is_human() || output.is_quiet() {
        return;
    }

    let mut table = Table::new();
    table.set_header(
        WATCH_LOG_COLUMNS
            .iter()
            .map(|c| Cell::new(c).add_attribute(comfy_table::Attribute::Bold)),
    );
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.genre),
            Cell::new(entry.watch_time_minutes),
            Cell::new(&entry.date_watched),
            Cell::new(format_rating(entry.rating)),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);
    println!("{} entries", entries.len());
}

pub fn import_report(report: &ImportReport, output: &Output) {
    output.json(&json!({
        "type": "import",
        "report": report,
    }));
    if !output.is_human() {
        return;
    }
    output.success(format!(
        "Simplified CSV saved and ready to use: {} ({} rows)",
        report.output.display(),
        report.rows
    ));
    if !report.filled.is_empty() {
        output.warn(format!(
            "Not in export, filled with 'Unknown': {}",
            report.filled.join(", ")
        ));
    }
}

pub fn top_titles(top: &[TitleCount], output: &Output) {
    output.json(&json!({
        "type": "top_titles",
        "titles": top,
    }));
    heading(&format!("Top {} Most Watched Titles", top.len()), output);
    if top.is_empty() {
        output.println("(no titles)");
        return;
    }
    for row in chart::bar_rows(top, chart::DEFAULT_WIDTH) {
        output.println(format!(
            "{}  {} {}",
            row.label,
            row.bar.truecolor(229, 9, 20),
            row.count
        ));
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
