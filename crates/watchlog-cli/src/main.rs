use clap::{ArgAction, Parser, Subcommand};
use commands::{add, config, import, log, menu, stats, AppContext};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlog")]
#[command(about = "watchlog - Log what you watch and see what you watch most")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a watched title to the watch log
    #[command(long_about = "Append one entry to the watch log. Fields not given as flags are prompted for interactively; the date defaults to today.")]
    Add {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        /// Watch time in whole minutes
        #[arg(long, value_name = "MINUTES")]
        minutes: Option<String>,

        /// Date watched (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Your rating (1-5)
        #[arg(long)]
        rating: Option<String>,

        /// Never prompt; missing fields are an error
        #[arg(long, action = ArgAction::SetTrue)]
        no_prompt: bool,
    },
    /// Show every entry in the watch log
    Log,
    /// Show statistics over the watch log
    Stats,
    /// Upload and simplify a streaming-service viewing history export
    #[command(long_about = "Normalize an exported viewing-history CSV into the fixed title/start time/device/duration/date_added schema. Columns are matched case-insensitively; missing ones are filled with 'Unknown'. Each import replaces the previous one.")]
    Import {
        /// Export CSV to import
        file: PathBuf,

        /// Show the import overview afterwards
        #[arg(long, action = ArgAction::SetTrue)]
        overview: bool,

        /// Show the top titles afterwards
        #[arg(long, action = ArgAction::SetTrue)]
        top: bool,
    },
    /// Show statistics over an imported export
    #[command(long_about = "Show total entries, most watched title, most active month and most active year of an import. Requires an import in this run, or --normalized pointing at an earlier normalized file.")]
    Overview {
        /// Normalized file from an earlier import
        #[arg(long, value_name = "PATH")]
        normalized: Option<PathBuf>,
    },
    /// Show the most watched titles of an imported export as a bar chart
    Top {
        /// Number of titles (defaults to stats.top_k from config)
        #[arg(short, long, value_parser = parse_top_k)]
        k: Option<usize>,

        /// Normalized file from an earlier import
        #[arg(long, value_name = "PATH")]
        normalized: Option<PathBuf>,
    },
    /// Interactive menu with every action in one session
    Menu,
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show effective configuration and file locations
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

/// Same rule as `stats.top_k` in the config file
fn parse_top_k(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(k) => Ok(k),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let ctx = AppContext::load(cli.config)?;

    logging::init_logging_with_file(cli.verbose, cli.quiet, ctx.config.logging.file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    tracing::debug!(config_file = %ctx.config_file.display(), "Configuration loaded");

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Add {
            title,
            genre,
            minutes,
            date,
            rating,
            no_prompt,
        } => {
            let fields = add::AddFields { title, genre, minutes, date, rating };
            add::run_add(&ctx, fields, no_prompt, &output)
        }
        Commands::Log => log::run_log(&ctx, &output),
        Commands::Stats => stats::run_stats(&ctx, &output),
        Commands::Import { file, overview, top } => import::run_import(&ctx, &file, overview, top, &output),
        Commands::Overview { normalized } => import::run_overview(&ctx, normalized, &output),
        Commands::Top { k, normalized } => import::run_top(&ctx, k, normalized, &output),
        Commands::Menu => menu::run_menu(&ctx, &output),
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => config::show_config(&ctx, &output),
            ConfigCommands::Init { force } => config::init_config(&ctx, force, &output),
        },
    }
}
