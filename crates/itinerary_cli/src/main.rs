//! Command-line editor over `itinerary_core`.
//!
//! # Responsibility
//! - Map subcommands onto itinerary store operations.
//! - Provide terminal implementations of the prompt capability.
//!
//! Days and activity positions are 1-based on the command line.

mod prompt;
mod render;

use clap::{Parser, Subcommand};
use itinerary_core::db::open_db;
use itinerary_core::suggest::DEFAULT_SUGGESTION_TIMEOUT;
use itinerary_core::{
    default_log_level, init_logging, is_video_link, to_embed_url, ActivityPatch, EditorConfig,
    HttpSuggestionProvider, ItemId, ItineraryStorage, ItineraryStore, MutationOutcome, Prompter,
    SqliteSlotStorage, SuggestionProvider, UnconfiguredProvider,
};
use log::warn;
use prompt::TerminalPrompter;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

const DB_FILE_NAME: &str = "itinerary.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Parser)]
#[command(name = "itinerary", version, about = "Plan a multi-day trip, day by day")]
struct Cli {
    /// Directory holding the slot database and logs.
    #[arg(long, env = "ITINERARY_DATA_DIR", default_value = ".itinerary")]
    data_dir: PathBuf,

    /// trace|debug|info|warn|error (defaults by build mode).
    #[arg(long, env = "ITINERARY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Suggestion service endpoint; local suggestions are used when unset.
    #[arg(long, env = "ITINERARY_SUGGEST_URL")]
    suggest_url: Option<String>,

    /// Answer yes to confirmation prompts.
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print all days, or one day with its activities.
    Show {
        #[arg(value_parser = parse_position)]
        day: Option<usize>,
    },
    /// Append a new day.
    AddDay,
    /// Delete a day (asks for confirmation).
    RemoveDay {
        #[arg(value_parser = parse_position)]
        day: usize,
    },
    /// Append an empty activity to a day.
    Add {
        #[arg(value_parser = parse_position)]
        day: usize,
    },
    /// Change fields of one activity.
    Edit {
        #[arg(value_parser = parse_position)]
        day: usize,
        activity_id: String,
        #[arg(long)]
        title: Option<String>,
        /// HH:MM, or "" to clear.
        #[arg(long)]
        from: Option<String>,
        /// HH:MM, or "" to clear.
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Remove one activity.
    Remove {
        #[arg(value_parser = parse_position)]
        day: usize,
        activity_id: String,
    },
    /// Duplicate the activity at a position, placing the copy right after it.
    Dup {
        #[arg(value_parser = parse_position)]
        day: usize,
        #[arg(value_parser = parse_position)]
        position: usize,
    },
    /// Replace a day's activities with one empty activity.
    Reset {
        #[arg(value_parser = parse_position)]
        day: usize,
    },
    /// Append suggested activities to a day.
    Suggest {
        #[arg(value_parser = parse_position)]
        day: usize,
    },
    /// Write the itinerary as pretty JSON.
    Export {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Replace the itinerary with a JSON document.
    Import { file: PathBuf },
    /// Print one day as pretty JSON.
    CopyDay {
        #[arg(value_parser = parse_position)]
        day: usize,
    },
    /// Print the embeddable preview URL of a video link.
    Embed { url: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    if let Command::Embed { url } = &cli.command {
        return Ok(print_embed(url));
    }

    let data_dir = absolute(&cli.data_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    start_logging(&data_dir, cli.log_level.as_deref());

    let conn = open_db(data_dir.join(DB_FILE_NAME))?;
    let config = EditorConfig::default();
    let storage = SqliteSlotStorage::new(&conn, config.slot_key.clone());
    let mut store = ItineraryStore::open(storage, TerminalPrompter::new(cli.yes), config);

    let code = match cli.command {
        Command::Show { day } => {
            match day {
                Some(index) => match store.itinerary().day(index) {
                    Some(day) => print!("{}", render::day_detail(index, day)),
                    None => return Ok(missing_day(index)),
                },
                None => print!("{}", render::overview(store.itinerary())),
            }
            ExitCode::SUCCESS
        }
        Command::AddDay => {
            let index = store.add_day();
            println!("added day {}", index + 1);
            ExitCode::SUCCESS
        }
        Command::RemoveDay { day } => remove_day(&mut store, day),
        Command::Add { day } => report(store.add_activity(day), day),
        Command::Edit {
            day,
            activity_id,
            title,
            from,
            to,
            notes,
            link,
        } => {
            let patch = ActivityPatch {
                title,
                time_from: from,
                time_to: to,
                notes,
                link,
            };
            if patch.is_empty() {
                eprintln!("nothing to change");
                return Ok(ExitCode::FAILURE);
            }
            if store.update_activity(day, &ItemId::from(activity_id), &patch)? {
                ExitCode::SUCCESS
            } else {
                eprintln!("no such activity on day {}", day + 1);
                ExitCode::FAILURE
            }
        }
        Command::Remove { day, activity_id } => {
            report(store.remove_activity(day, &ItemId::from(activity_id)), day)
        }
        Command::Dup { day, position } => report(store.duplicate_activity(day, position), day),
        Command::Reset { day } => report(store.reset_day(day), day),
        Command::Suggest { day } => {
            let provider = suggestion_provider(cli.suggest_url.as_deref());
            match store.suggest(day, provider.as_ref()) {
                Some(outcome) => {
                    println!("added {} suggested activities", outcome.added);
                    ExitCode::SUCCESS
                }
                None => return Ok(missing_day(day)),
            }
        }
        Command::Export { dir } => {
            let path = store.export_to_dir(&absolute(&dir)?)?;
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Command::Import { file } => match store.import_file(&file) {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        },
        Command::CopyDay { day } => match store.copy_day_json(day) {
            Some(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            None => return Ok(missing_day(day)),
        },
        Command::Embed { url } => print_embed(&url),
    };

    if let Some(notice) = store.active_notice(Instant::now()) {
        eprintln!("{}", notice.text);
    }
    Ok(code)
}

fn remove_day<S: ItineraryStorage, P: Prompter>(
    store: &mut ItineraryStore<S, P>,
    day: usize,
) -> ExitCode {
    if store.itinerary().day(day).is_none() {
        return missing_day(day);
    }
    if store.remove_day(day) {
        println!("removed day {}", day + 1);
    }
    ExitCode::SUCCESS
}

fn report(outcome: MutationOutcome, day: usize) -> ExitCode {
    match outcome {
        MutationOutcome::Applied | MutationOutcome::AtCapacity => ExitCode::SUCCESS,
        MutationOutcome::NotFound => {
            eprintln!("no such day or activity on day {}", day + 1);
            ExitCode::FAILURE
        }
    }
}

fn missing_day(index: usize) -> ExitCode {
    eprintln!("no day {}", index + 1);
    ExitCode::FAILURE
}

fn print_embed(url: &str) -> ExitCode {
    if !is_video_link(url) {
        eprintln!("not a recognized video link");
        return ExitCode::FAILURE;
    }
    match to_embed_url(url) {
        Some(embed) => {
            println!("{embed}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("no video id in link");
            ExitCode::FAILURE
        }
    }
}

fn suggestion_provider(endpoint: Option<&str>) -> Box<dyn SuggestionProvider> {
    let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) else {
        return Box::new(UnconfiguredProvider);
    };
    match HttpSuggestionProvider::new(endpoint, DEFAULT_SUGGESTION_TIMEOUT) {
        Ok(provider) => Box::new(provider),
        Err(err) => {
            warn!("event=suggest_provider module=cli status=error error={err}");
            Box::new(UnconfiguredProvider)
        }
    }
}

fn start_logging(data_dir: &Path, level: Option<&str>) {
    let log_dir = data_dir.join(LOG_DIR_NAME);
    let level = level.unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn parse_position(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(format!("expected a number starting at 1, got `{value}`")),
    }
}
