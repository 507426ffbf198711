use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::Text;

use clima_core::{
    Config, DisplayRow, QueryForm, QueryInput, QueryState, display_rows, store_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Temperature and humidity lookup CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the Firebase project backing the lookups.
    Configure,

    /// Look up weather records matching a date and time.
    Lookup {
        /// Date to match, e.g. "2024-01-01". "today" uses the current date.
        #[arg(long)]
        date: Option<String>,

        /// Time to match, e.g. "10:00". "now" uses the current time.
        #[arg(long)]
        time: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Lookup { date, time } => lookup(date, time).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let project_id = Text::new("Firebase project id:")
        .with_initial_value(config.project_id.as_deref().unwrap_or(""))
        .prompt()?;
    let api_key = Text::new("API key (leave empty for none):")
        .with_initial_value(config.api_key.as_deref().unwrap_or(""))
        .prompt()?;
    let collection = Text::new("Collection:")
        .with_initial_value(&config.collection)
        .prompt()?;

    config.project_id = none_if_empty(project_id);
    config.api_key = none_if_empty(api_key);
    if !collection.is_empty() {
        config.collection = collection;
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn lookup(date: Option<String>, time: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let store = store_from_config(&config)?;

    // Prompt for anything not given as a flag. Empty answers are passed
    // through so the form reports its own validation error.
    let date = match date {
        Some(d) => d,
        None => Text::new("Data (YYYY-MM-DD):").prompt()?,
    };
    let time = match time {
        Some(t) => t,
        None => Text::new("Hora (HH:MM):").prompt()?,
    };

    let input = QueryInput::new(resolve_date(&date), resolve_time(&time));

    let mut form = QueryForm::new(store, config.collection.clone());
    match form.submit(&input).await {
        QueryState::Idle => {}
        QueryState::Error(message) => println!("{message}"),
        QueryState::Results(records) => {
            for row in display_rows(records) {
                println!("{}", format_row(&row));
                println!();
            }
        }
    }

    Ok(())
}

fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn resolve_date(raw: &str) -> String {
    if raw.eq_ignore_ascii_case("today") {
        Local::now().format("%Y-%m-%d").to_string()
    } else {
        raw.to_string()
    }
}

fn resolve_time(raw: &str) -> String {
    if raw.eq_ignore_ascii_case("now") {
        Local::now().format("%H:%M").to_string()
    } else {
        raw.to_string()
    }
}

fn format_row(row: &DisplayRow) -> String {
    format!("Temperatura: {}°C\nUmidade: {}%", row.temperature, row.humidity)
}
