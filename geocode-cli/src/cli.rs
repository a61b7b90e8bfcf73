use anyhow::Context;
use clap::{Parser, Subcommand};
use geocode_core::{
    Config, GeoLocator, GeoResult, HttpTransport, LOCATION_CODE_SEPARATOR, ResultLine,
    endpoint::DEFAULT_BASE_URL,
};
use inquire::{Password, PasswordDisplayMode, Text};
use serde::Serialize;
use serde_json::Number;
use tracing::{info, warn};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geocode", version, about = "Resolve US cities and ZIP codes to coordinates")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key (and optionally a custom API base URL).
    Configure,

    /// Resolve one or more locations, e.g. "Madison, WI" or "12345".
    Lookup {
        /// Locations as "city, state" or a US ZIP code.
        locations: Vec<String>,

        /// Print one JSON object per location instead of text lines.
        #[arg(long)]
        json: bool,
    },

    /// Print the path of the configuration file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Lookup { locations, json } => lookup(&locations, json).await?,
            Command::ConfigPath => println!("{}", Config::config_file_path()?.display()),
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API base URL:")
        .with_default(config.base_url())
        .with_help_message(&format!("Leave as is to use {DEFAULT_BASE_URL}"))
        .prompt()
        .context("Failed to read API base URL")?;

    config.set_api_key(api_key.trim().to_string());
    config.set_base_url(&base_url);

    // Fail before saving if the URL is unusable.
    config.endpoint_builder()?;
    let path = config.save()?;

    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn lookup(locations: &[String], json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let locator = GeoLocator::new(config.endpoint_builder()?, HttpTransport::new());

    for raw in locations.iter().filter(|l| l.contains(LOCATION_CODE_SEPARATOR)) {
        warn!("Location '{raw}' contains '{LOCATION_CODE_SEPARATOR}'; its text output line will be ambiguous");
    }

    let lines = locator.process_all(locations).await;
    let failed = lines.iter().filter(|l| !l.result.is_success()).count();
    info!("{} of {} locations resolved", lines.len() - failed, lines.len());

    for line in &lines {
        if json {
            println!("{}", serde_json::to_string(&JsonLine::from(line))?);
        } else {
            println!("{line}");
        }
    }

    Ok(())
}

/// `--json` view of a result line.
#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    input: &'a str,
    #[serde(flatten)]
    outcome: JsonOutcome<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JsonOutcome<'a> {
    Ok {
        latitude: &'a Number,
        longitude: &'a Number,
        place_name: Option<&'a str>,
        country: Option<&'a str>,
    },
    Error {
        message: String,
    },
}

impl<'a> From<&'a ResultLine> for JsonLine<'a> {
    fn from(line: &'a ResultLine) -> Self {
        let outcome = match &line.result {
            GeoResult::Success(place) => JsonOutcome::Ok {
                latitude: &place.latitude,
                longitude: &place.longitude,
                place_name: place.name.as_deref(),
                country: place.country.as_deref(),
            },
            GeoResult::Failure(err) => JsonOutcome::Error { message: err.to_string() },
        };

        JsonLine { input: &line.input, outcome }
    }
}
