use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use sunny_core::{
    Config, Location, Place, PlaceState, PlaceStore, Repository, WeatherState,
    error::USER_NOTICE,
};
use tracing::{error, info};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sunny", version, about = "Sunny weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the provider token and locale.
    Configure,

    /// Search places by name.
    Search {
        /// Place name, e.g. "北京".
        query: String,

        /// Pick one of the results and remember it as the current place.
        #[arg(long)]
        select: bool,
    },

    /// Show weather for the saved place or for explicit coordinates.
    Show {
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<String>,

        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<String>,

        /// Display name when coordinates are given.
        #[arg(long)]
        name: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Search { query, select } => search(&config, &query, select).await,
            Command::Show { lng, lat, name } => {
                let place = match (lng, lat) {
                    (Some(lng), Some(lat)) => Place {
                        name: name.unwrap_or_else(|| format!("{lng},{lat}")),
                        location: Location { lng, lat },
                        address: String::new(),
                    },
                    _ => PlaceStore::from_config(&config)?.load()?,
                };
                show(&config, &place).await
            }
        }
    }
}

fn configure(mut config: Config) -> Result<()> {
    let token = Text::new("Caiyun API token:")
        .with_default(&config.api.token)
        .prompt()
        .context("Token prompt was cancelled")?;
    let lang = Text::new("Locale:")
        .with_default(&config.api.lang)
        .prompt()
        .context("Locale prompt was cancelled")?;

    config.set_token(token.trim());
    config.api.lang = lang.trim().to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn search(config: &Config, query: &str, select: bool) -> Result<()> {
    let state = PlaceState::new(
        Repository::from_config(config),
        PlaceStore::from_config(config)?,
    );

    state.search_places(query).await;

    let latest = state
        .results()
        .latest()
        .ok_or_else(|| anyhow!("Search for '{query}' produced no result"))?;

    let places = match latest.as_ref() {
        Ok(places) => places,
        Err(err) => {
            error!(error = %err, query, "place search failed");
            println!("{}", err.user_message());
            return Ok(());
        }
    };

    if places.is_empty() {
        println!("No places found for '{query}'.");
        return Ok(());
    }

    if !select {
        for place in places {
            println!("{}", render::place_line(place));
        }
        return Ok(());
    }

    let options: Vec<String> = places.iter().map(render::place_line).collect();
    let picked = Select::new("Select a place:", options)
        .raw_prompt()
        .context("Place selection was cancelled")?;

    let place = &places[picked.index];
    state.save_place(place)?;
    info!(name = %place.name, "saved current place");

    show(config, place).await
}

async fn show(config: &Config, place: &Place) -> Result<()> {
    let state = WeatherState::new(Repository::from_config(config));
    state.select_place(place);

    state.refresh_weather().await;

    match state.weather().latest().as_deref() {
        Some(Ok(weather)) => print!("{}", render::weather(&state.place_name(), weather)),
        Some(Err(err)) => {
            error!(error = %err, "weather refresh failed");
            println!("{USER_NOTICE}");
        }
        None => println!("{USER_NOTICE}"),
    }

    Ok(())
}
