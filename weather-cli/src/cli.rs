use std::{io, path::PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use weather_core::{Config, Session};

use crate::{menu::Menu, prompter::InquirePrompter};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI with favorite cities")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved API key and favorites.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Language for weather descriptions, e.g. "en" or "de".
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enter or replace the OpenWeather API key.
    Configure,

    /// Show current weather for a city.
    Current { city: String },

    /// Show the 5-day forecast for a city.
    Forecast { city: String },

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List saved cities.
    List,
    /// Add a city.
    Add { city: String },
    /// Remove a city.
    Remove { city: String },
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(lang) = &self.lang {
            config.lang = lang.clone();
        }

        Ok(config)
    }

    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;
        tracing::debug!(?config, "configuration loaded");

        let session = Session::open(config)?;
        let mut menu = Menu::new(session, InquirePrompter, io::stdout());

        match self.command {
            None => menu.run().await?,
            Some(Command::Configure) => menu.change_api_key()?,
            Some(Command::Current { city }) => {
                menu.ensure_credential()?;
                menu.show_current(non_empty(&city)?).await?;
            }
            Some(Command::Forecast { city }) => {
                menu.ensure_credential()?;
                menu.show_forecast(non_empty(&city)?).await?;
            }
            Some(Command::Favorites { action }) => match action {
                FavoritesCommand::List => menu.list_favorites()?,
                FavoritesCommand::Add { city } => menu.add_favorite(non_empty(&city)?)?,
                FavoritesCommand::Remove { city } => menu.remove_favorite(non_empty(&city)?)?,
            },
        }

        Ok(())
    }
}

fn non_empty(city: &str) -> Result<&str> {
    let city = city.trim();
    if city.is_empty() {
        bail!("City name cannot be empty.");
    }
    Ok(city)
}
