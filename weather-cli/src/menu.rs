//! Interactive main menu and the handlers behind each entry.

use std::io::Write;

use anyhow::{Result, bail};
use weather_core::{AddOutcome, RemoveOutcome, Session, group_by_day};

use crate::{
    prompter::Prompter,
    render::{render_current, render_favorites, render_forecast},
};

const API_KEY_HINT: &str = "An OpenWeather API key is required. Get one at https://openweathermap.org/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CurrentWeather,
    Forecast,
    ListFavorites,
    AddFavorite,
    RemoveFavorite,
    ChangeApiKey,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::CurrentWeather,
        MenuChoice::Forecast,
        MenuChoice::ListFavorites,
        MenuChoice::AddFavorite,
        MenuChoice::RemoveFavorite,
        MenuChoice::ChangeApiKey,
        MenuChoice::Exit,
    ];

    /// Parse the number typed at the main prompt.
    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::CurrentWeather => "Current weather",
            MenuChoice::Forecast => "5-day forecast",
            MenuChoice::ListFavorites => "Show favorite cities",
            MenuChoice::AddFavorite => "Add a favorite city",
            MenuChoice::RemoveFavorite => "Remove a favorite city",
            MenuChoice::ChangeApiKey => "Change API key",
            MenuChoice::Exit => "Exit",
        }
    }
}

pub struct Menu<P, W> {
    session: Session,
    prompter: P,
    out: W,
}

impl<P: Prompter, W: Write> Menu<P, W> {
    pub fn new(session: Session, prompter: P, out: W) -> Self {
        Self { session, prompter, out }
    }

    /// Run the setup if needed, then loop over the main menu until the user exits.
    pub async fn run(&mut self) -> Result<()> {
        self.ensure_credential()?;

        loop {
            self.print_menu()?;

            let Some(input) = self.prompter.text("Choose an option (1-7):")? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&input) else {
                writeln!(self.out, "Invalid choice, please enter a number from 1 to 7.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                break;
            }

            if let Err(err) = self.dispatch(choice).await {
                tracing::debug!(?choice, error = ?err, "menu action failed");
                writeln!(self.out, "Error: {err:#}")?;
            }
        }

        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::CurrentWeather => {
                if let Some(city) = self.prompt_city()? {
                    self.show_current(&city).await?;
                }
            }
            MenuChoice::Forecast => {
                if let Some(city) = self.prompt_city()? {
                    self.show_forecast(&city).await?;
                }
            }
            MenuChoice::ListFavorites => self.list_favorites()?,
            MenuChoice::AddFavorite => {
                if let Some(city) = self.prompt_city()? {
                    self.add_favorite(&city)?;
                }
            }
            MenuChoice::RemoveFavorite => {
                // Nothing could match, so skip asking for a city.
                if self.session.favorites().cities().is_empty() {
                    writeln!(self.out, "No favorite cities yet.")?;
                } else if let Some(city) = self.prompt_city()? {
                    self.remove_favorite(&city)?;
                }
            }
            MenuChoice::ChangeApiKey => self.change_api_key()?,
            MenuChoice::Exit => {}
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== Weather ===")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, choice.label())?;
        }
        Ok(())
    }

    /// Ask for a city name. `None` if cancelled or blank.
    fn prompt_city(&mut self) -> Result<Option<String>> {
        let favorites = self.session.favorites().cities();
        let message = if favorites.is_empty() {
            "City name:".to_string()
        } else {
            format!("City name (favorites: {}):", favorites.join(", "))
        };

        let Some(input) = self.prompter.text(&message)? else {
            return Ok(None);
        };

        let city = input.trim();
        if city.is_empty() {
            writeln!(self.out, "City name cannot be empty.")?;
            return Ok(None);
        }

        Ok(Some(city.to_string()))
    }

    /// Mandatory first-run setup: keeps asking until a non-empty key is saved.
    pub fn ensure_credential(&mut self) -> Result<()> {
        if self.session.has_credential() {
            return Ok(());
        }

        writeln!(self.out, "{API_KEY_HINT}")?;
        loop {
            let Some(input) = self.prompter.secret("API key:")? else {
                bail!("API key setup was cancelled");
            };

            if self.save_api_key(&input)? {
                return Ok(());
            }
        }
    }

    pub fn change_api_key(&mut self) -> Result<()> {
        writeln!(self.out, "{API_KEY_HINT}")?;
        if let Some(input) = self.prompter.secret("New API key:")? {
            self.save_api_key(&input)?;
        }
        Ok(())
    }

    fn save_api_key(&mut self, input: &str) -> Result<bool> {
        let key = input.trim();
        if key.is_empty() {
            writeln!(self.out, "API key cannot be empty.")?;
            return Ok(false);
        }

        let credential = self.session.set_api_key(key)?;
        tracing::info!(setup_date = %credential.setup_date, "API key saved");
        writeln!(self.out, "API key saved.")?;
        Ok(true)
    }

    pub async fn show_current(&mut self, city: &str) -> Result<()> {
        let provider = self.session.provider()?;
        let report = provider.current(city).await?;
        writeln!(self.out, "{}", render_current(&report))?;
        Ok(())
    }

    pub async fn show_forecast(&mut self, city: &str) -> Result<()> {
        let provider = self.session.provider()?;
        let entries = provider.forecast(city).await?;
        let days = group_by_day(&entries);
        writeln!(self.out, "{}", render_forecast(city, &days))?;
        Ok(())
    }

    pub fn list_favorites(&mut self) -> Result<()> {
        writeln!(self.out, "{}", render_favorites(self.session.favorites().cities()))?;
        Ok(())
    }

    pub fn add_favorite(&mut self, city: &str) -> Result<()> {
        match self.session.favorites_mut().add(city)? {
            AddOutcome::Added => writeln!(self.out, "{city} added to favorites.")?,
            AddOutcome::AlreadyPresent => writeln!(self.out, "{city} is already in favorites.")?,
        }
        Ok(())
    }

    pub fn remove_favorite(&mut self, city: &str) -> Result<()> {
        match self.session.favorites_mut().remove(city)? {
            RemoveOutcome::Removed => writeln!(self.out, "{city} removed from favorites.")?,
            RemoveOutcome::NotFound => writeln!(self.out, "{city} is not in favorites.")?,
        }
        Ok(())
    }
}
