use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use url::Url;

pub const DEFAULT_START_URL: &str = "https://bidplus.gem.gov.in/bidresultlists/?lang=english";
/// Upper bound for the pause between pages.
pub const MAX_DELAY_SECS: f64 = 3600.0;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub webdriver: WebDriverSettings,
    pub scraper: ScraperSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WebDriverSettings {
    pub server_url: String,
    pub headless: bool,
    pub user_agent: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    pub start_url: String,
    pub output_file: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub card_wait_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub next_page_wait_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_delay_secs: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_delay_secs: f64,
}

impl ScraperSettings {
    pub fn card_wait(&self) -> Duration {
        Duration::from_secs(self.card_wait_secs)
    }

    pub fn next_page_wait(&self) -> Duration {
        Duration::from_secs(self.next_page_wait_secs)
    }

    pub fn start_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.start_url)
            .map_err(|e| ConfigError::Message(format!("Invalid scraper.start_url: {}", e)))
    }
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    settings.scraper.start_url()?;

    let scraper = &settings.scraper;
    if !scraper.min_delay_secs.is_finite()
        || !scraper.max_delay_secs.is_finite()
        || scraper.min_delay_secs < 0.0
        || scraper.max_delay_secs < scraper.min_delay_secs
        || scraper.max_delay_secs > MAX_DELAY_SECS
    {
        return Err(ConfigError::Message(format!(
            "Invalid politeness delay range: {}..{}",
            scraper.min_delay_secs, scraper.max_delay_secs
        )));
    }

    Ok(())
}

/// Defaults, then `configuration/base.yaml` if present, then `APP_` env vars
/// (e.g. `APP_SCRAPER__START_URL`).
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let settings = Config::builder()
        .set_default("webdriver.server_url", "http://localhost:4444")?
        .set_default("webdriver.headless", true)?
        .set_default("webdriver.user_agent", DEFAULT_USER_AGENT)?
        .set_default("scraper.start_url", DEFAULT_START_URL)?
        .set_default("scraper.output_file", "scraped_bids.json")?
        .set_default("scraper.card_wait_secs", 20)?
        .set_default("scraper.next_page_wait_secs", 10)?
        .set_default("scraper.min_delay_secs", 3.0)?
        .set_default("scraper.max_delay_secs", 8.0)?
        .add_source(File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<Settings>()?;

    validate(&settings)?;

    Ok(settings)
}
