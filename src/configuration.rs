use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub crawler: CrawlerSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(&self.password)
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

/// Everything the crawl and retrain workers need: where the browser lives,
/// which site to walk, where session/model artifacts go, and the daily
/// ceilings on collection and outreach.
#[derive(serde::Deserialize, Clone)]
pub struct CrawlerSettings {
    pub webdriver_url: String,
    pub base_url: String,
    pub cookies_path: String,
    pub model_path: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_leads: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_comments: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_messages: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub retrain_interval_hours: u64,
    /// None keeps the operator-supervised indefinite wait on manual login.
    pub max_login_wait_secs: Option<u64>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
