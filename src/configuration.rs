use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    #[serde(default)]
    pub store: StoreBackend,
    pub listing: ListingSettings,
}

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Full connection URL; wins over the individual fields when set.
    pub url: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ListingSettings {
    pub default_limit: i64,
    pub max_limit: Option<i64>,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: None,
        }
    }
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database_name)
            .ssl_mode(PgSslMode::Prefer))
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .set_default("app_host", "127.0.0.1")?
        .set_default("app_port", 5001_i64)?
        .set_default("store", "postgres")?
        .set_default("database.username", "postgres")?
        .set_default("database.password", "postgres")?
        .set_default("database.host", "127.0.0.1")?
        .set_default("database.port", 5432_i64)?
        .set_default("database.database_name", "feedback")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("database.acquire_timeout_secs", 30_i64)?
        .set_default("listing.default_limit", 20_i64)?
        // configuration.yaml next to the binary, optional
        .add_source(config::File::with_name("configuration").required(false))
        // APP__DATABASE__HOST=... style overrides
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .set_override_option("app_port", std::env::var("PORT").ok())?
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()?;

    settings.try_deserialize()
}
