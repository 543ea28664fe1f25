//! Process settings: serde defaults layered under environment variables
//! (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_URL_PREFIX: &str = "/api";
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

/// Connection parameters for the catalog database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Full URL from `DATABASE_URL`; overrides the individual parts when set.
    pub url: Option<String>,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseSettings {
    /// Connect options from `DATABASE_URL`, or from the individual parts.
    /// Parts are passed to the builder as-is, so credentials need no escaping.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(|_| ConfigError::Invalid {
                var: "DATABASE_URL",
                value: redact_url(url),
            });
        }
        let mut opts = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if !self.password.is_empty() {
            opts = opts.password(&self.password);
        }
        Ok(opts)
    }
}

/// Hide the userinfo part of a connection URL.
pub fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub database: DatabaseSettings,
    /// Path prefix for catalog routes, e.g. `/api`.
    pub url_prefix: String,
    pub bind: String,
    pub seed_demo: bool,
}

/// Flat view of the environment; keys are the lowercased variable names.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    database_url: Option<String>,
    #[serde(default = "default_user")]
    postgres_user: String,
    #[serde(default)]
    postgres_password: String,
    #[serde(default = "default_host")]
    postgres_host: String,
    #[serde(default = "default_port")]
    postgres_port: u16,
    #[serde(default = "default_db")]
    postgres_db: String,
    #[serde(default = "default_max_connections")]
    catalog_max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    catalog_acquire_timeout_secs: u64,
    #[serde(default = "default_url_prefix")]
    catalog_url_prefix: String,
    #[serde(default = "default_bind")]
    catalog_bind: String,
    #[serde(default)]
    catalog_seed_demo: bool,
}

fn default_user() -> String {
    "postgres".into()
}

fn default_host() -> String {
    "localhost".into()
}

fn default_port() -> u16 {
    5432
}

fn default_db() -> String {
    "cats".into()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_url_prefix() -> String {
    DEFAULT_URL_PREFIX.into()
}

fn default_bind() -> String {
    DEFAULT_BIND.into()
}

impl Settings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(config::Environment::default())
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::load(config::Environment::default().source(Some(vars)))
    }

    fn load(env: config::Environment) -> Result<Self, ConfigError> {
        let raw: EnvSettings = config::Config::builder()
            .add_source(env.ignore_empty(true))
            .build()?
            .try_deserialize()?;

        let url_prefix = raw.catalog_url_prefix.trim().to_string();
        if !url_prefix.starts_with('/') || url_prefix.len() < 2 || url_prefix.ends_with('/') {
            return Err(ConfigError::Invalid {
                var: "CATALOG_URL_PREFIX",
                value: url_prefix,
            });
        }

        Ok(Settings {
            database: DatabaseSettings {
                url: raw.database_url,
                user: raw.postgres_user,
                password: raw.postgres_password,
                host: raw.postgres_host,
                port: raw.postgres_port,
                name: raw.postgres_db,
                max_connections: raw.catalog_max_connections,
                acquire_timeout: Duration::from_secs(raw.catalog_acquire_timeout_secs),
            },
            url_prefix,
            bind: raw.catalog_bind,
            seed_demo: raw.catalog_seed_demo,
        })
    }
}
