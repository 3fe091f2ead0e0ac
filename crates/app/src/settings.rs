//! Handles settings for the application.
//!
//! Settings are read from an optional `settings.toml` next to the binary and
//! can be overridden with `INVENTORY__<SECTION>__<KEY>` environment variables
//! (e.g. `INVENTORY__SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Minutes a session stays valid after sign-in.
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: u32,
    pub database: Database,
}

fn default_port() -> u16 {
    3000
}

fn default_session_ttl_minutes() -> u32 {
    12 * 60
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("INVENTORY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(raw: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn sqlite_database_with_defaults() {
        let settings = parse(
            r#"
            [server]
            database = { sqlite = "inventory.db" }
            "#,
        );
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.session_ttl_minutes, 720);
        assert!(settings.server.bind.is_none());
        assert!(matches!(settings.server.database, Database::Sqlite(ref p) if p == "inventory.db"));
    }

    #[test]
    fn memory_database() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080
            session_ttl_minutes = 30
            database = "memory"
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.session_ttl_minutes, 30);
        assert!(matches!(settings.server.database, Database::Memory));
    }
}
