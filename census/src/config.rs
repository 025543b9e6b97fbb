//! Server configuration.
//!
//! Values come from an optional TOML file overlaid by the process environment.
//! Environment keys carry a `CENSUS_` prefix (`CENSUS_PORT` sets `port`). The
//! connection string is also read from a bare `MONGODB_URI`, which
//! `CENSUS_MONGODB_URI` overrides.

use std::path::Path;

use config::{Config, ConfigError, Environment, File, Map, Source};
use serde::Deserialize;

pub const DEFAULT_DATABASE: &str = "citizen-management";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

const ENV_PREFIX: &str = "CENSUS";
const MONGODB_URI_VAR: &str = "MONGODB_URI";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// MongoDB connection string. Required.
    pub mongodb_uri: String,
    /// Database holding the `citizens` collection.
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Loads configuration from `path` (which need not exist) and the environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_sources(File::from(path).required(false), std::env::vars().collect())
    }

    fn from_sources<F>(file: F, vars: Map<String, String>) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let bare_uri: Map<String, String> = vars
            .get(MONGODB_URI_VAR)
            .map(|uri| (MONGODB_URI_VAR.to_string(), uri.clone()))
            .into_iter()
            .collect();

        Config::builder()
            .set_default("database", DEFAULT_DATABASE)?
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(file)
            .add_source(Environment::default().source(Some(bare_uri)))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?
            .try_deserialize()
    }

    /// The `host:port` address to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn env(vars: &[(&str, &str)]) -> Map<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn toml(content: &'static str) -> impl Source + Send + Sync + 'static {
        File::from_str(content, FileFormat::Toml)
    }

    #[test]
    fn defaults_apply_when_only_uri_is_set() {
        let cfg = ServerConfig::from_sources(toml(""), env(&[("MONGODB_URI", "mongodb://db:27017")])).unwrap();

        assert_eq!(cfg.mongodb_uri, "mongodb://db:27017");
        assert_eq!(cfg.database, DEFAULT_DATABASE);
        assert_eq!(cfg.address(), "0.0.0.0:8080");
    }

    #[test]
    fn missing_uri_is_an_error() {
        assert!(ServerConfig::from_sources(toml(""), env(&[])).is_err());
    }

    #[test]
    fn prefixed_environment_overrides_file() {
        let file = toml(
            r#"
            mongodb_uri = "mongodb://file:27017"
            database = "census-file"
            port = 9000
            "#,
        );

        let cfg = ServerConfig::from_sources(
            file,
            env(&[("CENSUS_PORT", "9100"), ("CENSUS_DATABASE", "census-env")]),
        )
        .unwrap();

        assert_eq!(cfg.mongodb_uri, "mongodb://file:27017");
        assert_eq!(cfg.database, "census-env");
        assert_eq!(cfg.port, 9100);
    }

    #[test]
    fn unprefixed_variables_are_ignored() {
        let cfg = ServerConfig::from_sources(
            toml(""),
            env(&[
                ("MONGODB_URI", "mongodb://db"),
                ("HOST", "workstation.local"),
                ("PORT", "3000"),
                ("DATABASE", "other"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.address(), "0.0.0.0:8080");
        assert_eq!(cfg.database, DEFAULT_DATABASE);
    }

    #[test]
    fn prefixed_uri_overrides_bare_uri() {
        let cfg = ServerConfig::from_sources(
            toml(""),
            env(&[("MONGODB_URI", "mongodb://bare"), ("CENSUS_MONGODB_URI", "mongodb://prefixed")]),
        )
        .unwrap();

        assert_eq!(cfg.mongodb_uri, "mongodb://prefixed");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let file = File::from(Path::new("does-not-exist/census.toml")).required(false);
        let cfg = ServerConfig::from_sources(file, env(&[("MONGODB_URI", "mongodb://db")])).unwrap();

        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
