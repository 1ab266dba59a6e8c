use anyhow::Context;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// False when the URL was assembled without `DB_PASSWORD`.
    pub db_password_set: bool,
    pub db_max_connections: u32,
    pub server_port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let (database_url, db_password_set) = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => (url, true),
            None => {
                let password = var("DB_PASSWORD", "");
                let port: u16 = var("DB_PORT", "5432")
                    .parse()
                    .context("DB_PORT must be a valid port number")?;
                let url = format!(
                    "postgres://{}:{}@{}:{}/{}",
                    var("DB_USER", "postgres"),
                    password,
                    var("DB_HOST", "localhost"),
                    port,
                    var("DB_NAME", "compasscar"),
                );
                (url, !password.is_empty())
            }
        };

        Ok(Config {
            database_url,
            db_password_set,
            db_max_connections: var("DB_MAX_CONNECTIONS", "10")
                .parse()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            server_port: var("PORT", "3000")
                .parse()
                .context("PORT must be a valid port number")?,
            log_level: var("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(
            config.database_url,
            "postgres://postgres:@localhost:5432/compasscar"
        );
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.log_level, "info");
        assert!(!config.db_password_set);
    }

    #[test]
    fn database_url_wins_over_db_parts() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://app:secret@db:6543/cars"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "postgres://app:secret@db:6543/cars");
    }

    #[test]
    fn db_parts_are_assembled_into_url() {
        let config = config_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6000"),
            ("DB_NAME", "fleet"),
            ("DB_USER", "fleet_rw"),
            ("DB_PASSWORD", "pw"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "postgres://fleet_rw:pw@db.internal:6000/fleet");
        assert_eq!(config.server_port, 8080);
        assert!(config.db_password_set);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("DB_PORT", "99999")]).is_err());
    }
}
