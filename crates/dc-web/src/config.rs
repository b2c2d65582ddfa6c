//! Server configuration

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use dc_core::DEFAULT_SIMULATIONS;

/// Server configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind
    pub host: IpAddr,
    /// HTTP port
    pub port: u16,
    /// Directory with the front-end build, served for unmatched paths
    pub static_dir: Option<PathBuf>,
    /// Simulations run when a request does not say
    pub default_simulations: u64,
    /// Largest simulation count a request may ask for
    pub max_simulations: u64,
    /// Most dice a single scenario may roll
    pub max_dice: u32,
    /// Most faces a die may have
    pub max_sides: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            static_dir: None,
            default_simulations: DEFAULT_SIMULATIONS,
            max_simulations: 100_000_000,
            max_dice: 1_000,
            max_sides: 1_000_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = match var("DICECHECK_HOST") {
            Some(h) => h
                .parse()
                .context("DICECHECK_HOST must be an IP address")?,
            None => defaults.host,
        };
        let port = match var("DICECHECK_PORT") {
            Some(p) => p
                .parse()
                .context("DICECHECK_PORT must be a valid port number")?,
            None => defaults.port,
        };
        let default_simulations = match var("DICECHECK_DEFAULT_SIMULATIONS") {
            Some(n) => n
                .parse()
                .context("DICECHECK_DEFAULT_SIMULATIONS must be a positive integer")?,
            None => defaults.default_simulations,
        };
        let max_simulations = match var("DICECHECK_MAX_SIMULATIONS") {
            Some(n) => n
                .parse()
                .context("DICECHECK_MAX_SIMULATIONS must be a positive integer")?,
            None => defaults.max_simulations,
        };
        let max_dice = match var("DICECHECK_MAX_DICE") {
            Some(n) => n
                .parse()
                .context("DICECHECK_MAX_DICE must be a positive integer")?,
            None => defaults.max_dice,
        };
        let max_sides = match var("DICECHECK_MAX_SIDES") {
            Some(n) => n
                .parse()
                .context("DICECHECK_MAX_SIDES must be a positive integer")?,
            None => defaults.max_sides,
        };
        if max_dice == 0 || max_sides == 0 {
            anyhow::bail!("DICECHECK_MAX_DICE and DICECHECK_MAX_SIDES must be positive");
        }
        if default_simulations == 0 || default_simulations > max_simulations {
            anyhow::bail!(
                "DICECHECK_DEFAULT_SIMULATIONS must be between 1 and {max_simulations}"
            );
        }

        Ok(Self {
            host,
            port,
            static_dir: var("DICECHECK_STATIC_DIR")
                .filter(|d| !d.is_empty())
                .map(PathBuf::from),
            default_simulations,
            max_simulations,
            max_dice,
            max_sides,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.static_dir, None);
        assert_eq!(config.default_simulations, 1_000_000);
        assert_eq!(config.max_dice, 1_000);
        assert_eq!(config.max_sides, 1_000_000);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("DICECHECK_HOST", "0.0.0.0"),
            ("DICECHECK_PORT", "8080"),
            ("DICECHECK_STATIC_DIR", "web/dist"),
            ("DICECHECK_DEFAULT_SIMULATIONS", "5000"),
            ("DICECHECK_MAX_SIMULATIONS", "10000"),
            ("DICECHECK_MAX_DICE", "50"),
            ("DICECHECK_MAX_SIDES", "100"),
        ])
        .unwrap();
        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, Some(PathBuf::from("web/dist")));
        assert_eq!(config.default_simulations, 5_000);
        assert_eq!(config.max_simulations, 10_000);
        assert_eq!(config.max_dice, 50);
        assert_eq!(config.max_sides, 100);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(load(&[("DICECHECK_PORT", "http")]).is_err());
        assert!(load(&[("DICECHECK_HOST", "localhost:1")]).is_err());
        assert!(load(&[("DICECHECK_DEFAULT_SIMULATIONS", "0")]).is_err());
        assert!(load(&[("DICECHECK_MAX_DICE", "0")]).is_err());
        assert!(load(&[("DICECHECK_MAX_SIDES", "-6")]).is_err());
        assert!(load(&[("DICECHECK_MAX_DICE", "5000000000")]).is_err());
        assert!(
            load(&[
                ("DICECHECK_DEFAULT_SIMULATIONS", "20"),
                ("DICECHECK_MAX_SIMULATIONS", "10"),
            ])
            .is_err()
        );
    }
}
