//! Configuration management with validation and defaults
//!
//! TOML file, then `DAOLETTE_*` environment overrides, then validation.
//! The wheel tables, multipliers and stake floor are constants and are not
//! configurable.

use crate::common::types::{amount, AccountKind, Address};
use crate::errors::{ConfigurationError, DaoletteError, DaoletteResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_CAPITAL: u128 = 1_000_000_000_000_000_000_000;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaoletteConfig {
    pub game: GameConfig,
    pub treasury: TreasuryConfig,
    pub monitoring: MonitoringConfig,
}

/// Game administration settings applied at startup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub owner: Address,
    /// Treasury registered at startup; must be the in-process treasury's address
    pub treasury: Option<Address>,
    pub start_active: bool,
    /// Check the submitted outcome list before the stake is forwarded
    pub preflight_validation: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            owner: Address::derive(AccountKind::EndUser, "daolette-owner"),
            treasury: Some(default_treasury_address()),
            start_active: true,
            preflight_validation: false,
        }
    }
}

/// Seed values for the in-process treasury
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasuryConfig {
    pub address: Address,
    #[serde(with = "amount")]
    pub minimum_capital: u128,
    #[serde(with = "amount")]
    pub initial_balance: u128,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            address: default_treasury_address(),
            minimum_capital: DEFAULT_CAPITAL,
            initial_balance: DEFAULT_CAPITAL,
        }
    }
}

fn default_treasury_address() -> Address {
    Address::derive(AccountKind::Contract, "daolette-treasury")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: LogLevel,
    /// Print committed round records as JSON
    pub json_events: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            json_events: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl DaoletteConfig {
    /// Validate configuration for logical consistency
    pub fn validate(&self) -> DaoletteResult<()> {
        if !self.treasury.address.is_contract() {
            return Err(invalid(
                "treasury.address",
                self.treasury.address.to_string(),
                "Treasury must be a contract address",
            ));
        }

        if self.treasury.minimum_capital == 0 {
            return Err(invalid("treasury.minimum_capital", "0", "Minimum capital cannot be zero"));
        }

        if self.game.owner.is_contract() {
            return Err(invalid(
                "game.owner",
                self.game.owner.to_string(),
                "Owner must be an end-user address",
            ));
        }

        match self.game.treasury {
            Some(address) if address != self.treasury.address => Err(invalid(
                "game.treasury",
                address.to_string(),
                "Must match treasury.address",
            )),
            None if self.game.start_active => {
                Err(ConfigurationError::MissingTreasury.into())
            }
            _ => Ok(()),
        }
    }
}

fn invalid(field: &str, value: impl Into<String>, reason: &str) -> DaoletteError {
    ConfigurationError::InvalidValue {
        field: field.to_string(),
        value: value.into(),
        reason: reason.to_string(),
    }
    .into()
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> DaoletteResult<DaoletteConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            DaoletteConfig::default()
        };

        apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> DaoletteResult<DaoletteConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }

    /// Save configuration to file
    pub fn save(&self, config: &DaoletteConfig, path: &str) -> DaoletteResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

/// Apply `DAOLETTE_*` overrides read through `lookup`
pub fn apply_overrides<F>(config: &mut DaoletteConfig, lookup: F) -> DaoletteResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(owner) = parse_var(&lookup, "DAOLETTE_OWNER", "Invalid address")? {
        config.game.owner = owner;
    }
    if let Some(address) = parse_var::<Address, _>(&lookup, "DAOLETTE_TREASURY_ADDRESS", "Invalid address")? {
        config.treasury.address = address;
        config.game.treasury = Some(address);
    }
    if let Some(active) = parse_var(&lookup, "DAOLETTE_START_ACTIVE", "Invalid boolean value")? {
        config.game.start_active = active;
    }
    if let Some(preflight) = parse_var(&lookup, "DAOLETTE_PREFLIGHT", "Invalid boolean value")? {
        config.game.preflight_validation = preflight;
    }
    if let Some(capital) = parse_var(&lookup, "DAOLETTE_MINIMUM_CAPITAL", "Invalid amount")? {
        config.treasury.minimum_capital = capital;
    }
    if let Some(balance) = parse_var(&lookup, "DAOLETTE_INITIAL_BALANCE", "Invalid amount")? {
        config.treasury.initial_balance = balance;
    }
    if let Some(level) = parse_var(&lookup, "DAOLETTE_LOG_LEVEL", "Invalid log level")? {
        config.monitoring.log_level = level;
    }
    if let Some(json) = parse_var(&lookup, "DAOLETTE_JSON_EVENTS", "Invalid boolean value")? {
        config.monitoring.json_events = json;
    }

    Ok(())
}

fn parse_var<T, F>(lookup: &F, key: &str, reason: &str) -> DaoletteResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(key, raw.clone(), reason)),
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> DaoletteResult<()> {
    ConfigLoader::new().save(&DaoletteConfig::default(), path)
}
