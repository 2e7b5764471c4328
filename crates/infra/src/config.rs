//! Worker configuration loaded from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use shelfwise_discounts::DiscountSource;
use shelfwise_products::{DiscountPercent, LookaheadDays};

pub const ENV_DAYS_AHEAD: &str = "SHELFWISE_DAYS_AHEAD";
pub const ENV_DISCOUNT_PERCENT: &str = "SHELFWISE_DISCOUNT_PERCENT";
pub const ENV_POLL_INTERVAL_SECS: &str = "SHELFWISE_POLL_INTERVAL_SECS";
pub const ENV_SOURCES: &str = "SHELFWISE_SOURCES";
pub const ENV_IDEMPOTENT: &str = "SHELFWISE_IDEMPOTENT";
pub const ENV_SEED_FILE: &str = "SHELFWISE_SEED_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Discount worker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Lookahead for near-expiry selection.
    pub days_ahead: i64,
    /// Percentage taken off each selected product.
    pub discount_percent: i64,
    /// How often the runner wakes up to try a run.
    ///
    /// Without the ledger every tick inside the gate window discounts again, so
    /// the default 5s poll against the one-minute window compounds the discount
    /// about twelve times a night.
    pub poll_interval: Duration,
    /// Sources discounted on every tick, in order.
    ///
    /// A product that is both in the catalog and in the cart is discounted once
    /// per source, so the default `[Catalog, Cart]` discounts cart items twice
    /// per run, ledger or not.
    pub sources: Vec<DiscountSource>,
    /// Record runs in a ledger so a source is discounted at most once per day.
    ///
    /// Off by default, which keeps the compounding behavior described above.
    pub idempotent: bool,
    /// JSON file with catalog products and cart contents.
    pub seed_file: Option<PathBuf>,
    /// Name for logging
    pub name: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            days_ahead: 3,
            discount_percent: 10,
            poll_interval: Duration::from_secs(5),
            sources: vec![DiscountSource::Catalog, DiscountSource::Cart],
            idempotent: false,
            seed_file: None,
            name: "discount-runner".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Read `SHELFWISE_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup(ENV_DAYS_AHEAD) {
            config.days_ahead = parse_int(ENV_DAYS_AHEAD, &v)?;
        }
        if let Some(v) = lookup(ENV_DISCOUNT_PERCENT) {
            config.discount_percent = parse_int(ENV_DISCOUNT_PERCENT, &v)?;
        }
        if let Some(v) = lookup(ENV_POLL_INTERVAL_SECS) {
            let secs: u64 = v
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(ENV_POLL_INTERVAL_SECS, &v, format!("{e}")))?;
            if secs == 0 {
                return Err(ConfigError::invalid(ENV_POLL_INTERVAL_SECS, &v, "must be positive"));
            }
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(v) = lookup(ENV_SOURCES) {
            config.sources = parse_sources(&v)?;
        }
        if let Some(v) = lookup(ENV_IDEMPOTENT) {
            config.idempotent = parse_bool(ENV_IDEMPOTENT, &v)?;
        }
        if let Some(v) = lookup(ENV_SEED_FILE) {
            if !v.trim().is_empty() {
                config.seed_file = Some(PathBuf::from(v.trim()));
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject discount inputs the applicator would refuse on every tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        LookaheadDays::new(self.days_ahead)
            .map_err(|e| ConfigError::invalid(ENV_DAYS_AHEAD, self.days_ahead.to_string(), e.to_string()))?;
        DiscountPercent::new(self.discount_percent).map_err(|e| {
            ConfigError::invalid(ENV_DISCOUNT_PERCENT, self.discount_percent.to_string(), e.to_string())
        })?;
        Ok(())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_discount(mut self, days_ahead: i64, discount_percent: i64) -> Self {
        self.days_ahead = days_ahead;
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_sources(mut self, sources: Vec<DiscountSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_idempotent(mut self, idempotent: bool) -> Self {
        self.idempotent = idempotent;
        self
    }
}

fn parse_int(key: &'static str, value: &str) -> Result<i64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(key, value, format!("{e}")))
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "expected a boolean")),
    }
}

fn parse_sources(value: &str) -> Result<Vec<DiscountSource>, ConfigError> {
    let mut sources = Vec::new();
    for part in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let source = match part.to_ascii_lowercase().as_str() {
            "catalog" => DiscountSource::Catalog,
            "cart" => DiscountSource::Cart,
            other => {
                return Err(ConfigError::invalid(ENV_SOURCES, value, format!("unknown source {other:?}")));
            }
        };
        if !sources.contains(&source) {
            sources.push(source);
        }
    }
    if sources.is_empty() {
        return Err(ConfigError::invalid(ENV_SOURCES, value, "no sources listed"));
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<WorkerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WorkerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(load(&[]).unwrap(), WorkerConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = load(&[
            (ENV_DAYS_AHEAD, "7"),
            (ENV_DISCOUNT_PERCENT, " 25 "),
            (ENV_POLL_INTERVAL_SECS, "30"),
            (ENV_SOURCES, "cart"),
            (ENV_IDEMPOTENT, "yes"),
            (ENV_SEED_FILE, "/tmp/seed.json"),
        ])
        .unwrap();

        assert_eq!(config.days_ahead, 7);
        assert_eq!(config.discount_percent, 25);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.sources, vec![DiscountSource::Cart]);
        assert!(config.idempotent);
        assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/seed.json")));
    }

    #[test]
    fn rejects_out_of_range_discount() {
        match load(&[(ENV_DISCOUNT_PERCENT, "150")]).unwrap_err() {
            ConfigError::Invalid { key, .. } => assert_eq!(key, ENV_DISCOUNT_PERCENT),
        }
        match load(&[(ENV_DAYS_AHEAD, "-2")]).unwrap_err() {
            ConfigError::Invalid { key, .. } => assert_eq!(key, ENV_DAYS_AHEAD),
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(load(&[(ENV_DAYS_AHEAD, "soon")]).is_err());
        assert!(load(&[(ENV_POLL_INTERVAL_SECS, "0")]).is_err());
        assert!(load(&[(ENV_IDEMPOTENT, "maybe")]).is_err());
        assert!(load(&[(ENV_SOURCES, "warehouse")]).is_err());
        assert!(load(&[(ENV_SOURCES, " , ")]).is_err());
    }

    #[test]
    fn source_list_is_deduplicated_in_order() {
        let config = load(&[(ENV_SOURCES, "cart, catalog, cart")]).unwrap();
        assert_eq!(config.sources, vec![DiscountSource::Cart, DiscountSource::Catalog]);
    }
}
