use crate::logging::LogLevel;
use crate::motion::visibility::{RootMargin, VisibilityConfig};
use thiserror::Error;

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.2;
const DEFAULT_REVEAL_ROOT_MARGIN: &str = "0px 0px -10% 0px";
const DEFAULT_AUTOPLAY_DWELL_MS: u64 = 5_000;
const DEFAULT_TYPING_INTERVAL_MS: u64 = 28;
const DEFAULT_SEARCH_DEMO_MAX_CYCLES: u64 = 12;

const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const AUTOPLAY_DWELL_MS_BOUNDS: (u64, u64) = (500, 60_000);
const TYPING_INTERVAL_MS_BOUNDS: (u64, u64) = (5, 500);
const SEARCH_DEMO_MAX_CYCLES_BOUNDS: (u64, u64) = (1, 1_000);

pub const GATE_PASSWORD_KEY: &str = "PORTFOLIO_GATE_PASSWORD";
pub const LOG_LEVEL_KEY: &str = "PORTFOLIO_LOG_LEVEL";
pub const REVEAL_THRESHOLD_KEY: &str = "PORTFOLIO_REVEAL_THRESHOLD";
pub const REVEAL_ROOT_MARGIN_KEY: &str = "PORTFOLIO_REVEAL_ROOT_MARGIN";
pub const AUTOPLAY_DWELL_MS_KEY: &str = "PORTFOLIO_AUTOPLAY_DWELL_MS";
pub const TYPING_INTERVAL_MS_KEY: &str = "PORTFOLIO_TYPING_INTERVAL_MS";
pub const SEARCH_DEMO_MAX_CYCLES_KEY: &str = "PORTFOLIO_SEARCH_DEMO_MAX_CYCLES";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not a valid value: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key}={value} is outside {min}..={max}")]
    OutOfBounds {
        key: &'static str,
        value: String,
        min: String,
        max: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub gate_password: Option<String>,
    pub log_level: LogLevel,
    pub reveal: VisibilityConfig,
    pub autoplay_dwell_ms: u64,
    pub typing_interval_ms: u64,
    pub search_demo_max_cycles: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl SiteConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let gate_password = parse_non_empty_string(&lookup, GATE_PASSWORD_KEY);
        let log_level = parse_non_empty_string(&lookup, LOG_LEVEL_KEY)
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);
        let threshold = parse_f64_with_bounds(
            &lookup,
            REVEAL_THRESHOLD_KEY,
            DEFAULT_REVEAL_THRESHOLD,
            REVEAL_THRESHOLD_BOUNDS,
        );
        let root_margin = parse_non_empty_string(&lookup, REVEAL_ROOT_MARGIN_KEY)
            .and_then(|value| RootMargin::parse(&value).ok())
            .unwrap_or_else(default_root_margin);
        let autoplay_dwell_ms = parse_u64_with_bounds(
            &lookup,
            AUTOPLAY_DWELL_MS_KEY,
            DEFAULT_AUTOPLAY_DWELL_MS,
            AUTOPLAY_DWELL_MS_BOUNDS,
        );
        let typing_interval_ms = parse_u64_with_bounds(
            &lookup,
            TYPING_INTERVAL_MS_KEY,
            DEFAULT_TYPING_INTERVAL_MS,
            TYPING_INTERVAL_MS_BOUNDS,
        );
        let search_demo_max_cycles = parse_u64_with_bounds(
            &lookup,
            SEARCH_DEMO_MAX_CYCLES_KEY,
            DEFAULT_SEARCH_DEMO_MAX_CYCLES,
            SEARCH_DEMO_MAX_CYCLES_BOUNDS,
        ) as u32;

        Self {
            gate_password,
            log_level,
            reveal: VisibilityConfig {
                threshold,
                root_margin,
            },
            autoplay_dwell_ms,
            typing_interval_ms,
            search_demo_max_cycles,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Values baked in by the bundler at compile time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(build_env)
    }
}

/// Numeric values that are set but unusable. `from_lookup` replaces each
/// of them with its default; this reports them so they can be logged.
pub fn rejected_values<F>(lookup: F) -> Vec<ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    [
        (AUTOPLAY_DWELL_MS_KEY, AUTOPLAY_DWELL_MS_BOUNDS),
        (TYPING_INTERVAL_MS_KEY, TYPING_INTERVAL_MS_BOUNDS),
        (SEARCH_DEMO_MAX_CYCLES_KEY, SEARCH_DEMO_MAX_CYCLES_BOUNDS),
    ]
    .into_iter()
    .filter_map(|(key, bounds)| {
        let value = parse_non_empty_string(&lookup, key)?;
        require_u64_in_bounds(key, &value, bounds).err()
    })
    .collect()
}

pub fn build_env(name: &str) -> Option<String> {
    let value = match name {
        GATE_PASSWORD_KEY => option_env!("PORTFOLIO_GATE_PASSWORD"),
        LOG_LEVEL_KEY => option_env!("PORTFOLIO_LOG_LEVEL"),
        REVEAL_THRESHOLD_KEY => option_env!("PORTFOLIO_REVEAL_THRESHOLD"),
        REVEAL_ROOT_MARGIN_KEY => option_env!("PORTFOLIO_REVEAL_ROOT_MARGIN"),
        AUTOPLAY_DWELL_MS_KEY => option_env!("PORTFOLIO_AUTOPLAY_DWELL_MS"),
        TYPING_INTERVAL_MS_KEY => option_env!("PORTFOLIO_TYPING_INTERVAL_MS"),
        SEARCH_DEMO_MAX_CYCLES_KEY => option_env!("PORTFOLIO_SEARCH_DEMO_MAX_CYCLES"),
        _ => None,
    };

    value.map(ToString::to_string)
}

fn default_root_margin() -> RootMargin {
    RootMargin::parse(DEFAULT_REVEAL_ROOT_MARGIN).unwrap_or_default()
}

fn parse_non_empty_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64_with_bounds<F>(lookup: &F, name: &str, default: u64, bounds: (u64, u64)) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds<F>(lookup: &F, name: &str, default: f64, bounds: (f64, f64)) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn require_u64_in_bounds(
    key: &'static str,
    value: &str,
    bounds: (u64, u64),
) -> Result<u64, ConfigError> {
    let parsed = value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid {
            key,
            value: value.to_string(),
        })?;

    if !(bounds.0..=bounds.1).contains(&parsed) {
        return Err(ConfigError::OutOfBounds {
            key,
            value: value.to_string(),
            min: bounds.0.to_string(),
            max: bounds.1.to_string(),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = SiteConfig::default();

        assert_eq!(config.gate_password, None);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.reveal.threshold, DEFAULT_REVEAL_THRESHOLD);
        assert_eq!(config.reveal.root_margin.to_css(), "0px 0px -10% 0px");
        assert_eq!(config.autoplay_dwell_ms, DEFAULT_AUTOPLAY_DWELL_MS);
        assert_eq!(config.search_demo_max_cycles, 12);
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            (REVEAL_THRESHOLD_KEY, "1.5"),
            (AUTOPLAY_DWELL_MS_KEY, "10"),
            (TYPING_INTERVAL_MS_KEY, "fast"),
            (REVEAL_ROOT_MARGIN_KEY, "1px 2px 3px 4px 5px"),
        ]));

        assert_eq!(config.reveal.threshold, DEFAULT_REVEAL_THRESHOLD);
        assert_eq!(config.autoplay_dwell_ms, DEFAULT_AUTOPLAY_DWELL_MS);
        assert_eq!(config.typing_interval_ms, DEFAULT_TYPING_INTERVAL_MS);
        assert_eq!(config.reveal.root_margin.to_css(), "0px 0px -10% 0px");
    }

    #[test]
    fn in_bounds_values_are_used() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            (GATE_PASSWORD_KEY, "  hunter2  "),
            (LOG_LEVEL_KEY, "debug"),
            (REVEAL_THRESHOLD_KEY, "0.5"),
            (SEARCH_DEMO_MAX_CYCLES_KEY, "3"),
        ]));

        assert_eq!(config.gate_password.as_deref(), Some("hunter2"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.reveal.threshold, 0.5);
        assert_eq!(config.search_demo_max_cycles, 3);
    }

    #[test]
    fn blank_password_disables_the_gate_secret() {
        let config = SiteConfig::from_lookup(lookup_from(&[(GATE_PASSWORD_KEY, "   ")]));
        assert_eq!(config.gate_password, None);
    }

    #[test]
    fn strict_parse_reports_the_offending_key() {
        let error = require_u64_in_bounds(AUTOPLAY_DWELL_MS_KEY, "99", AUTOPLAY_DWELL_MS_BOUNDS)
            .expect_err("below minimum");
        assert!(matches!(error, ConfigError::OutOfBounds { key, .. } if key == AUTOPLAY_DWELL_MS_KEY));

        let error = require_u64_in_bounds(AUTOPLAY_DWELL_MS_KEY, "abc", AUTOPLAY_DWELL_MS_BOUNDS)
            .expect_err("not a number");
        assert_eq!(error.to_string(), "PORTFOLIO_AUTOPLAY_DWELL_MS is not a valid value: \"abc\"");
    }

    #[test]
    fn rejected_values_lists_only_set_and_unusable_numbers() {
        let lookup = lookup_from(&[
            (AUTOPLAY_DWELL_MS_KEY, "10"),
            (TYPING_INTERVAL_MS_KEY, "40"),
            (SEARCH_DEMO_MAX_CYCLES_KEY, "forever"),
        ]);

        let rejected = rejected_values(&lookup);
        assert_eq!(rejected.len(), 2);
        assert!(matches!(&rejected[0], ConfigError::OutOfBounds { key, min, .. }
            if *key == AUTOPLAY_DWELL_MS_KEY && min == "500"));
        assert!(matches!(&rejected[1], ConfigError::Invalid { key, .. } if *key == SEARCH_DEMO_MAX_CYCLES_KEY));

        assert!(rejected_values(|_| None).is_empty());
    }
}
