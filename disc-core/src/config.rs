use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::course_validation::{MAX_PAR, MIN_PAR};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub courses_collection: String,
    pub rounds_collection: String,
    pub practice_collection: String,
    pub default_hole_distance: f64,
    pub default_hole_par: u8,
}

impl TrackerConfig {
    /// Read overrides from `DISC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            courses_collection: lookup("DISC_COURSES_COLLECTION")
                .unwrap_or(defaults.courses_collection),
            rounds_collection: lookup("DISC_ROUNDS_COLLECTION")
                .unwrap_or(defaults.rounds_collection),
            practice_collection: lookup("DISC_PRACTICE_COLLECTION")
                .unwrap_or(defaults.practice_collection),
            default_hole_distance: parse_checked(
                &lookup,
                "DISC_DEFAULT_HOLE_DISTANCE",
                defaults.default_hole_distance,
                |d: &f64| d.is_finite() && *d > 0.0,
            )?,
            default_hole_par: parse_checked(
                &lookup,
                "DISC_DEFAULT_HOLE_PAR",
                defaults.default_hole_par,
                |p: &u8| (MIN_PAR..=MAX_PAR).contains(&i64::from(*p)),
            )?,
        })
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            courses_collection: "courses".to_string(),
            rounds_collection: "completedRounds".to_string(),
            practice_collection: "practiceStats".to_string(),
            default_hole_distance: 250.0,
            default_hole_par: 3,
        }
    }
}

/// Parse `key` if set, rejecting values a new hole could not be saved with.
fn parse_checked<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> Result<T, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    match value.trim().parse() {
        Ok(parsed) if valid(&parsed) => Ok(parsed),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.rounds_collection, "completedRounds");
        assert_eq!(config.default_hole_par, 3);
    }

    #[test]
    fn test_overrides() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            ("DISC_COURSES_COLLECTION", "courses_v2"),
            ("DISC_DEFAULT_HOLE_DISTANCE", "300.5"),
            ("DISC_DEFAULT_HOLE_PAR", " 4 "),
        ]))
        .unwrap();

        assert_eq!(config.courses_collection, "courses_v2");
        assert_eq!(config.default_hole_distance, 300.5);
        assert_eq!(config.default_hole_par, 4);
    }

    #[test]
    fn test_invalid_value() {
        let err = TrackerConfig::from_lookup(lookup_from(&[("DISC_DEFAULT_HOLE_PAR", "three")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "DISC_DEFAULT_HOLE_PAR",
                value: "three".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_range_hole_defaults() {
        for (key, value) in [
            ("DISC_DEFAULT_HOLE_PAR", "9"),
            ("DISC_DEFAULT_HOLE_PAR", "0"),
            ("DISC_DEFAULT_HOLE_DISTANCE", "-1"),
            ("DISC_DEFAULT_HOLE_DISTANCE", "0"),
            ("DISC_DEFAULT_HOLE_DISTANCE", "inf"),
        ] {
            let err = TrackerConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidValue {
                    key,
                    value: value.to_string()
                }
            );
        }

        let config = TrackerConfig::from_lookup(lookup_from(&[("DISC_DEFAULT_HOLE_PAR", "7")])).unwrap();
        assert_eq!(config.default_hole_par, 7);
    }
}
