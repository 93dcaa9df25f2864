//! Routing configuration.
//!
//! Defaults can be overridden from the environment (or a `.env` file):
//!
//! ```bash
//! WAYPATH_AVERAGE_SPEED_KMH=50
//! WAYPATH_MAX_SEARCH_DISTANCE=500
//! WAYPATH_YIELD_INTERVAL=1000
//! WAYPATH_PROFILE=shortest
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 50.0;
pub const DEFAULT_MAX_SEARCH_DISTANCE: f64 = 500.0;
pub const DEFAULT_YIELD_INTERVAL: usize = 1_000;

/// The vehicle profile used when snapping coordinates onto the network.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Prefer the physically shortest route.
    #[default]
    Shortest,

    /// Prefer the quickest route.
    Fastest,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} could not be parsed from {value:?}")]
    Unparsable { key: &'static str, value: String },

    #[error("{key} must be positive, was {value}")]
    NotPositive { key: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Average travel speed used to estimate a route's duration.
    pub average_speed_kmh: f64,

    /// How far from a query coordinate the resolver may snap, in meters.
    pub max_search_distance: f64,

    /// Node expansions between two cooperative checkpoints.
    pub yield_interval: usize,

    pub profile: Profile,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            max_search_distance: DEFAULT_MAX_SEARCH_DISTANCE,
            yield_interval: DEFAULT_YIELD_INTERVAL,
            profile: Profile::default(),
        }
    }
}

impl RouteConfig {
    pub const AVERAGE_SPEED_KEY: &'static str = "WAYPATH_AVERAGE_SPEED_KMH";
    pub const MAX_SEARCH_DISTANCE_KEY: &'static str = "WAYPATH_MAX_SEARCH_DISTANCE";
    pub const YIELD_INTERVAL_KEY: &'static str = "WAYPATH_YIELD_INTERVAL";
    pub const PROFILE_KEY: &'static str = "WAYPATH_PROFILE";

    /// Loads a `.env` file if one is present, then reads any overrides
    /// from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing `.env` is not an error, the environment may be set directly.
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup, falling back
    /// to the defaults for every absent key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            average_speed_kmh: parse(&lookup, Self::AVERAGE_SPEED_KEY)?
                .unwrap_or(defaults.average_speed_kmh),
            max_search_distance: parse(&lookup, Self::MAX_SEARCH_DISTANCE_KEY)?
                .unwrap_or(defaults.max_search_distance),
            yield_interval: parse(&lookup, Self::YIELD_INTERVAL_KEY)?
                .unwrap_or(defaults.yield_interval),
            profile: parse(&lookup, Self::PROFILE_KEY)?.unwrap_or(defaults.profile),
        };

        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        positive(Self::AVERAGE_SPEED_KEY, self.average_speed_kmh)?;
        positive(Self::MAX_SEARCH_DISTANCE_KEY, self.max_search_distance)?;
        positive(Self::YIELD_INTERVAL_KEY, self.yield_interval as f64)?;

        Ok(self)
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        Self { profile, ..self }
    }

    pub fn with_average_speed(self, average_speed_kmh: f64) -> Self {
        Self {
            average_speed_kmh,
            ..self
        }
    }

    pub fn with_yield_interval(self, yield_interval: usize) -> Self {
        Self {
            yield_interval,
            ..self
        }
    }

    pub fn with_max_search_distance(self, max_search_distance: f64) -> Self {
        Self {
            max_search_distance,
            ..self
        }
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::Unparsable { key, value })
        })
        .transpose()
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { key, value })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = RouteConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config, RouteConfig::default());
        assert_eq!(config.average_speed_kmh, 50.0);
        assert_eq!(config.yield_interval, 1_000);
        assert_eq!(config.profile, Profile::Shortest);
    }

    #[test]
    fn overrides_are_applied() {
        let config = RouteConfig::from_lookup(lookup(&[
            (RouteConfig::AVERAGE_SPEED_KEY, "30"),
            (RouteConfig::YIELD_INTERVAL_KEY, " 64 "),
            (RouteConfig::PROFILE_KEY, "Fastest"),
        ]))
        .expect("overrides are valid");

        assert_eq!(config.average_speed_kmh, 30.0);
        assert_eq!(config.yield_interval, 64);
        assert_eq!(config.profile, Profile::Fastest);
        assert_eq!(config.max_search_distance, DEFAULT_MAX_SEARCH_DISTANCE);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            RouteConfig::from_lookup(lookup(&[(RouteConfig::PROFILE_KEY, "scenic")])),
            Err(ConfigError::Unparsable {
                key: RouteConfig::PROFILE_KEY,
                value: "scenic".to_string(),
            })
        );

        assert!(matches!(
            RouteConfig::from_lookup(lookup(&[(RouteConfig::AVERAGE_SPEED_KEY, "0")])),
            Err(ConfigError::NotPositive { .. })
        ));

        assert!(matches!(
            RouteConfig::from_lookup(lookup(&[(RouteConfig::YIELD_INTERVAL_KEY, "-3")])),
            Err(ConfigError::Unparsable { .. })
        ));
    }

    #[test]
    fn profile_names() {
        assert_eq!(Profile::Fastest.to_string(), "fastest");
        assert_eq!("shortest".parse::<Profile>(), Ok(Profile::Shortest));
    }
}
