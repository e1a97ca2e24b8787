//! Configuration for the recall engine.
//!
//! Every section deserializes with `#[serde(default)]` so a partial TOML
//! file overrides only the fields it names.

mod cache_config;
mod hedge_config;
mod locality_config;
mod ranking_config;

pub mod defaults;

pub use cache_config::CacheConfig;
pub use hedge_config::HedgeConfig;
pub use locality_config::LocalityConfig;
pub use ranking_config::RankingConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, EngramResult};

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngramConfig {
    pub cache: CacheConfig,
    pub ranking: RankingConfig,
    pub locality: LocalityConfig,
    pub hedge: HedgeConfig,
}

impl EngramConfig {
    /// Parse a TOML document, filling unnamed fields with defaults.
    pub fn from_toml(input: &str) -> EngramResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Sanity-check cross-field constraints.
    pub fn validate(&self) -> EngramResult<()> {
        if self.cache.pheromone_min >= self.cache.pheromone_max {
            return Err(ConfigError::Invalid {
                field: "cache.pheromone_min",
                reason: format!(
                    "must be below pheromone_max ({} >= {})",
                    self.cache.pheromone_min, self.cache.pheromone_max
                ),
            }
            .into());
        }
        if self.cache.pheromone_initial <= self.cache.pheromone_min
            || self.cache.pheromone_initial > self.cache.pheromone_max
        {
            return Err(ConfigError::Invalid {
                field: "cache.pheromone_initial",
                reason: "must lie strictly above pheromone_min and at or below pheromone_max"
                    .to_string(),
            }
            .into());
        }
        if self.locality.bits_per_dimension == 0 || self.locality.bits_per_dimension > 16 {
            return Err(ConfigError::Invalid {
                field: "locality.bits_per_dimension",
                reason: "must be in 1..=16".to_string(),
            }
            .into());
        }
        if self.locality.key_bits == 0 || self.locality.key_bits > 63 {
            return Err(ConfigError::Invalid {
                field: "locality.key_bits",
                reason: "must be in 1..=63".to_string(),
            }
            .into());
        }
        let interleaved =
            u64::from(self.locality.bits_per_dimension) * self.locality.max_dimensions as u64;
        if interleaved > u64::from(self.locality.key_bits) {
            return Err(ConfigError::Invalid {
                field: "locality.max_dimensions",
                reason: format!(
                    "bits_per_dimension * max_dimensions ({interleaved}) exceeds key_bits ({})",
                    self.locality.key_bits
                ),
            }
            .into());
        }
        Ok(())
    }
}
