use serde::{Deserialize, Serialize};

use super::defaults;

/// Locality prefilter configuration.
///
/// `bits_per_dimension * max_dimensions` should stay within `key_bits` —
/// config validation enforces it — but the key derivation masks to
/// `key_bits` unconditionally as a safety net.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalityConfig {
    /// Quantization width per embedding dimension.
    pub bits_per_dimension: u8,
    /// Number of leading embedding dimensions interleaved into the key.
    pub max_dimensions: usize,
    /// Storage width of the locality key.
    pub key_bits: u8,
    /// Half-width of the range queried around a query key.
    pub range_radius: u64,
}

impl Default for LocalityConfig {
    fn default() -> Self {
        Self {
            bits_per_dimension: defaults::DEFAULT_BITS_PER_DIMENSION,
            max_dimensions: defaults::DEFAULT_MAX_DIMENSIONS,
            key_bits: defaults::DEFAULT_KEY_BITS,
            range_radius: defaults::DEFAULT_RANGE_RADIUS,
        }
    }
}
