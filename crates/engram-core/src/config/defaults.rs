//! Default values shared by the config sections.

// Cache
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.58;
pub const DEFAULT_HIT_BOOST: f64 = 0.15;
pub const DEFAULT_EVAP_RATE: f64 = 0.05;
pub const DEFAULT_PHEROMONE_MIN: f64 = 0.0;
pub const DEFAULT_PHEROMONE_MAX: f64 = 1.0;
pub const DEFAULT_PHEROMONE_INITIAL: f64 = 0.5;
pub const DEFAULT_MAX_TOKENS: usize = 8_000;
pub const DEFAULT_MAX_ITEMS: usize = 512;
pub const DEFAULT_EVAPORATION_INTERVAL_SECS: u64 = 300;

// Ranking
pub const DEFAULT_FTS_WEIGHT: f64 = 0.4;
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.4;
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.2;
pub const DEFAULT_VECTOR_MIN_SCORE: f64 = 0.3;
pub const DEFAULT_VECTOR_CANDIDATES: usize = 64;
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

// Locality
pub const DEFAULT_BITS_PER_DIMENSION: u8 = 4;
pub const DEFAULT_MAX_DIMENSIONS: usize = 8;
pub const DEFAULT_KEY_BITS: u8 = 32;
pub const DEFAULT_RANGE_RADIUS: u64 = 4_096;

// Hedge
pub const DEFAULT_HEDGE_DELAY_MS: u64 = 120;
pub const DEFAULT_HEDGE_MIN_DELAY_MS: u64 = 25;
pub const DEFAULT_LATENCY_WINDOW: usize = 64;
