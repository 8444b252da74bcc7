//! Runtime configuration for partition generation.
//!
//! The only tunables are on the pooled path: when a traversal rents its
//! buffer from the shared pool instead of allocating it, and how many idle
//! buffers the pool retains. Neither affects the partitions produced.

use std::sync::OnceLock;

/// Global configuration, initialized on first use.
static GLOBAL_CONFIG: OnceLock<AddendsConfig> = OnceLock::new();

/// Default part count above which buffers are rented from the pool.
pub const DEFAULT_POOL_THRESHOLD: usize = 128;

/// Default number of idle buffers kept per buffer length.
pub const DEFAULT_MAX_POOLED_PER_SIZE: usize = 16;

/// Configuration for buffered partition enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddendsConfig {
    /// Traversals with `count` above this rent their buffer from the pool;
    /// smaller ones allocate a fresh buffer.
    pub pool_threshold: usize,

    /// Maximum number of idle buffers the shared pool keeps per length.
    pub max_pooled_per_size: usize,
}

impl Default for AddendsConfig {
    fn default() -> Self {
        Self {
            pool_threshold: DEFAULT_POOL_THRESHOLD,
            max_pooled_per_size: DEFAULT_MAX_POOLED_PER_SIZE,
        }
    }
}

impl AddendsConfig {
    /// Whether a traversal producing `count` addends should use the pool.
    #[inline]
    pub fn should_pool(&self, count: usize) -> bool {
        count > self.pool_threshold
    }
}

/// Builder for customizing the configuration.
pub struct AddendsConfigBuilder {
    config: AddendsConfig,
}

impl AddendsConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: AddendsConfig::default(),
        }
    }

    /// Set the part count above which buffers are pooled
    pub fn pool_threshold(mut self, threshold: usize) -> Self {
        self.config.pool_threshold = threshold;
        self
    }

    /// Set how many idle buffers are kept per length
    pub fn max_pooled_per_size(mut self, max: usize) -> Self {
        self.config.max_pooled_per_size = max;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AddendsConfig {
        self.config
    }
}

impl Default for AddendsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the global configuration.
pub fn get_config() -> &'static AddendsConfig {
    GLOBAL_CONFIG.get_or_init(AddendsConfig::default)
}

/// Set the global configuration.
///
/// Only the first call (before any use of [`get_config`]) succeeds; later
/// calls hand the rejected configuration back.
pub fn set_config(config: AddendsConfig) -> Result<(), AddendsConfig> {
    GLOBAL_CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AddendsConfig::default();
        assert_eq!(config.pool_threshold, 128);
        assert_eq!(config.max_pooled_per_size, 16);
        assert!(!config.should_pool(128));
        assert!(config.should_pool(129));
    }

    #[test]
    fn test_builder() {
        let config = AddendsConfigBuilder::new()
            .pool_threshold(4)
            .max_pooled_per_size(2)
            .build();

        assert_eq!(config.pool_threshold, 4);
        assert_eq!(config.max_pooled_per_size, 2);
        assert!(config.should_pool(5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde() {
        let config = AddendsConfigBuilder::new().pool_threshold(64).build();
        let json = serde_json::to_string(&config).unwrap();
        let restored: AddendsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_global_config_is_stable() {
        let first = get_config();
        let second = get_config();
        assert!(std::ptr::eq(first, second));
        assert!(set_config(AddendsConfig::default()).is_err());
    }
}
