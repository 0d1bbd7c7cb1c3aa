//! Shuffle configuration

use crate::error::{Result, ShuffleError};

/// Default initial window, in records
pub const DEFAULT_WINDOW_MIN: usize = 1024;

/// Default multiplicative capacity growth applied on every overflow
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Configuration for a [`StreamShuffler`](crate::StreamShuffler)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ShuffleConfig {
    /// Initial buffer capacity
    pub window_min: usize,
    /// Upper bound on capacity growth (None = unbounded)
    pub window_max: Option<usize>,
    /// Capacity multiplier applied after each overflow
    pub growth_factor: usize,
    /// Seed for reproducible output (None = seed from OS entropy)
    pub seed: Option<u64>,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            window_min: DEFAULT_WINDOW_MIN,
            window_max: None,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            seed: None,
        }
    }
}

impl ShuffleConfig {
    /// Configuration with the given initial window and defaults elsewhere
    pub fn with_window_min(window_min: usize) -> Self {
        Self {
            window_min,
            ..Self::default()
        }
    }

    /// Create a builder
    pub fn builder() -> ShuffleConfigBuilder {
        ShuffleConfigBuilder::default()
    }

    /// Check every field, returning the first violation found
    pub fn validate(&self) -> Result<()> {
        if self.window_min == 0 {
            return Err(ShuffleError::invalid(
                "window_min must be a positive integer",
            ));
        }
        if self.growth_factor < 2 {
            return Err(ShuffleError::invalid(format!(
                "growth_factor must be at least 2, got {}",
                self.growth_factor
            )));
        }
        if let Some(max) = self.window_max {
            if self.window_min > max {
                return Err(ShuffleError::invalid(format!(
                    "window_min ({}) cannot be greater than window_max ({})",
                    self.window_min, max
                )));
            }
        }
        Ok(())
    }

    /// Capacity that follows `current` after one overflow
    pub(crate) fn grow(&self, current: usize) -> usize {
        let next = current.saturating_mul(self.growth_factor);
        match self.window_max {
            Some(max) => next.min(max),
            None => next,
        }
    }
}

/// Builder for [`ShuffleConfig`]
#[derive(Debug, Default)]
pub struct ShuffleConfigBuilder {
    config: ShuffleConfig,
}

impl ShuffleConfigBuilder {
    /// Set the initial window
    pub fn window_min(mut self, window_min: usize) -> Self {
        self.config.window_min = window_min;
        self
    }

    /// Cap capacity growth
    pub fn window_max(mut self, window_max: Option<usize>) -> Self {
        self.config.window_max = window_max;
        self
    }

    /// Set the growth factor
    pub fn growth_factor(mut self, growth_factor: usize) -> Self {
        self.config.growth_factor = growth_factor;
        self
    }

    /// Fix the random seed
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ShuffleConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
