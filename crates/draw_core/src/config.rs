//! # Draw Configuration
//!
//! Tuning knobs for one draw. Defaults reproduce the 36-team league phase:
//! four pots, two opponents from each, at most two opponents from any one
//! country that has three or more entrants.
//!
//! ```rust
//! use draw_core::config::DrawConfig;
//!
//! let config = DrawConfig::default();
//! assert_eq!(config.rules.slots_per_team(), 8);
//!
//! let seeded = DrawConfig::seeded(7);
//! assert_eq!(seeded.seed, Some(7));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DrawError, Result};

/// Structural rules every team's schedule must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    /// Number of pots, numbered 1..=pots (default: 4)
    pub pots: u8,
    /// Opponents drawn from each pot (default: 2)
    pub per_pot: u8,
    /// Cap on opponents from a single constrained country (default: 2)
    pub max_per_country: u8,
    /// A country is constrained once it has more members than this (default: 2)
    pub constrained_threshold: usize,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self { pots: 4, per_pot: 2, max_per_country: 2, constrained_threshold: 2 }
    }
}

impl DrawRules {
    /// Total opponents per team.
    pub fn slots_per_team(&self) -> u8 {
        self.pots * self.per_pot
    }

    /// Pot numbers in draw order.
    pub fn pot_numbers(&self) -> impl Iterator<Item = u8> {
        1..=self.pots
    }
}

/// Settings for a full draw run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Full restarts allowed before the draw is declared exhausted (default: 10)
    pub max_retries: u32,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub rules: DrawRules,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self { max_retries: 10, seed: None, rules: DrawRules::default() }
    }
}

impl DrawConfig {
    /// Default rules with a fixed seed, for reproducible draws.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(DrawError::InvalidConfig("max_retries must be positive".into()));
        }
        if self.rules.pots == 0 {
            return Err(DrawError::InvalidConfig("pots must be positive".into()));
        }
        if self.rules.per_pot == 0 {
            return Err(DrawError::InvalidConfig("per_pot must be positive".into()));
        }
        if self.rules.max_per_country == 0 {
            return Err(DrawError::InvalidConfig("max_per_country must be positive".into()));
        }
        if self.rules.pots.checked_mul(self.rules.per_pot).is_none() {
            return Err(DrawError::InvalidConfig("pots * per_pot overflows".into()));
        }
        Ok(())
    }
}
