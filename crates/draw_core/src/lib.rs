//! # draw_core - Swiss-format league phase draw engine
//!
//! Draws a schedule for a roster split into pots: every team gets the same
//! number of opponents from each pot, never meets a compatriot, and faces
//! at most a capped number of teams from any large country.
//!
//! ## Pipeline
//! - [`registry`]: roster → dense ids and pot/country indices
//! - [`state`]: per-team counters with an undo log
//! - [`evaluator`]: legal candidates with one-step deadlock lookahead
//! - [`transaction`]: fill one team's schedule, all or nothing
//! - [`orchestrator`]: pot-by-pot driver with whole-draw restarts
//!
//! ```rust
//! use draw_core::{presets, run_full_draw, DrawConfig};
//!
//! let roster = presets::league_phase_2025_26();
//! let config = DrawConfig::seeded(2025).with_max_retries(50);
//! if let Ok(outcome) = run_full_draw(&roster, &config) {
//!     assert_eq!(outcome.matchups["Celtic"].len(), 8);
//! }
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod orchestrator;
pub mod presets;
pub mod registry;
pub mod state;
pub mod transaction;
pub mod verify;

#[cfg(test)]
mod test_fixtures;

pub use config::{DrawConfig, DrawRules};
pub use error::{DrawError, Result};
pub use evaluator::{evaluate_candidates, Candidate};
pub use orchestrator::{run_full_draw, DrawEngine, DrawOutcome, DrawResult, Matchups};
pub use registry::{CountryId, TeamId, TeamRecord, TeamRegistry};
pub use state::{DrawState, UndoLog};
pub use transaction::{assign_opponents, Infeasible};
pub use verify::{verify_matchups, verify_opponents, Violation};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
