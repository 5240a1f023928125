//! Draw orchestration
//!
//! Drives every team through its assignment transaction, pot 1 to pot N,
//! roster order within a pot. Any team failing aborts the attempt; the next
//! attempt starts again from an empty schedule. There is no backtracking
//! across teams, only whole restarts up to `max_retries`.

use std::collections::{BTreeMap, BTreeSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DrawConfig;
use crate::error::{DrawError, Result};
use crate::registry::{TeamId, TeamRecord, TeamRegistry};
use crate::state::DrawState;
use crate::transaction::{assign_opponents, Infeasible};
use crate::verify::verify_opponents;

/// Team name → opponent names.
pub type Matchups = BTreeMap<String, BTreeSet<String>>;

/// A completed schedule.
#[derive(Debug, Clone)]
pub struct DrawResult {
    state: DrawState,
    attempts: u32,
}

impl DrawResult {
    /// Attempt number that succeeded (1-based).
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Opponents of `team` in draw order.
    pub fn opponents(&self, team: TeamId) -> &[TeamId] {
        self.state.opponents(team)
    }

    pub fn opponent_lists(&self) -> Vec<Vec<TeamId>> {
        (0..self.state.team_count()).map(|t| self.state.opponents(t).to_vec()).collect()
    }

    /// Each fixture once, lower id first.
    pub fn pairs(&self) -> Vec<(TeamId, TeamId)> {
        let mut pairs: Vec<_> = (0..self.state.team_count())
            .flat_map(|a| self.state.opponents(a).iter().map(move |&b| (a, b)))
            .filter(|(a, b)| a < b)
            .collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn matchups(&self, registry: &TeamRegistry) -> Matchups {
        registry
            .ids()
            .map(|team| {
                let opponents =
                    self.opponents(team).iter().map(|&o| registry.name(o).to_string()).collect();
                (registry.name(team).to_string(), opponents)
            })
            .collect()
    }
}

pub struct DrawEngine<'a> {
    registry: &'a TeamRegistry,
    config: &'a DrawConfig,
}

impl<'a> DrawEngine<'a> {
    pub fn new(registry: &'a TeamRegistry, config: &'a DrawConfig) -> Result<Self> {
        config.validate()?;
        if registry.pot_count() != config.rules.pots {
            return Err(DrawError::InvalidConfig(format!(
                "registry has {} pots, rules expect {}",
                registry.pot_count(),
                config.rules.pots
            )));
        }
        Ok(Self { registry, config })
    }

    /// Run attempts until one completes or `max_retries` is spent.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DrawResult> {
        self.run_observed(rng, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `on_attempt` with the attempt number
    /// and the fresh state before each pass starts.
    pub fn run_observed<R, F>(&self, rng: &mut R, mut on_attempt: F) -> Result<DrawResult>
    where
        R: Rng + ?Sized,
        F: FnMut(u32, &DrawState),
    {
        let max_retries = self.config.max_retries;
        info!(teams = self.registry.len(), max_retries, "starting draw");

        for attempt in 1..=max_retries {
            let state = DrawState::new(self.registry, self.config.rules);
            on_attempt(attempt, &state);

            match self.attempt(state, rng) {
                Ok(state) => {
                    info!(attempt, "draw complete");
                    return Ok(DrawResult { state, attempts: attempt });
                }
                Err((team, reason)) => {
                    debug!(attempt, team = self.registry.name(team), %reason, "attempt failed, restarting");
                }
            }
        }

        warn!(max_retries, "draw exhausted");
        Err(DrawError::Exhausted { attempts: max_retries })
    }

    /// One pass over every pot, starting from `state`.
    fn attempt<R: Rng + ?Sized>(
        &self,
        mut state: DrawState,
        rng: &mut R,
    ) -> std::result::Result<DrawState, (TeamId, Infeasible)> {
        for pot in self.config.rules.pot_numbers() {
            for &team in self.registry.pot_members(pot) {
                // Filled as a side effect of earlier teams' draws
                if state.is_complete(team) {
                    continue;
                }
                assign_opponents(self.registry, &mut state, team, rng)
                    .map_err(|reason| (team, reason))?;
            }
        }

        Ok(state)
    }
}

/// Summary of a finished draw, ready for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    /// Seed that reproduces this draw
    pub seed: u64,
    pub attempts: u32,
    pub matchups: Matchups,
}

/// Build the registry, seed the RNG and run the draw.
///
/// When `config.seed` is `None` a seed is taken from the thread RNG and
/// reported in the outcome so the draw can be replayed.
pub fn run_full_draw(records: &[TeamRecord], config: &DrawConfig) -> Result<DrawOutcome> {
    config.validate()?;
    let registry = TeamRegistry::new(records, &config.rules)?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let result = DrawEngine::new(&registry, config)?.run(&mut rng)?;
    debug_assert!(
        verify_opponents(&registry, &config.rules, &result.opponent_lists()).is_empty(),
        "completed draw violates the rules"
    );

    Ok(DrawOutcome { seed, attempts: result.attempts(), matchups: result.matchups(&registry) })
}
