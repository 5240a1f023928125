//! Per-team assignment transaction
//!
//! Brings one team from its current partial schedule to a full one, pot by
//! pot. All pairings made for the team go through a single undo log: either
//! every one of them stays, or the state is restored exactly.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::evaluator::safe_candidates;
use crate::registry::{TeamId, TeamRegistry};
use crate::state::{DrawState, UndoLog};

/// Why a team's schedule could not be completed. Recovered by rollback,
/// then by restarting the attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Infeasible {
    #[error("no safe opponent for team #{team} in pot {pot}")]
    NoSafeCandidate { team: TeamId, pot: u8 },

    #[error("team #{team} has {available} open partners for {needed} open slots")]
    Deadlock { team: TeamId, available: usize, needed: u8 },
}

/// Fill every pot quota of `team`.
///
/// Returns the opponents added, in draw order. On failure the state is
/// exactly what it was on entry.
pub fn assign_opponents<R: Rng + ?Sized>(
    registry: &TeamRegistry,
    state: &mut DrawState,
    team: TeamId,
    rng: &mut R,
) -> Result<Vec<TeamId>, Infeasible> {
    let mut log = UndoLog::new();

    match fill_quotas(registry, state, team, rng, &mut log) {
        Ok(opponents) => {
            log.commit();
            Ok(opponents)
        }
        Err(reason) => {
            debug!(
                team = registry.name(team),
                reverted = log.len(),
                %reason,
                "rolling back assignment"
            );
            log.rollback(state);
            Err(reason)
        }
    }
}

fn fill_quotas<R: Rng + ?Sized>(
    registry: &TeamRegistry,
    state: &mut DrawState,
    team: TeamId,
    rng: &mut R,
    log: &mut UndoLog,
) -> Result<Vec<TeamId>, Infeasible> {
    let rules = *state.rules();
    let mut opponents = Vec::with_capacity(state.remaining(team) as usize);

    for pot in rules.pot_numbers() {
        while state.pot_count(team, pot) < rules.per_pot {
            let safe = safe_candidates(registry, state, team, pot);
            let &opponent = safe.choose(rng).ok_or(Infeasible::NoSafeCandidate { team, pot })?;

            state.pair(registry, team, opponent, log);
            opponents.push(opponent);
        }
    }

    // Final sweep only looks at open slots and country clashes, not quotas
    if let Some((starved, available)) = state.find_starved(registry, DrawState::open_partner_count)
    {
        return Err(Infeasible::Deadlock {
            team: starved,
            available,
            needed: state.remaining(starved),
        });
    }

    Ok(opponents)
}
