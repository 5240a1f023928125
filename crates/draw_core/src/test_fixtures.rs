//! Shared rosters and state builders for unit tests.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::DrawRules;
use crate::registry::{TeamRecord, TeamRegistry};
use crate::state::{DrawState, UndoLog};

/// 4 pots × 9 teams. Every team has its own country except one trio
/// ("Utopia") spread over pots 1-3.
pub(crate) fn unique_roster() -> Vec<TeamRecord> {
    let mut records = Vec::with_capacity(36);
    for pot in 1..=4u8 {
        for i in 1..=9 {
            let country = if i == 1 && pot < 4 {
                "Utopia".to_string()
            } else {
                format!("Country {pot}-{i}")
            };
            records.push(TeamRecord::new(format!("Club {pot}-{i}"), country, pot));
        }
    }
    records
}

/// `unique_roster` with the last pot-4 team removed.
pub(crate) fn short_pot_roster() -> Vec<TeamRecord> {
    let mut records = unique_roster();
    records.pop();
    records
}

pub(crate) fn single_country_roster() -> Vec<TeamRecord> {
    unique_roster()
        .into_iter()
        .map(|r| TeamRecord::new(r.name, "Monoland", r.pot))
        .collect()
}

/// Two pots, one opponent from each.
pub(crate) fn square_rules() -> DrawRules {
    DrawRules { pots: 2, per_pot: 1, ..DrawRules::default() }
}

/// P and S share a country, so P must face R and Q must face S.
pub(crate) fn square_roster() -> Vec<TeamRecord> {
    vec![
        TeamRecord::new("P", "Spain", 1),
        TeamRecord::new("Q", "France", 1),
        TeamRecord::new("R", "Italy", 2),
        TeamRecord::new("S", "Spain", 2),
    ]
}

/// Two pot-1 teams against three pot-2 teams: never drawable under
/// `square_rules`. Q can take P from pot 1 but then finds every pot-2
/// opponent unsafe.
pub(crate) fn lopsided_roster() -> Vec<TeamRecord> {
    vec![
        TeamRecord::new("P", "Spain", 1),
        TeamRecord::new("Q", "France", 1),
        TeamRecord::new("R", "Italy", 2),
        TeamRecord::new("S", "Spain", 2),
        TeamRecord::new("T", "Spain", 2),
    ]
}

/// Apply up to `steps` random legal pairings to a fresh state.
pub(crate) fn random_reachable_state(
    registry: &TeamRegistry,
    rules: DrawRules,
    seed: u64,
    steps: usize,
) -> DrawState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = DrawState::new(registry, rules);
    let mut log = UndoLog::new();
    let teams: Vec<_> = registry.ids().collect();

    for _ in 0..steps {
        let Some(&team) = teams.choose(&mut rng) else { break };
        let legal: Vec<_> =
            registry.ids().filter(|&other| state.is_legal(registry, team, other)).collect();
        if let Some(&opponent) = legal.choose(&mut rng) {
            state.pair(registry, team, opponent, &mut log);
        }
    }
    log.commit();
    state
}
