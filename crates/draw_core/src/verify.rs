//! Post-draw validation
//!
//! Independent re-check of a finished schedule against the draw rules.
//! Nothing here trusts the counters kept during the draw; everything is
//! recomputed from the opponent lists.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::DrawRules;
use crate::orchestrator::Matchups;
use crate::registry::{TeamId, TeamRegistry};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("{0} is not in the roster")]
    UnknownTeam(String),

    #[error("{0} has no schedule")]
    MissingSchedule(String),

    #[error("{0} is drawn against itself")]
    SelfPairing(String),

    #[error("{team} plays {opponent} but not the other way round")]
    Asymmetric { team: String, opponent: String },

    #[error("{team} has {found} opponents, expected {expected}")]
    WrongDegree { team: String, expected: usize, found: usize },

    #[error("{team} has {found} opponents from pot {pot}, expected {expected}")]
    PotQuota { team: String, pot: u8, expected: usize, found: usize },

    #[error("{team} plays compatriot {opponent}")]
    SameCountry { team: String, opponent: String },

    #[error("{team} faces {found} teams from {country}, limit is {limit}")]
    CountryCap { team: String, country: String, found: usize, limit: usize },
}

/// Check opponent lists indexed by team id.
pub fn verify_opponents(
    registry: &TeamRegistry,
    rules: &DrawRules,
    opponents: &[Vec<TeamId>],
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let expected_degree = rules.slots_per_team() as usize;

    for team in registry.ids() {
        let name = registry.name(team).to_string();
        let Some(list) = opponents.get(team) else {
            violations.push(Violation::MissingSchedule(name));
            continue;
        };

        let mut distinct = list.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() != expected_degree || list.len() != expected_degree {
            violations.push(Violation::WrongDegree {
                team: name.clone(),
                expected: expected_degree,
                found: distinct.len(),
            });
        }

        let mut per_pot = vec![0usize; rules.pots as usize];
        let mut per_country: BTreeMap<usize, usize> = BTreeMap::new();

        for &opponent in &distinct {
            if opponent == team {
                violations.push(Violation::SelfPairing(name.clone()));
                continue;
            }
            let reciprocal = opponents.get(opponent).is_some_and(|l| l.contains(&team));
            if !reciprocal {
                violations.push(Violation::Asymmetric {
                    team: name.clone(),
                    opponent: registry.name(opponent).to_string(),
                });
            }
            if registry.country(opponent) == registry.country(team) {
                violations.push(Violation::SameCountry {
                    team: name.clone(),
                    opponent: registry.name(opponent).to_string(),
                });
            }
            if let Some(slot) = per_pot.get_mut(registry.pot(opponent) as usize - 1) {
                *slot += 1;
            }
            *per_country.entry(registry.country(opponent)).or_insert(0) += 1;
        }

        for (idx, &found) in per_pot.iter().enumerate() {
            if found != rules.per_pot as usize {
                violations.push(Violation::PotQuota {
                    team: name.clone(),
                    pot: idx as u8 + 1,
                    expected: rules.per_pot as usize,
                    found,
                });
            }
        }

        for (country, found) in per_country {
            let limit = rules.max_per_country as usize;
            if registry.is_constrained(country) && found > limit {
                violations.push(Violation::CountryCap {
                    team: name.clone(),
                    country: registry.country_name(country).to_string(),
                    found,
                    limit,
                });
            }
        }
    }

    violations
}

/// Check a name-keyed schedule, as returned by a finished draw.
pub fn verify_matchups(
    registry: &TeamRegistry,
    rules: &DrawRules,
    matchups: &Matchups,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut opponents = vec![Vec::new(); registry.len()];

    for (team, names) in matchups {
        let Some(id) = registry.id_of(team) else {
            violations.push(Violation::UnknownTeam(team.clone()));
            continue;
        };
        for opponent in names {
            match registry.id_of(opponent) {
                Some(opp_id) => opponents[id].push(opp_id),
                None => violations.push(Violation::UnknownTeam(opponent.clone())),
            }
        }
    }
    for team in registry.ids() {
        if !matchups.contains_key(registry.name(team)) {
            violations.push(Violation::MissingSchedule(registry.name(team).to_string()));
        }
    }

    violations.extend(verify_opponents(registry, rules, &opponents));
    violations
}
