//! Candidate evaluation with one-step lookahead
//!
//! For a team and a target pot, lists every immediately legal opponent and
//! flags whether committing it would leave some other team short of legal
//! partners. The check looks one pairing ahead only and compares total
//! partner counts against total need, so a "safe" candidate can still
//! deadlock later. The transaction layer and the orchestrator's restarts
//! absorb that.

use crate::registry::{TeamId, TeamRegistry};
use crate::state::{DrawState, UndoLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub team: TeamId,
    /// No team is starved of partners after this pairing
    pub safe: bool,
}

impl Candidate {
    /// 1 for safe, 0 for deadlock risk.
    pub fn weight(&self) -> u8 {
        u8::from(self.safe)
    }
}

/// Legal opponents for `team` from `pot`, in roster order, each with its
/// lookahead flag.
///
/// `state` is borrowed mutably to simulate each pairing; every simulated
/// change is reverted before returning.
pub fn evaluate_candidates(
    registry: &TeamRegistry,
    state: &mut DrawState,
    team: TeamId,
    pot: u8,
) -> Vec<Candidate> {
    let mut scratch = UndoLog::new();
    let mut candidates = Vec::new();

    for &opponent in registry.pot_members(pot) {
        if !state.is_legal(registry, team, opponent) {
            continue;
        }

        state.pair(registry, team, opponent, &mut scratch);
        let safe = state.find_starved(registry, DrawState::legal_partner_count).is_none();
        scratch.rollback(state);

        candidates.push(Candidate { team: opponent, safe });
    }

    candidates
}

/// Only the candidates with weight 1.
pub fn safe_candidates(
    registry: &TeamRegistry,
    state: &mut DrawState,
    team: TeamId,
    pot: u8,
) -> Vec<TeamId> {
    evaluate_candidates(registry, state, team, pot)
        .into_iter()
        .filter(|c| c.safe)
        .map(|c| c.team)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawRules;
    use crate::registry::TeamRegistry;
    use crate::state::tests::small_registry;
    use crate::test_fixtures::{random_reachable_state, square_roster, square_rules, unique_roster};
    use proptest::prelude::*;

    #[test]
    fn test_candidates_exclude_illegal_opponents() {
        let registry = small_registry();
        let mut state = DrawState::new(&registry, DrawRules::default());
        let a1 = registry.require("A1").unwrap();

        let candidates = evaluate_candidates(&registry, &mut state, a1, 2);
        let names: Vec<&str> = candidates.iter().map(|c| registry.name(c.team)).collect();
        // A2 shares A1's country
        assert_eq!(names, vec!["B2", "C2"]);
        assert!(candidates.iter().all(|c| c.safe && c.weight() == 1));
    }

    #[test]
    fn test_own_pot_candidates_exclude_self() {
        let registry = small_registry();
        let mut state = DrawState::new(&registry, DrawRules::default());
        let b1 = registry.require("B1").unwrap();

        let candidates = evaluate_candidates(&registry, &mut state, b1, 1);
        assert!(candidates.iter().all(|c| c.team != b1));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_lookahead_flags_starving_pairing() {
        let rules = square_rules();
        let registry = TeamRegistry::new(&square_roster(), &rules).unwrap();
        let mut state = DrawState::new(&registry, rules);
        let id = |name: &str| registry.require(name).unwrap();

        // Q taking R leaves P (which cannot face S) without a pot-2 opponent
        let candidates = evaluate_candidates(&registry, &mut state, id("Q"), 2);
        assert_eq!(
            candidates,
            vec![
                Candidate { team: id("R"), safe: false },
                Candidate { team: id("S"), safe: true },
            ]
        );
        assert_eq!(candidates[0].weight(), 0);
        assert_eq!(safe_candidates(&registry, &mut state, id("Q"), 2), vec![id("S")]);
    }

    #[test]
    fn test_evaluation_leaves_state_untouched() {
        let rules = DrawRules::default();
        let registry = TeamRegistry::new(&unique_roster(), &rules).unwrap();
        let mut state = random_reachable_state(&registry, rules, 7, 40);
        let before = state.clone();

        for team in registry.ids() {
            for pot in rules.pot_numbers() {
                evaluate_candidates(&registry, &mut state, team, pot);
            }
        }
        assert_eq!(state, before);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_evaluator_is_idempotent(seed in any::<u64>(), steps in 0usize..120, team in 0usize..36, pot in 1u8..=4) {
            let rules = DrawRules::default();
            let registry = TeamRegistry::new(&unique_roster(), &rules).unwrap();
            let mut state = random_reachable_state(&registry, rules, seed, steps);
            let before = state.clone();

            let candidates = evaluate_candidates(&registry, &mut state, team, pot);

            prop_assert_eq!(&state, &before);
            for c in candidates {
                prop_assert_eq!(registry.pot(c.team), pot);
                prop_assert!(state.is_legal(&registry, team, c.team));
            }
        }
    }
}
