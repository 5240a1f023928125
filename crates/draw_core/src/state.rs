//! Draw state and undo log
//!
//! Per-team counters for one draw attempt, stored in flat arrays indexed by
//! [`TeamId`]. Every mutation goes through a [`Delta`] recorded in an
//! [`UndoLog`], so a tentative pairing (lookahead) or a whole team's batch
//! (transaction) can be reverted exactly.

use rustc_hash::FxHashMap;

use crate::config::DrawRules;
use crate::registry::{CountryId, TeamId, TeamRegistry};

/// One reversible change to the draw state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    /// `opponent` appended to `team`'s opponent list
    Edge { team: TeamId, opponent: TeamId },
    /// One open slot of `team` consumed
    Slot { team: TeamId },
    /// `team`'s count of opponents from `pot` incremented
    PotCount { team: TeamId, pot: u8 },
    /// `team`'s count of opponents from constrained `country` incremented
    CountryCount { team: TeamId, country: CountryId },
}

/// Applied deltas in application order.
#[derive(Debug, Default, Clone)]
pub struct UndoLog {
    entries: Vec<Delta>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position to roll back to later.
    pub fn mark(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Delta] {
        &self.entries
    }

    fn record(&mut self, delta: Delta) {
        self.entries.push(delta);
    }

    /// Revert every delta recorded after `mark`, newest first.
    pub fn rollback_to(&mut self, state: &mut DrawState, mark: usize) {
        while self.entries.len() > mark {
            if let Some(delta) = self.entries.pop() {
                state.revert(delta);
            }
        }
    }

    pub fn rollback(&mut self, state: &mut DrawState) {
        self.rollback_to(state, 0);
    }

    /// Keep the applied changes and forget how to undo them.
    pub fn commit(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawState {
    rules: DrawRules,
    opponents: Vec<Vec<TeamId>>,
    remaining: Vec<u8>,
    /// `[team][pot - 1]`
    pot_counts: Vec<Vec<u8>>,
    /// Sparse, constrained countries only. Absent means zero; entries that
    /// return to zero on rollback are removed.
    country_counts: Vec<FxHashMap<CountryId, u8>>,
}

impl DrawState {
    pub fn new(registry: &TeamRegistry, rules: DrawRules) -> Self {
        let n = registry.len();
        Self {
            rules,
            opponents: vec![Vec::with_capacity(rules.slots_per_team() as usize); n],
            remaining: vec![rules.slots_per_team(); n],
            pot_counts: vec![vec![0; rules.pots as usize]; n],
            country_counts: vec![FxHashMap::default(); n],
        }
    }

    pub fn rules(&self) -> &DrawRules {
        &self.rules
    }

    pub fn team_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn remaining(&self, team: TeamId) -> u8 {
        self.remaining[team]
    }

    pub fn is_complete(&self, team: TeamId) -> bool {
        self.remaining[team] == 0
    }

    pub fn pot_count(&self, team: TeamId, pot: u8) -> u8 {
        self.pot_counts[team][pot as usize - 1]
    }

    pub fn country_count(&self, team: TeamId, country: CountryId) -> u8 {
        self.country_counts[team].get(&country).copied().unwrap_or(0)
    }

    /// Number of sparse country entries held for `team`.
    pub fn country_entries(&self, team: TeamId) -> usize {
        self.country_counts[team].len()
    }

    /// Opponents in the order they were drawn.
    pub fn opponents(&self, team: TeamId) -> &[TeamId] {
        &self.opponents[team]
    }

    pub fn has_edge(&self, a: TeamId, b: TeamId) -> bool {
        self.opponents[a].contains(&b)
    }

    /// Undirected edge count.
    pub fn edge_count(&self) -> usize {
        self.opponents.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Immediate legality of pairing `team` with `candidate`.
    pub fn is_legal(&self, registry: &TeamRegistry, team: TeamId, candidate: TeamId) -> bool {
        if team == candidate || self.has_edge(team, candidate) {
            return false;
        }
        if self.remaining[team] < 1 || self.remaining[candidate] < 1 {
            return false;
        }

        let team_pot = registry.pot(team);
        let cand_pot = registry.pot(candidate);
        if self.pot_count(team, cand_pot) >= self.rules.per_pot
            || self.pot_count(candidate, team_pot) >= self.rules.per_pot
        {
            return false;
        }

        let team_country = registry.country(team);
        let cand_country = registry.country(candidate);
        if team_country == cand_country {
            return false;
        }
        if registry.is_constrained(cand_country)
            && self.country_count(team, cand_country) >= self.rules.max_per_country
        {
            return false;
        }
        if registry.is_constrained(team_country)
            && self.country_count(candidate, team_country) >= self.rules.max_per_country
        {
            return false;
        }
        true
    }

    /// Teams across every pot that pass [`is_legal`](Self::is_legal) against `team`.
    pub fn legal_partner_count(&self, registry: &TeamRegistry, team: TeamId) -> usize {
        registry.ids().filter(|&other| self.is_legal(registry, team, other)).count()
    }

    /// Looser partner count: open slots, different country, not yet paired.
    /// Pot and country quotas are ignored.
    pub fn open_partner_count(&self, registry: &TeamRegistry, team: TeamId) -> usize {
        let country = registry.country(team);
        registry
            .ids()
            .filter(|&other| {
                !self.has_edge(team, other)
                    && self.remaining[other] > 0
                    && registry.country(other) != country
            })
            .count()
    }

    /// First team with open slots whose partner count falls short of its need.
    pub fn find_starved(
        &self,
        registry: &TeamRegistry,
        count: impl Fn(&Self, &TeamRegistry, TeamId) -> usize,
    ) -> Option<(TeamId, usize)> {
        registry.ids().filter(|&team| self.remaining[team] > 0).find_map(|team| {
            let available = count(self, registry, team);
            (available < self.remaining[team] as usize).then_some((team, available))
        })
    }

    /// Pair `a` with `b`, updating both sides and recording every change.
    ///
    /// The pair must be legal; callers check [`is_legal`](Self::is_legal) first.
    pub fn pair(&mut self, registry: &TeamRegistry, a: TeamId, b: TeamId, log: &mut UndoLog) {
        debug_assert!(self.is_legal(registry, a, b), "illegal pairing {a} vs {b}");

        let mut deltas = vec![
            Delta::Edge { team: a, opponent: b },
            Delta::Edge { team: b, opponent: a },
            Delta::Slot { team: a },
            Delta::Slot { team: b },
            Delta::PotCount { team: a, pot: registry.pot(b) },
            Delta::PotCount { team: b, pot: registry.pot(a) },
        ];
        let (a_country, b_country) = (registry.country(a), registry.country(b));
        if registry.is_constrained(b_country) {
            deltas.push(Delta::CountryCount { team: a, country: b_country });
        }
        if registry.is_constrained(a_country) {
            deltas.push(Delta::CountryCount { team: b, country: a_country });
        }

        for delta in deltas {
            self.apply(delta);
            log.record(delta);
        }
    }

    fn apply(&mut self, delta: Delta) {
        match delta {
            Delta::Edge { team, opponent } => self.opponents[team].push(opponent),
            Delta::Slot { team } => self.remaining[team] -= 1,
            Delta::PotCount { team, pot } => self.pot_counts[team][pot as usize - 1] += 1,
            Delta::CountryCount { team, country } => {
                *self.country_counts[team].entry(country).or_insert(0) += 1;
            }
        }
    }

    fn revert(&mut self, delta: Delta) {
        match delta {
            Delta::Edge { team, opponent } => {
                if let Some(pos) = self.opponents[team].iter().rposition(|&o| o == opponent) {
                    self.opponents[team].remove(pos);
                }
            }
            Delta::Slot { team } => self.remaining[team] += 1,
            Delta::PotCount { team, pot } => self.pot_counts[team][pot as usize - 1] -= 1,
            Delta::CountryCount { team, country } => {
                let counts = &mut self.country_counts[team];
                if let Some(count) = counts.get_mut(&country) {
                    *count -= 1;
                    if *count == 0 {
                        counts.remove(&country);
                    }
                }
            }
        }
    }
}
