//! Team registry
//!
//! Static per-team attributes plus the derived indices the draw needs:
//! pot → teams, country → teams and the set of constrained countries.
//! Teams and countries are addressed by dense integer ids so the draw
//! state can live in flat arrays.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::DrawRules;
use crate::error::{DrawError, Result};

pub type TeamId = usize;
pub type CountryId = usize;

/// One roster entry as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub country: String,
    pub pot: u8,
}

impl TeamRecord {
    pub fn new(name: impl Into<String>, country: impl Into<String>, pot: u8) -> Self {
        Self { name: name.into(), country: country.into(), pot }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub country: CountryId,
    pub pot: u8,
}

#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    countries: Vec<String>,
    country_members: Vec<Vec<TeamId>>,
    constrained: Vec<bool>,
    /// Index `pot - 1`, members in roster order
    pot_members: Vec<Vec<TeamId>>,
    by_name: FxHashMap<String, TeamId>,
}

impl TeamRegistry {
    /// Build the registry from an ordered roster.
    ///
    /// Only the shape of the input is checked here. Rosters that cannot be
    /// drawn (uneven pots, a single country) are accepted and left for the
    /// draw to exhaust on.
    pub fn new(records: &[TeamRecord], rules: &DrawRules) -> Result<Self> {
        if records.is_empty() {
            return Err(DrawError::InvalidRoster("roster is empty".into()));
        }

        let mut teams = Vec::with_capacity(records.len());
        let mut countries: Vec<String> = Vec::new();
        let mut country_ids: FxHashMap<&str, CountryId> = FxHashMap::default();
        let mut country_members: Vec<Vec<TeamId>> = Vec::new();
        let mut pot_members = vec![Vec::new(); rules.pots as usize];
        let mut by_name = FxHashMap::default();

        for (id, record) in records.iter().enumerate() {
            let name = record.name.trim();
            let country = record.country.trim();
            if name.is_empty() {
                return Err(DrawError::InvalidRoster(format!("row {} has no team name", id + 1)));
            }
            if country.is_empty() {
                return Err(DrawError::InvalidRoster(format!("{} has no country", name)));
            }
            if record.pot == 0 || record.pot > rules.pots {
                return Err(DrawError::PotOutOfRange {
                    team: name.to_string(),
                    pot: record.pot,
                    pots: rules.pots,
                });
            }
            if by_name.insert(name.to_string(), id).is_some() {
                return Err(DrawError::DuplicateTeam(name.to_string()));
            }

            let country_id = *country_ids.entry(country).or_insert_with(|| {
                countries.push(country.to_string());
                country_members.push(Vec::new());
                countries.len() - 1
            });
            country_members[country_id].push(id);
            pot_members[record.pot as usize - 1].push(id);
            teams.push(Team { name: name.to_string(), country: country_id, pot: record.pot });
        }

        let constrained = country_members
            .iter()
            .map(|members| members.len() > rules.constrained_threshold)
            .collect();

        Ok(Self { teams, countries, country_members, constrained, pot_members, by_name })
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn ids(&self) -> std::ops::Range<TeamId> {
        0..self.teams.len()
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id]
    }

    pub fn name(&self, id: TeamId) -> &str {
        &self.teams[id].name
    }

    pub fn pot(&self, id: TeamId) -> u8 {
        self.teams[id].pot
    }

    pub fn country(&self, id: TeamId) -> CountryId {
        self.teams[id].country
    }

    pub fn country_name(&self, country: CountryId) -> &str {
        &self.countries[country]
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn country_members(&self, country: CountryId) -> &[TeamId] {
        &self.country_members[country]
    }

    /// Countries with enough entrants that the per-country cap can bind.
    pub fn is_constrained(&self, country: CountryId) -> bool {
        self.constrained[country]
    }

    pub fn constrained_countries(&self) -> impl Iterator<Item = CountryId> + '_ {
        self.constrained.iter().enumerate().filter(|(_, c)| **c).map(|(id, _)| id)
    }

    pub fn pot_count(&self) -> u8 {
        self.pot_members.len() as u8
    }

    /// Members of `pot` (1-based) in roster order. Unknown pots are empty.
    pub fn pot_members(&self, pot: u8) -> &[TeamId] {
        pot.checked_sub(1)
            .and_then(|idx| self.pot_members.get(idx as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn id_of(&self, name: &str) -> Option<TeamId> {
        self.by_name.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<TeamId> {
        self.id_of(name).ok_or_else(|| DrawError::UnknownTeam(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TeamRecord> {
        vec![
            TeamRecord::new("Liverpool", "England", 1),
            TeamRecord::new("Real Madrid", "Spain", 1),
            TeamRecord::new("Arsenal", "England", 2),
            TeamRecord::new("Benfica", "Portugal", 2),
            TeamRecord::new("Tottenham Hotspur", "England", 3),
            TeamRecord::new("Celtic", "Scotland", 4),
        ]
    }

    #[test]
    fn test_indices_follow_roster_order() {
        let registry = TeamRegistry::new(&sample(), &DrawRules::default()).unwrap();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.pot_members(1), &[0, 1]);
        assert_eq!(registry.pot_members(2), &[2, 3]);
        assert_eq!(registry.pot_members(4), &[5]);
        assert!(registry.pot_members(0).is_empty());
        assert!(registry.pot_members(9).is_empty());
        assert_eq!(registry.id_of("Benfica"), Some(3));
        assert_eq!(registry.name(4), "Tottenham Hotspur");
    }

    #[test]
    fn test_constrained_countries_need_three_members() {
        let registry = TeamRegistry::new(&sample(), &DrawRules::default()).unwrap();
        let england = registry.country(0);
        assert_eq!(registry.country_name(england), "England");
        assert!(registry.is_constrained(england));
        assert_eq!(registry.country_members(england), &[0, 2, 4]);
        assert!(!registry.is_constrained(registry.country(1)));
        assert_eq!(registry.constrained_countries().collect::<Vec<_>>(), vec![england]);
    }

    #[test]
    fn test_rejects_malformed_rosters() {
        let rules = DrawRules::default();
        assert!(matches!(TeamRegistry::new(&[], &rules), Err(DrawError::InvalidRoster(_))));

        let mut dup = sample();
        dup.push(TeamRecord::new("Celtic", "Scotland", 3));
        assert_eq!(
            TeamRegistry::new(&dup, &rules).unwrap_err(),
            DrawError::DuplicateTeam("Celtic".into())
        );

        let bad_pot = vec![TeamRecord::new("Ajax", "Netherlands", 5)];
        assert!(matches!(
            TeamRegistry::new(&bad_pot, &rules),
            Err(DrawError::PotOutOfRange { pot: 5, .. })
        ));

        let no_country = vec![TeamRecord::new("Ajax", "  ", 1)];
        assert!(matches!(TeamRegistry::new(&no_country, &rules), Err(DrawError::InvalidRoster(_))));
    }

    #[test]
    fn test_require_unknown_team() {
        let registry = TeamRegistry::new(&sample(), &DrawRules::default()).unwrap();
        assert_eq!(registry.require("Napoli"), Err(DrawError::UnknownTeam("Napoli".into())));
    }
}
