//! Draw matrix export
//!
//! Square 0/1 adjacency table over a fixed team order, plus the pre-draw
//! country-conflict sheet.

use anyhow::{bail, Context, Result};
use draw_core::{Matchups, TeamRecord};
use std::collections::HashMap;

/// Row/column ordering of the exported matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TeamOrder {
    /// Alphabetical by team name
    #[default]
    Name,
    /// By pot, then name
    Pot,
}

/// Team names in the requested order.
pub fn team_order(records: &[TeamRecord], order: TeamOrder) -> Vec<String> {
    let mut sorted: Vec<&TeamRecord> = records.iter().collect();
    match order {
        TeamOrder::Name => sorted.sort_by(|a, b| a.name.cmp(&b.name)),
        TeamOrder::Pot => sorted.sort_by(|a, b| (a.pot, &a.name).cmp(&(b.pot, &b.name))),
    }
    sorted.into_iter().map(|r| r.name.clone()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawMatrix {
    teams: Vec<String>,
    cells: Vec<Vec<u8>>,
}

impl DrawMatrix {
    /// `cells[i][j] == 1` when `order[i]` plays `order[j]`.
    pub fn from_matchups(matchups: &Matchups, order: &[String]) -> Result<Self> {
        let index: HashMap<&str, usize> =
            order.iter().enumerate().map(|(i, name)| (name.as_str(), i)).collect();
        let mut cells = vec![vec![0u8; order.len()]; order.len()];

        for (team, opponents) in matchups {
            let Some(&row) = index.get(team.as_str()) else {
                bail!("Team {} is missing from the matrix order", team);
            };
            for opponent in opponents {
                let Some(&col) = index.get(opponent.as_str()) else {
                    bail!("Opponent {} is missing from the matrix order", opponent);
                };
                cells[row][col] = 1;
            }
        }

        Ok(Self { teams: order.to_vec(), cells })
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn get(&self, team: &str, opponent: &str) -> Option<u8> {
        let row = self.teams.iter().position(|t| t == team)?;
        let col = self.teams.iter().position(|t| t == opponent)?;
        Some(self.cells[row][col])
    }

    pub fn row_sums(&self) -> Vec<usize> {
        self.cells.iter().map(|row| row.iter().map(|&c| c as usize).sum()).collect()
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.teams.len();
        (0..n).all(|i| self.cells[i][i] == 0 && (0..n).all(|j| self.cells[i][j] == self.cells[j][i]))
    }

    /// CSV with an empty corner cell, team names across the top and down
    /// the first column.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let header: Vec<&str> = std::iter::once("").chain(self.teams.iter().map(String::as_str)).collect();
        writer.write_record(&header).context("Failed to write matrix header")?;

        for (team, row) in self.teams.iter().zip(&self.cells) {
            let record: Vec<String> =
                std::iter::once(team.clone()).chain(row.iter().map(u8::to_string)).collect();
            writer.write_record(&record).context("Failed to write matrix row")?;
        }

        writer.into_inner().context("Failed to finish matrix CSV")
    }
}

/// Pre-draw sheet: `1` wherever two distinct teams share a country.
///
/// Layout: a `Pot` header row and a `Team` header row, then one row per
/// team led by its pot label and name. Teams are ordered by pot, then name.
pub fn conflict_matrix_csv(records: &[TeamRecord]) -> Result<(Vec<u8>, usize)> {
    let mut sorted: Vec<&TeamRecord> = records.iter().collect();
    sorted.sort_by(|a, b| (a.pot, &a.name).cmp(&(b.pot, &b.name)));

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut pot_row = vec!["Pot".to_string(), String::new()];
    pot_row.extend(sorted.iter().map(|r| format!("Pot {}", r.pot)));
    writer.write_record(&pot_row).context("Failed to write pot header")?;

    let mut team_row = vec![String::new(), "Team".to_string()];
    team_row.extend(sorted.iter().map(|r| r.name.clone()));
    writer.write_record(&team_row).context("Failed to write team header")?;

    let mut conflicts = 0;
    for (i, team) in sorted.iter().enumerate() {
        let mut row = vec![format!("Pot {}", team.pot), team.name.clone()];
        for (j, other) in sorted.iter().enumerate() {
            if i != j && team.country == other.country {
                conflicts += 1;
                row.push("1".to_string());
            } else {
                row.push(String::new());
            }
        }
        writer.write_record(&row).context("Failed to write conflict row")?;
    }

    let bytes = writer.into_inner().context("Failed to finish conflict CSV")?;
    Ok((bytes, conflicts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn roster() -> Vec<TeamRecord> {
        vec![
            TeamRecord::new("Real Madrid", "Spain", 1),
            TeamRecord::new("Arsenal", "England", 2),
            TeamRecord::new("Celtic", "Scotland", 1),
            TeamRecord::new("Athletic Bilbao", "Spain", 2),
        ]
    }

    fn matchups() -> Matchups {
        let set = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();
        Matchups::from([
            ("Real Madrid".to_string(), set(&["Arsenal", "Celtic"])),
            ("Arsenal".to_string(), set(&["Real Madrid", "Athletic Bilbao"])),
            ("Celtic".to_string(), set(&["Real Madrid", "Athletic Bilbao"])),
            ("Athletic Bilbao".to_string(), set(&["Arsenal", "Celtic"])),
        ])
    }

    #[test]
    fn test_team_order() {
        assert_eq!(
            team_order(&roster(), TeamOrder::Name),
            vec!["Arsenal", "Athletic Bilbao", "Celtic", "Real Madrid"]
        );
        assert_eq!(
            team_order(&roster(), TeamOrder::Pot),
            vec!["Celtic", "Real Madrid", "Arsenal", "Athletic Bilbao"]
        );
    }

    #[test]
    fn test_matrix_cells() {
        let order = team_order(&roster(), TeamOrder::Name);
        let matrix = DrawMatrix::from_matchups(&matchups(), &order).unwrap();

        assert_eq!(matrix.get("Celtic", "Real Madrid"), Some(1));
        assert_eq!(matrix.get("Real Madrid", "Athletic Bilbao"), Some(0));
        assert_eq!(matrix.get("Celtic", "Ajax"), None);
        assert_eq!(matrix.row_sums(), vec![2, 2, 2, 2]);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn test_matrix_csv_layout() {
        let order = team_order(&roster(), TeamOrder::Name);
        let matrix = DrawMatrix::from_matchups(&matchups(), &order).unwrap();
        let text = String::from_utf8(matrix.to_csv_bytes().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], ",Arsenal,Athletic Bilbao,Celtic,Real Madrid");
        assert_eq!(lines[1], "Arsenal,0,1,0,1");
        assert_eq!(lines[4], "Real Madrid,1,0,1,0");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_unknown_team_in_matchups() {
        let order = vec!["Arsenal".to_string()];
        assert!(DrawMatrix::from_matchups(&matchups(), &order).is_err());
    }

    #[test]
    fn test_conflict_sheet() {
        let (bytes, conflicts) = conflict_matrix_csv(&roster()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // Real Madrid and Athletic Bilbao, both directions
        assert_eq!(conflicts, 2);
        assert_eq!(lines[0], "Pot,,Pot 1,Pot 1,Pot 2,Pot 2");
        assert_eq!(lines[1], ",Team,Celtic,Real Madrid,Arsenal,Athletic Bilbao");
        assert_eq!(lines[3], "Pot 1,Real Madrid,,,,1");
        assert_eq!(lines[5], "Pot 2,Athletic Bilbao,,1,,");
    }
}
