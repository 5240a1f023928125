//! Roster CSV - `Team,Country,Pot`
//!
//! Row order is kept: it is the order teams are drawn within their pot.

use anyhow::{Context, Result};
use draw_core::TeamRecord;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct RosterRow {
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Pot")]
    pot: u8,
}

impl From<RosterRow> for TeamRecord {
    fn from(row: RosterRow) -> Self {
        TeamRecord::new(row.team, row.country, row.pot)
    }
}

impl From<&TeamRecord> for RosterRow {
    fn from(record: &TeamRecord) -> Self {
        Self { team: record.name.clone(), country: record.country.clone(), pot: record.pot }
    }
}

/// Parse a roster from any CSV source with a `Team,Country,Pot` header.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<TeamRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<RosterRow>().enumerate() {
        // +2: header line, 1-based
        let row = row.with_context(|| format!("Invalid roster row at line {}", idx + 2))?;
        records.push(row.into());
    }
    Ok(records)
}

pub fn load_roster(path: &Path) -> Result<Vec<TeamRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open roster CSV: {}", path.display()))?;
    read_roster(file).with_context(|| format!("Failed to parse roster CSV: {}", path.display()))
}

pub fn write_roster_to<W: Write>(writer: W, records: &[TeamRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(RosterRow::from(record)).context("Failed to write roster row")?;
    }
    writer.flush().context("Failed to flush roster CSV")?;
    Ok(())
}

pub fn save_roster(path: &Path, records: &[TeamRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create roster CSV: {}", path.display()))?;
    write_roster_to(file, records)
}
