//! Draw Builder Library
//!
//! Roster CSV → draw → verified 0/1 matrix CSV + SHA256 checksum.
//! Also writes the built-in roster and the pre-draw country-conflict sheet.

pub mod config;
pub mod matrix;
pub mod roster;

use anyhow::{bail, Context, Result};
use draw_core::{run_full_draw, verify_matchups, DrawConfig, DrawOutcome, TeamRegistry};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::info;

pub use config::{load_config, parse_config};
pub use matrix::{conflict_matrix_csv, team_order, DrawMatrix, TeamOrder};
pub use roster::{load_roster, read_roster, save_roster};

/// Metadata for a written draw matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawMetadata {
    /// Seed that reproduces the draw
    pub seed: u64,
    /// Attempt that succeeded (1-based)
    pub attempts: u32,
    pub max_retries: u32,
    pub team_count: usize,
    /// SHA256 of the matrix CSV (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
}

/// Run a draw for the roster at `teams_csv` and write its matrix to `out_csv`.
///
/// The schedule is re-verified against the rules before anything is written.
pub fn build_draw(
    teams_csv: &Path,
    out_csv: &Path,
    config: &DrawConfig,
    order: TeamOrder,
) -> Result<(DrawOutcome, DrawMetadata)> {
    let roster = load_roster(teams_csv)?;
    let outcome = run_full_draw(&roster, config).context("Draw failed")?;

    let registry = TeamRegistry::new(&roster, &config.rules)?;
    let violations = verify_matchups(&registry, &config.rules, &outcome.matchups);
    if let Some(first) = violations.first() {
        bail!("Draw violates {} rule(s), first: {}", violations.len(), first);
    }

    let matrix = DrawMatrix::from_matchups(&outcome.matchups, &team_order(&roster, order))?;
    let bytes = matrix.to_csv_bytes()?;
    write_output(out_csv, &bytes)?;
    info!(path = %out_csv.display(), teams = roster.len(), "draw matrix written");

    let metadata = DrawMetadata {
        seed: outcome.seed,
        attempts: outcome.attempts,
        max_retries: config.max_retries,
        team_count: roster.len(),
        checksum: sha256_hex(&bytes),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    Ok((outcome, metadata))
}

/// Write the country-conflict sheet for a roster. Returns the number of
/// conflicting (ordered) pairs.
pub fn build_conflicts(teams_csv: &Path, out_csv: &Path) -> Result<usize> {
    let roster = load_roster(teams_csv)?;
    let (bytes, conflicts) = conflict_matrix_csv(&roster)?;
    write_output(out_csv, &bytes)?;
    Ok(conflicts)
}

/// Check a written matrix against its recorded checksum.
pub fn verify_matrix(matrix_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(matrix_file)
        .with_context(|| format!("Failed to read matrix file: {}", matrix_file.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write output file: {}", path.display()))
}
