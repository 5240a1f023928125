//! Draw Builder CLI
//!
//! Roster CSV → draw → adjacency matrix CSV
//! Built-in roster export and country-conflict sheet

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use draw_builder::{DrawMetadata, TeamOrder};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "draw-builder")]
#[command(about = "Run league-phase draws and export draw matrices", long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run a draw and write the 0/1 matrix
    Draw {
        /// Roster CSV (Team,Country,Pot)
        #[arg(long)]
        teams: PathBuf,

        /// Output matrix CSV path
        #[arg(long, default_value = "draw_matrix.csv")]
        out: PathBuf,

        /// YAML draw config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fixed RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Full restarts before giving up (default 10; the built-in
        /// roster needs a few thousand)
        #[arg(long)]
        max_retries: Option<u32>,

        /// Row/column order of the matrix
        #[arg(long, value_enum, default_value_t = TeamOrder::Name)]
        order: TeamOrder,

        /// Print matchups as JSON
        #[arg(long, default_value = "false")]
        json: bool,

        /// Verify matrix checksum after writing
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Write the built-in 2025/26 roster
    Roster {
        #[arg(long, default_value = "teams.csv")]
        out: PathBuf,
    },

    /// Write the same-country conflict sheet for a roster
    Conflicts {
        #[arg(long)]
        teams: PathBuf,

        #[arg(long, default_value = "conflicts.csv")]
        out: PathBuf,
    },

    /// Write a commented default config file
    InitConfig {
        #[arg(long, default_value = "draw.yaml")]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Draw { teams, out, config, seed, max_retries, order, json, verify, metadata } => {
            let mut draw_config = match &config {
                Some(path) => draw_builder::load_config(path)?,
                None => draw_core::DrawConfig::default(),
            };
            if seed.is_some() {
                draw_config.seed = seed;
            }
            if let Some(max_retries) = max_retries {
                draw_config.max_retries = max_retries;
            }
            draw_config.validate()?;

            println!("🎲 Running draw...");
            println!("   Teams:       {}", teams.display());
            println!("   Output:      {}", out.display());
            println!("   Max retries: {}", draw_config.max_retries);

            let (outcome, meta) = draw_builder::build_draw(&teams, &out, &draw_config, order)?;

            print_metadata(&meta);

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.matchups)?);
            }

            if verify {
                verify_matrix_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Roster { out } => {
            let roster = draw_core::presets::league_phase_2025_26();
            draw_builder::save_roster(&out, &roster)?;
            println!("✅ Wrote {} teams to {}", roster.len(), out.display());
        }

        Commands::Conflicts { teams, out } => {
            let conflicts = draw_builder::build_conflicts(&teams, &out)?;
            println!("✅ Conflict sheet saved to {} ({} same-country cells)", out.display(), conflicts);
        }

        Commands::InitConfig { out } => {
            if out.exists() {
                anyhow::bail!("Config file already exists at {}", out.display());
            }
            std::fs::write(&out, draw_builder::config::DEFAULT_CONFIG_TEMPLATE)?;
            println!("✅ Config written to {}", out.display());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &DrawMetadata) {
    println!("\n✅ Draw complete!");
    println!("   Seed:      {}", meta.seed);
    println!("   Attempts:  {}/{}", meta.attempts, meta.max_retries);
    println!("   Teams:     {}", meta.team_count);
    println!("   Checksum:  {}", meta.checksum);
    println!("   Created:   {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_matrix_integrity(matrix_path: &Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying matrix integrity...");
    let is_valid = draw_builder::verify_matrix(matrix_path, checksum)?;

    if is_valid {
        println!("✅ Matrix verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Matrix verification failed - checksum mismatch!")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &DrawMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("draw-builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
