//! Scoresheet Builder CLI
//!
//! Saved game (.vbs) → CSV scoresheet converter, plus a save-directory
//! listing for picking what to export.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "scoresheet_builder")]
#[command(about = "Export recorded volleyball matches to CSV scoresheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Export one saved game to a CSV scoresheet
    Export {
        /// Input save file path (.vbs)
        #[arg(long)]
        r#in: PathBuf,

        /// Output CSV file path
        #[arg(long)]
        out: PathBuf,

        /// Field delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// List saved games in a directory
    List {
        /// Save directory
        #[arg(long, default_value = "saves")]
        dir: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export { r#in, out, delimiter, metadata } => {
            println!("🔨 Exporting scoresheet...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());

            let meta = scoresheet_builder::export_scoresheet(&r#in, &out, delimiter as u8)?;

            println!("\n✅ Scoresheet written!");
            println!("   Match: {}", meta.match_name);
            println!("   Rows:  {}", meta.rows);

            if let Some(metadata_path) = metadata {
                std::fs::write(&metadata_path, serde_json::to_string_pretty(&meta)?)?;
                println!("   Metadata: {}", metadata_path.display());
            }
        }

        Commands::List { dir } => {
            let manager = vb_core::SaveManager::new(&dir);
            let games = manager.list_games();
            if games.is_empty() {
                println!("No saved games in {}", dir.display());
            }
            for info in games {
                println!("{} (saved {})", info.get_display_text(), info.format_timestamp());
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("scoresheet_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
