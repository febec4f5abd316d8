use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tagfold::config::AppConfig;
use tagfold::organizer::Organizer;

#[derive(Parser)]
#[command(
    name = "tagfold",
    version,
    about = "Sort audio files into Artist/Album folders using their tags"
)]
struct Cli {
    /// Folder holding the audio files to organize
    audio_folder: PathBuf,

    /// Show where files would go without creating folders or moving anything
    #[arg(long)]
    dry_run: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = AppConfig::load();

    if cli.dry_run {
        println!("DRY RUN: no folders will be created and no files moved");
        println!();
    }

    let result = Organizer::new(&config)
        .dry_run(cli.dry_run)
        .organize(&cli.audio_folder)
        .with_context(|| format!("Failed to organize {}", cli.audio_folder.display()))?;

    println!("{}", result.summary());
    if result.failed > 0 {
        println!("({} files skipped, see warnings above)", result.failed);
    }
    if cli.dry_run && result.moved > 0 {
        println!("(dry run: re-run without --dry-run to move files)");
    }

    Ok(())
}
