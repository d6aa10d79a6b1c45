use anyhow::{Context, Result};

use team_ledger::config::ApiConfig;
use team_ledger::source::source_from_config;
use team_ledger::{IngestOptions, load_with_summary};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let source = source_from_config(&config)?;
    let options = IngestOptions {
        fetch_parallelism: parse_parallelism_arg().or(config.fetch_parallelism),
    };

    let (index, summary) =
        load_with_summary(source.as_ref(), &options).context("ingestion aborted")?;

    println!("Ingestion complete");
    println!("Teams: {}", summary.teams);
    println!("Matches: {}", summary.matches);
    println!(
        "Players: {}/{}",
        summary.players_loaded, summary.players_requested
    );
    println!("Listed names: {}", index.player_names().len());
    let orphaned = index
        .matches()
        .iter()
        .filter(|m| !index.teams().any(|t| m.involves(t.id)))
        .count();
    if orphaned > 0 {
        println!("Matches with no known team: {orphaned}");
    }

    Ok(())
}

fn parse_parallelism_arg() -> Option<usize> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix("--parallelism=") {
            return raw.trim().parse().ok().filter(|n| *n > 0);
        }
        if arg == "--parallelism" {
            return args.get(idx + 1)?.trim().parse().ok().filter(|n| *n > 0);
        }
    }
    None
}
