use std::io::{self, BufRead, IsTerminal, Write};
use std::process::{self, ExitCode};

use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use team_ledger::config::ApiConfig;
use team_ledger::source::source_from_config;
use team_ledger::{Index, IngestOptions, answer, load, parse_request};

const PROMPT: &str = "> ";

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_tracing();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<ExitCode> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    let source = source_from_config(&config)?;
    let options = IngestOptions {
        fetch_parallelism: config.fetch_parallelism,
    };

    let index = match load(source.as_ref(), &options) {
        Ok(index) => index,
        Err(failure) => {
            eprintln!("error: ingestion aborted: {failure}");
            return Ok(ExitCode::FAILURE);
        }
    };
    // Networking is done from here on; the rest only reads the index.
    drop(source);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for name in index.player_names() {
        writeln!(out, "{name}")?;
    }
    out.flush()?;

    // Interrupting the read loop is a normal way to end a session.
    if let Err(err) = ctrlc::set_handler(|| process::exit(0)) {
        warn!(error = %err, "could not install interrupt handler");
    }
    serve(&index, io::stdin().lock(), &mut out, io::stdin().is_terminal())?;
    Ok(ExitCode::SUCCESS)
}

/// Answers one query per input line until end of input. Lines that are not
/// valid UTF-8 are decoded lossily and answered like any other line.
fn serve(
    index: &Index,
    mut input: impl BufRead,
    out: &mut impl Write,
    prompt: bool,
) -> Result<()> {
    if prompt {
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!(error = %err, "stopped reading input");
                break;
            }
        }
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim_end_matches(['\n', '\r']);
        let reply = answer(index, &parse_request(line));
        writeln!(out, "{reply}")?;
        if prompt {
            write!(out, "{PROMPT}")?;
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use team_ledger::model::{Match, Team};

    use super::*;

    fn one_match_index() -> Index {
        Index::build(
            vec![Team {
                id: 1,
                name: "A".to_string(),
                players: BTreeSet::from([10]),
            }],
            vec![Match {
                team1_id: 1,
                team2_id: 2,
                team1_score: 3,
                team2_score: 1,
            }],
            Vec::new(),
        )
    }

    #[test]
    fn serve_answers_each_line_and_keeps_going() {
        let input = "stats? \"A\"\nfoo bar\nversus? abc 5\nversus? 10 10\n";
        let mut out = Vec::new();
        serve(&one_match_index(), input.as_bytes(), &mut out, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1 0 2\nunrecognized query\n0\n0\n"
        );
    }

    #[test]
    fn serve_survives_invalid_utf8_line() {
        let input: &[u8] = b"stats? \"A\"\n\xff\xfe junk\r\nstats? \"A\"";
        let mut out = Vec::new();
        serve(&one_match_index(), input, &mut out, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1 0 2\nunrecognized query\n1 0 2\n"
        );
    }
}
