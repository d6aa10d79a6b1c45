//! One-shot ingestion: teams, then matches, then every referenced player.
//!
//! Teams and matches are hard gates. Player fetches run concurrently and each
//! may fail on its own; failed slots are dropped when the index is built.

use std::collections::BTreeSet;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::index::Index;
use crate::model::{Match, Player, PlayerId, Team};
use crate::source::{JsonSource, fetch_record, fetch_records};

pub const TEAMS_PATH: &str = "/teams";
pub const MATCHES_PATH: &str = "/matches";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IngestionFailure {
    #[error("failed to load teams")]
    Teams,
    #[error("failed to load matches")]
    Matches,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Cap on concurrent player fetches. `None` gives every player its own worker.
    pub fetch_parallelism: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub teams: usize,
    pub matches: usize,
    pub players_requested: usize,
    pub players_loaded: usize,
}

pub fn player_path(id: PlayerId) -> String {
    format!("/players/{id}")
}

pub fn load(
    source: &(impl JsonSource + ?Sized),
    options: &IngestOptions,
) -> Result<Index, IngestionFailure> {
    load_with_summary(source, options).map(|(index, _)| index)
}

pub fn load_with_summary(
    source: &(impl JsonSource + ?Sized),
    options: &IngestOptions,
) -> Result<(Index, IngestSummary), IngestionFailure> {
    let teams: Vec<Team> = fetch_records(source, TEAMS_PATH)
        .filter(|teams| !teams.is_empty())
        .ok_or(IngestionFailure::Teams)?;

    let matches: Vec<Match> = fetch_records(source, MATCHES_PATH)
        .filter(|matches| !matches.is_empty())
        .ok_or(IngestionFailure::Matches)?;

    let ids = distinct_player_ids(&teams);
    let players = fetch_players(source, &ids, options.fetch_parallelism);
    let loaded = players.iter().filter(|p| p.is_some()).count();
    if loaded < ids.len() {
        warn!(failed = ids.len() - loaded, total = ids.len(), "some players could not be loaded");
    }

    let summary = IngestSummary {
        teams: teams.len(),
        matches: matches.len(),
        players_requested: ids.len(),
        players_loaded: loaded,
    };
    info!(
        teams = summary.teams,
        matches = summary.matches,
        players = summary.players_loaded,
        "ingestion complete"
    );

    Ok((Index::build(teams, matches, players), summary))
}

/// Every player id referenced by any team, each once.
pub fn distinct_player_ids(teams: &[Team]) -> Vec<PlayerId> {
    teams
        .iter()
        .flat_map(|team| team.players.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fetches all players concurrently and waits for every one of them.
/// Slot `i` holds the result for `ids[i]`.
pub fn fetch_players(
    source: &(impl JsonSource + ?Sized),
    ids: &[PlayerId],
    parallelism: Option<usize>,
) -> Vec<Option<Player>> {
    if ids.is_empty() {
        return Vec::new();
    }
    let threads = parallelism.unwrap_or(ids.len()).clamp(1, ids.len());
    with_fetch_pool(threads, || {
        ids.par_iter()
            .with_max_len(1)
            .map(|id| fetch_player(source, *id))
            .collect()
    })
}

/// A body carrying a different id is still kept under the requested id.
fn fetch_player(source: &(impl JsonSource + ?Sized), id: PlayerId) -> Option<Player> {
    let player = fetch_record::<Player>(source, &player_path(id))?;
    if let Some(reported) = player.id
        && reported != id
    {
        warn!(requested = id, reported, "player body reports a different id");
    }
    Some(player)
}

fn with_fetch_pool<T>(threads: usize, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("player-fetch-{i}"))
        .build()
    {
        Ok(pool) => pool.install(action),
        Err(err) => {
            warn!(error = %err, "fetch pool unavailable, using global pool");
            action()
        }
    }
}
