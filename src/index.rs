use std::collections::HashMap;

use crate::model::{Match, Player, PlayerId, Team, TeamId};

/// Read-only view over one ingestion run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub(crate) teams_by_name: HashMap<String, Team>,
    pub(crate) team_id_by_player_id: HashMap<PlayerId, TeamId>,
    pub(crate) matches: Vec<Match>,
    pub(crate) player_names: Vec<String>,
}

impl Index {
    /// Team names collide last-write-wins, as do players listed on more than one team.
    /// `None` player slots are failed fetches and are skipped.
    pub fn build(teams: Vec<Team>, matches: Vec<Match>, players: Vec<Option<Player>>) -> Self {
        let mut team_id_by_player_id = HashMap::new();
        for team in &teams {
            for pid in &team.players {
                team_id_by_player_id.insert(*pid, team.id);
            }
        }

        let teams_by_name = teams
            .into_iter()
            .map(|team| (team.name.clone(), team))
            .collect::<HashMap<_, _>>();

        let mut player_names = players
            .iter()
            .flatten()
            .map(Player::full_name)
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>();
        player_names.sort();

        Self {
            teams_by_name,
            team_id_by_player_id,
            matches,
            player_names,
        }
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams_by_name.get(name)
    }

    pub fn team_of_player(&self, player_id: PlayerId) -> Option<TeamId> {
        self.team_id_by_player_id.get(&player_id).copied()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams_by_name.values()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Full player names, sorted.
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }
}
