use std::collections::BTreeSet;

use serde::Deserialize;

pub type TeamId = i64;
pub type PlayerId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: BTreeSet<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Match {
    #[serde(rename = "team1")]
    pub team1_id: TeamId,
    #[serde(rename = "team2")]
    pub team2_id: TeamId,
    pub team1_score: u32,
    pub team2_score: u32,
}

impl Match {
    /// Participant ids as an unordered pair (smaller id first).
    pub fn pairing(&self) -> (TeamId, TeamId) {
        if self.team1_id <= self.team2_id {
            (self.team1_id, self.team2_id)
        } else {
            (self.team2_id, self.team1_id)
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team1_id == team_id || self.team2_id == team_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }
}
