use std::fmt;

use crate::index::Index;
use crate::model::PlayerId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub goal_diff: i64,
}

impl fmt::Display for TeamStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.wins, self.losses, self.goal_diff)
    }
}

impl Index {
    /// Win/loss record and goal differential for `team_name`.
    ///
    /// A draw counts as a loss. An unknown team yields all zeros, same as a
    /// team without matches; use [`Index::team`] to tell them apart.
    pub fn team_stats(&self, team_name: &str) -> TeamStats {
        let Some(team) = self.team(team_name) else {
            return TeamStats::default();
        };

        let mut stats = TeamStats::default();
        let mut scored = 0i64;
        let mut conceded = 0i64;
        for m in &self.matches {
            let (own, other) = if m.team1_id == team.id {
                (m.team1_score, m.team2_score)
            } else if m.team2_id == team.id {
                (m.team2_score, m.team1_score)
            } else {
                continue;
            };
            if own > other {
                stats.wins += 1;
            } else {
                stats.losses += 1;
            }
            scored += i64::from(own);
            conceded += i64::from(other);
        }
        stats.goal_diff = scored - conceded;
        stats
    }

    /// Number of matches played between the teams of two players.
    pub fn versus_count(&self, first: PlayerId, second: PlayerId) -> usize {
        let (Some(a), Some(b)) = (self.team_of_player(first), self.team_of_player(second)) else {
            return 0;
        };
        let wanted = if a <= b { (a, b) } else { (b, a) };
        self.matches.iter().filter(|m| m.pairing() == wanted).count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::{Match, Team};

    fn team(id: i64, name: &str, players: &[i64]) -> Team {
        Team {
            id,
            name: name.to_string(),
            players: players.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    fn game(team1_id: i64, team2_id: i64, team1_score: u32, team2_score: u32) -> Match {
        Match {
            team1_id,
            team2_id,
            team1_score,
            team2_score,
        }
    }

    #[test]
    fn stats_from_both_sides() {
        let idx = Index::build(
            vec![team(1, "A", &[]), team(2, "B", &[])],
            vec![game(1, 2, 3, 1), game(2, 1, 2, 0), game(2, 1, 1, 1), game(3, 4, 9, 0)],
            Vec::new(),
        );
        assert_eq!(
            idx.team_stats("A"),
            TeamStats {
                wins: 1,
                losses: 2,
                goal_diff: 0
            }
        );
        assert_eq!(
            idx.team_stats("B"),
            TeamStats {
                wins: 1,
                losses: 2,
                goal_diff: 0
            }
        );
    }

    #[test]
    fn stats_display_is_space_separated() {
        let s = TeamStats {
            wins: 2,
            losses: 5,
            goal_diff: -4,
        };
        assert_eq!(s.to_string(), "2 5 -4");
    }

    #[test]
    fn same_team_players_only_count_self_matches() {
        let idx = Index::build(
            vec![team(1, "A", &[10, 11]), team(2, "B", &[20])],
            vec![game(1, 2, 1, 0), game(1, 1, 0, 0)],
            Vec::new(),
        );
        assert_eq!(idx.versus_count(10, 11), 1);
        assert_eq!(idx.versus_count(10, 20), 1);
    }

    #[test]
    fn team_id_zero_is_an_ordinary_team() {
        let idx = Index::build(
            vec![team(0, "Zero", &[5]), team(1, "One", &[6])],
            vec![game(0, 1, 2, 1), game(1, 0, 0, 0)],
            Vec::new(),
        );
        assert_eq!(idx.versus_count(5, 6), 2);
        assert_eq!(idx.versus_count(6, 5), 2);
        assert_eq!(
            idx.team_stats("Zero"),
            TeamStats {
                wins: 1,
                losses: 1,
                goal_diff: 1
            }
        );
    }
}
