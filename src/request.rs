//! Query line protocol.
//!
//! `stats? "<team name>"` prints `wins losses goal_diff`, `versus? <id> <id>`
//! prints a match count, anything else prints [`UNRECOGNIZED`].

use std::fmt;

use crate::index::Index;
use crate::model::PlayerId;
use crate::query::TeamStats;

pub const STATS_PREFIX: &str = "stats? ";
pub const VERSUS_PREFIX: &str = "versus? ";
pub const UNRECOGNIZED: &str = "unrecognized query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Stats { team: String },
    Versus { first: PlayerId, second: PlayerId },
    /// `versus?` with the wrong number of arguments or a non-integer id. Answers zero.
    MalformedVersus,
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Stats(TeamStats),
    Count(usize),
    Unrecognized,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Stats(stats) => write!(f, "{stats}"),
            Reply::Count(n) => write!(f, "{n}"),
            Reply::Unrecognized => f.write_str(UNRECOGNIZED),
        }
    }
}

pub fn parse_request(line: &str) -> Request {
    if let Some(rest) = line.strip_prefix(STATS_PREFIX) {
        return Request::Stats {
            team: parse_team_name(line, rest),
        };
    }
    if line.starts_with(VERSUS_PREFIX) {
        return parse_versus(line);
    }
    Request::Unrecognized
}

/// Text between the first pair of quotes (or after a lone opening quote);
/// without quotes, the trimmed remainder after the keyword.
fn parse_team_name(line: &str, rest: &str) -> String {
    let mut parts = line.split('"');
    parts.next();
    match parts.next() {
        Some(quoted) => quoted.to_string(),
        None => rest.trim().to_string(),
    }
}

fn parse_versus(line: &str) -> Request {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let [_, first, second] = tokens.as_slice() else {
        return Request::MalformedVersus;
    };
    match (first.parse::<PlayerId>(), second.parse::<PlayerId>()) {
        (Ok(first), Ok(second)) => Request::Versus { first, second },
        _ => Request::MalformedVersus,
    }
}

pub fn answer(index: &Index, request: &Request) -> Reply {
    match request {
        Request::Stats { team } => Reply::Stats(index.team_stats(team)),
        Request::Versus { first, second } => Reply::Count(index.versus_count(*first, *second)),
        Request::MalformedVersus => Reply::Count(0),
        Request::Unrecognized => Reply::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(team: &str) -> Request {
        Request::Stats {
            team: team.to_string(),
        }
    }

    #[test]
    fn stats_takes_first_quoted_name() {
        assert_eq!(parse_request(r#"stats? "Real Madrid""#), stats("Real Madrid"));
        assert_eq!(parse_request(r#"stats? "A" "B""#), stats("A"));
        assert_eq!(parse_request(r#"stats? " padded ""#), stats(" padded "));
        assert_eq!(parse_request(r#"stats? "Open"#), stats("Open"));
        assert_eq!(parse_request(r#"stats? """#), stats(""));
    }

    #[test]
    fn stats_without_quotes_uses_remainder() {
        assert_eq!(parse_request("stats?   Zenit  "), stats("Zenit"));
        assert_eq!(parse_request("stats? "), stats(""));
    }

    #[test]
    fn keywords_need_trailing_space() {
        assert_eq!(parse_request("stats?"), Request::Unrecognized);
        assert_eq!(parse_request("versus?"), Request::Unrecognized);
        assert_eq!(parse_request(" stats? \"A\""), Request::Unrecognized);
        assert_eq!(parse_request("STATS? \"A\""), Request::Unrecognized);
        assert_eq!(parse_request(""), Request::Unrecognized);
    }

    #[test]
    fn versus_parses_two_ids() {
        assert_eq!(
            parse_request("versus? 10   20 "),
            Request::Versus {
                first: 10,
                second: 20
            }
        );
        assert_eq!(
            parse_request("versus? -1 +2"),
            Request::Versus {
                first: -1,
                second: 2
            }
        );
    }

    #[test]
    fn versus_bad_arguments_are_malformed() {
        assert_eq!(parse_request("versus? abc 5"), Request::MalformedVersus);
        assert_eq!(parse_request("versus? 5"), Request::MalformedVersus);
        assert_eq!(parse_request("versus? 1 2 3"), Request::MalformedVersus);
        assert_eq!(parse_request("versus? 1.5 2"), Request::MalformedVersus);
        assert_eq!(
            parse_request("versus? 99999999999999999999999 2"),
            Request::MalformedVersus
        );
    }

    #[test]
    fn reply_lines() {
        assert_eq!(Reply::Count(3).to_string(), "3");
        assert_eq!(Reply::Unrecognized.to_string(), UNRECOGNIZED);
    }
}
