//! Match result and winning margin.

use crate::config::MatchFormat;
use crate::env::RosterOracle;
use crate::state::{Innings, TeamId};

/// How far ahead the winner finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "by", rename_all = "snake_case"))]
pub enum Margin {
    /// Team batting first defended its total.
    Runs { runs: u32 },
    /// Chasing team reached the target.
    Wickets { wickets: u32, balls_remaining: u32 },
}

impl Margin {
    /// `6 wickets (10 balls remaining)` or `12 runs`.
    pub fn describe(&self) -> String {
        match *self {
            Self::Runs { runs } => plural(runs, "run"),
            Self::Wickets {
                wickets,
                balls_remaining,
            } => format!(
                "{} ({} remaining)",
                plural(wickets, "wicket"),
                plural(balls_remaining, "ball")
            ),
        }
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum MatchResult {
    Won { winner: TeamId, margin: Margin },
    Tied,
    /// Ended before a second innings was played.
    NoResult,
}

impl MatchResult {
    /// Derives the result from the two innings.
    ///
    /// The chase succeeds when the second innings reaches its target
    /// (first-innings total + 1); equal totals are a tie; otherwise the side
    /// batting first wins by the difference in runs.
    pub fn from_innings(first: &Innings, second: Option<&Innings>, format: &MatchFormat) -> Self {
        let Some(second) = second else {
            return Self::NoResult;
        };

        let target = second.target.unwrap_or(first.runs() + 1);
        if second.runs() >= target {
            return Self::Won {
                winner: second.batting_team,
                margin: Margin::Wickets {
                    wickets: u32::from(format.wickets).saturating_sub(second.wickets()),
                    balls_remaining: format
                        .balls_per_innings()
                        .saturating_sub(second.totals.legal_balls),
                },
            };
        }

        let defended = target - 1;
        if second.runs() == defended {
            return Self::Tied;
        }

        Self::Won {
            winner: first.batting_team,
            margin: Margin::Runs {
                runs: defended - second.runs(),
            },
        }
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self {
            Self::Won { winner, .. } => Some(*winner),
            Self::Tied | Self::NoResult => None,
        }
    }

    /// Human-readable result line using team names from the roster.
    pub fn describe(&self, roster: &dyn RosterOracle) -> String {
        match self {
            Self::Won { winner, margin } => {
                format!("{} won by {}", roster.team_name(*winner), margin.describe())
            }
            Self::Tied => "Match tied".to_string(),
            Self::NoResult => "No result".to_string(),
        }
    }
}
