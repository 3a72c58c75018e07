use crate::config::MatchFormat;
use crate::lifecycle::MatchResult;

use super::ids::{MatchId, StadiumId, TeamId, TournamentId};

/// What the toss winner chose to do.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Toss {
    pub winner: TeamId,
    pub decision: TossDecision,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// A single fixture between two teams.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pub id: MatchId,
    pub home: TeamId,
    pub away: TeamId,
    pub tournament: Option<TournamentId>,
    pub stadium: Option<StadiumId>,
    /// Seconds since the Unix epoch.
    pub scheduled_at: i64,
    pub format: MatchFormat,
    pub toss: Option<Toss>,
    pub status: MatchStatus,
    pub result: Option<MatchResult>,
    /// Human-readable result, e.g. "Falcons won by 6 wickets (10 balls remaining)".
    pub result_text: Option<String>,
}

impl Match {
    pub fn new(id: MatchId, home: TeamId, away: TeamId, format: MatchFormat) -> Self {
        Self {
            id,
            home,
            away,
            tournament: None,
            stadium: None,
            scheduled_at: 0,
            format,
            toss: None,
            status: MatchStatus::Scheduled,
            result: None,
            result_text: None,
        }
    }

    pub fn with_toss(mut self, winner: TeamId, decision: TossDecision) -> Self {
        self.toss = Some(Toss { winner, decision });
        self
    }

    pub fn teams(&self) -> [TeamId; 2] {
        [self.home, self.away]
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    /// The other side of the fixture, or `None` if `team` is not playing.
    pub fn opponent(&self, team: TeamId) -> Option<TeamId> {
        if team == self.home {
            Some(self.away)
        } else if team == self.away {
            Some(self.home)
        } else {
            None
        }
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.result.as_ref().and_then(MatchResult::winner)
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, MatchStatus::Completed | MatchStatus::Cancelled)
    }
}
