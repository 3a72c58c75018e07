use crate::aggregate::InningsTotals;
use crate::config::MatchFormat;
use crate::lifecycle::CompletionReason;
use crate::overs::Overs;

use super::ids::{InningsId, InningsNumber, MatchId, TeamId};

/// Lifecycle status of an innings.
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
pub enum InningsStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// One team's batting effort within a match.
///
/// The totals are a cache of the delivery log; see [`InningsTotals::from_log`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Innings {
    pub id: InningsId,
    pub batting_team: TeamId,
    pub bowling_team: TeamId,
    pub totals: InningsTotals,
    pub status: InningsStatus,
    /// Runs required to win. Only set on the second innings.
    pub target: Option<u32>,
    /// Why the innings ended, once it has.
    pub completion: Option<CompletionReason>,
}

impl Innings {
    pub fn new(id: InningsId, batting_team: TeamId, bowling_team: TeamId) -> Self {
        Self {
            id,
            batting_team,
            bowling_team,
            totals: InningsTotals::default(),
            status: InningsStatus::NotStarted,
            target: None,
            completion: None,
        }
    }

    pub fn with_target(mut self, target: u32) -> Self {
        self.target = Some(target);
        self
    }

    pub fn match_id(&self) -> MatchId {
        self.id.match_id
    }

    pub fn number(&self) -> InningsNumber {
        self.id.number
    }

    pub fn is_second(&self) -> bool {
        self.id.number == InningsNumber::Second
    }

    pub fn runs(&self) -> u32 {
        self.totals.runs
    }

    pub fn wickets(&self) -> u32 {
        self.totals.wickets
    }

    pub fn overs(&self, format: &MatchFormat) -> Overs {
        Overs::new(self.totals.legal_balls, format.balls_per_over)
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == InningsStatus::InProgress
    }

    pub fn is_completed(&self) -> bool {
        self.status == InningsStatus::Completed
    }

    /// Runs still needed to reach the target, if chasing.
    pub fn runs_needed(&self) -> Option<u32> {
        self.target.map(|target| target.saturating_sub(self.totals.runs))
    }

    /// `runs/wickets` as written on a scoreboard.
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.totals.runs, self.totals.wickets)
    }
}
