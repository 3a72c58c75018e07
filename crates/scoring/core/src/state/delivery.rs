//! A single recorded ball event and its outcome.

use super::ids::{DeliveryId, InningsId, PlayerId};

/// How a batsman was dismissed.
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
pub enum WicketKind {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    /// Retired out, obstructing the field and the rest. Never credited to the bowler.
    Other,
}

impl WicketKind {
    /// Whether the bowler gets the wicket in their figures.
    pub const fn credits_bowler(self) -> bool {
        !matches!(self, Self::RunOut | Self::Other)
    }

    /// Whether the dismissal names a fielder (catcher or wicket-keeper).
    pub const fn requires_fielder(self) -> bool {
        matches!(self, Self::Caught | Self::Stumped)
    }

    /// Scorecard abbreviation: `b`, `c`, `lbw`, `run out`, `st`, `hit wkt`.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Bowled => "b",
            Self::Caught => "c",
            Self::Lbw => "lbw",
            Self::RunOut => "run out",
            Self::Stumped => "st",
            Self::HitWicket => "hit wkt",
            Self::Other => "out",
        }
    }
}

/// Runs awarded other than off the bat.
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
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraKind {
    /// Wides and no-balls must be bowled again.
    pub const fn is_legal(self) -> bool {
        matches!(self, Self::Bye | Self::LegBye)
    }
}

/// Tagged outcome of a delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DeliveryOutcome {
    Regular,
    Wide,
    NoBall,
    Bye,
    LegBye,
    Wicket {
        wicket: WicketKind,
        fielder: Option<PlayerId>,
    },
}

impl DeliveryOutcome {
    /// Legal deliveries count toward the six balls of an over.
    pub const fn is_legal(&self) -> bool {
        !matches!(self, Self::Wide | Self::NoBall)
    }

    pub const fn is_wicket(&self) -> bool {
        matches!(self, Self::Wicket { .. })
    }

    pub const fn wicket(&self) -> Option<WicketKind> {
        match self {
            Self::Wicket { wicket, .. } => Some(*wicket),
            _ => None,
        }
    }

    pub const fn fielder(&self) -> Option<PlayerId> {
        match self {
            Self::Wicket { fielder, .. } => *fielder,
            _ => None,
        }
    }

    pub const fn extra_kind(&self) -> Option<ExtraKind> {
        match self {
            Self::Wide => Some(ExtraKind::Wide),
            Self::NoBall => Some(ExtraKind::NoBall),
            Self::Bye => Some(ExtraKind::Bye),
            Self::LegBye => Some(ExtraKind::LegBye),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Wide => "wide",
            Self::NoBall => "no_ball",
            Self::Bye => "bye",
            Self::LegBye => "leg_bye",
            Self::Wicket { .. } => "wicket",
        }
    }
}

impl From<ExtraKind> for DeliveryOutcome {
    fn from(kind: ExtraKind) -> Self {
        match kind {
            ExtraKind::Wide => Self::Wide,
            ExtraKind::NoBall => Self::NoBall,
            ExtraKind::Bye => Self::Bye,
            ExtraKind::LegBye => Self::LegBye,
        }
    }
}

/// Structural problems with a delivery record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("{wicket} dismissal requires a fielder")]
    MissingFielder { wicket: WicketKind },

    #[error("{outcome} delivery must carry at least one extra run")]
    MissingPenalty { outcome: &'static str },

    #[error("{outcome} delivery cannot carry {runs} runs off the bat")]
    BatRunsOnExtra { outcome: &'static str, runs: u8 },

    #[error("ball number {ball} outside 1..={balls_per_over}")]
    BallOutOfRange { ball: u8, balls_per_over: u8 },
}

/// One recorded event in an innings.
///
/// `over` is 0-based. `ball` is the 1-based number of the legal delivery the
/// event belongs to: a wide or no-ball shares the number of the legal ball
/// that follows it, because it does not advance the count.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delivery {
    pub id: DeliveryId,
    pub over: u32,
    pub ball: u8,
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
    /// Runs off the bat. Only counted on regular deliveries.
    pub runs: u8,
    /// Runs awarded as extras (wide, no-ball, bye, leg-bye).
    pub extras: u8,
    pub outcome: DeliveryOutcome,
    /// Milliseconds since the Unix epoch, supplied by the recorder.
    pub recorded_at: u64,
}

impl Delivery {
    pub fn innings(&self) -> InningsId {
        self.id.innings
    }

    pub fn is_legal(&self) -> bool {
        self.outcome.is_legal()
    }

    pub fn is_wicket(&self) -> bool {
        self.outcome.is_wicket()
    }

    /// Runs credited to the batsman.
    pub fn bat_runs(&self) -> u32 {
        match self.outcome {
            DeliveryOutcome::Regular => u32::from(self.runs),
            _ => 0,
        }
    }

    /// Contribution of this delivery to the innings total.
    pub fn total_runs(&self) -> u32 {
        self.bat_runs() + u32::from(self.extras)
    }

    /// Runs charged against the bowler: everything scored off the delivery.
    pub fn runs_conceded(&self) -> u32 {
        self.total_runs()
    }

    /// No runs and no extras.
    pub fn is_dot(&self) -> bool {
        self.runs == 0 && self.extras == 0
    }

    /// Position on the over clock as a decimal, counting only balls completed
    /// before this one (`over + (ball - 1) / 6`).
    pub fn over_position(&self, balls_per_over: u8) -> f64 {
        let completed = self.ball.saturating_sub(1);
        f64::from(self.over) + f64::from(completed) / f64::from(balls_per_over.max(1))
    }

    /// Checks the structural rules every stored delivery must satisfy.
    pub fn validate(&self, balls_per_over: u8) -> Result<(), DeliveryError> {
        if self.ball == 0 || self.ball > balls_per_over {
            return Err(DeliveryError::BallOutOfRange {
                ball: self.ball,
                balls_per_over,
            });
        }

        match self.outcome {
            DeliveryOutcome::Regular => Ok(()),
            DeliveryOutcome::Wide | DeliveryOutcome::NoBall => {
                if self.extras == 0 {
                    return Err(DeliveryError::MissingPenalty {
                        outcome: self.outcome.label(),
                    });
                }
                self.reject_bat_runs()
            }
            DeliveryOutcome::Bye | DeliveryOutcome::LegBye => self.reject_bat_runs(),
            DeliveryOutcome::Wicket { wicket, fielder } => {
                if wicket.requires_fielder() && fielder.is_none() {
                    return Err(DeliveryError::MissingFielder { wicket });
                }
                self.reject_bat_runs()
            }
        }
    }

    fn reject_bat_runs(&self) -> Result<(), DeliveryError> {
        if self.runs > 0 {
            return Err(DeliveryError::BatRunsOnExtra {
                outcome: self.outcome.label(),
                runs: self.runs,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::state::{InningsId, MatchId};

    pub const STRIKER: PlayerId = PlayerId(1);
    pub const NON_STRIKER: PlayerId = PlayerId(2);
    pub const BOWLER: PlayerId = PlayerId(20);

    /// Builds a log from `(outcome, runs, extras)` triples, numbering overs and
    /// balls by the legal-ball rule.
    pub fn log(entries: &[(DeliveryOutcome, u8, u8)]) -> Vec<Delivery> {
        log_with(entries, |_| (STRIKER, NON_STRIKER, BOWLER))
    }

    pub fn log_with(
        entries: &[(DeliveryOutcome, u8, u8)],
        mut players: impl FnMut(usize) -> (PlayerId, PlayerId, PlayerId),
    ) -> Vec<Delivery> {
        let innings = InningsId::first(MatchId(1));
        let mut legal = 0u32;
        entries
            .iter()
            .enumerate()
            .map(|(idx, &(outcome, runs, extras))| {
                let (striker, non_striker, bowler) = players(idx);
                let delivery = Delivery {
                    id: DeliveryId::new(innings, idx as u32 + 1),
                    over: legal / 6,
                    ball: (legal % 6) as u8 + 1,
                    striker,
                    non_striker,
                    bowler,
                    runs,
                    extras,
                    outcome,
                    recorded_at: idx as u64,
                };
                if outcome.is_legal() {
                    legal += 1;
                }
                delivery
            })
            .collect()
    }

    pub fn regular(runs: u8) -> (DeliveryOutcome, u8, u8) {
        (DeliveryOutcome::Regular, runs, 0)
    }

    pub fn extra(kind: ExtraKind, extras: u8) -> (DeliveryOutcome, u8, u8) {
        (kind.into(), 0, extras)
    }

    pub fn wicket(kind: WicketKind, fielder: Option<PlayerId>) -> (DeliveryOutcome, u8, u8) {
        (
            DeliveryOutcome::Wicket {
                wicket: kind,
                fielder,
            },
            0,
            0,
        )
    }
}
