use crate::state::{ExtraKind, PlayerId, WicketKind};

/// One input from the scorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum ScoringAction {
    /// Regular delivery with `runs` off the bat.
    Runs { runs: u8 },
    /// Wide, no-ball, bye or leg-bye carrying `runs` extras in total.
    Extra { kind: ExtraKind, runs: u8 },
    /// The striker is dismissed.
    ///
    /// Always the striker, run outs included: a non-striker run out cannot be
    /// recorded, since every delivery credits its dismissal to the striker.
    Wicket {
        kind: WicketKind,
        fielder: Option<PlayerId>,
    },
    /// Removes the most recent delivery of the current over.
    Undo,
    /// Closes a complete over: batsmen change ends and the bowler is cleared.
    EndOver,
    SelectBowler { bowler: PlayerId },
    /// Fills the empty end after a wicket.
    SelectBatsman { batsman: PlayerId },
    SelectOpeners {
        striker: PlayerId,
        non_striker: PlayerId,
    },
}

impl ScoringAction {
    pub const fn runs(runs: u8) -> Self {
        Self::Runs { runs }
    }

    pub const fn extra(kind: ExtraKind, runs: u8) -> Self {
        Self::Extra { kind, runs }
    }

    pub const fn wicket(kind: WicketKind, fielder: Option<PlayerId>) -> Self {
        Self::Wicket { kind, fielder }
    }

    /// Whether the action records a delivery.
    pub const fn is_delivery(&self) -> bool {
        matches!(
            self,
            Self::Runs { .. } | Self::Extra { .. } | Self::Wicket { .. }
        )
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Runs { .. } => "runs",
            Self::Extra { .. } => "extra",
            Self::Wicket { .. } => "wicket",
            Self::Undo => "undo",
            Self::EndOver => "end_over",
            Self::SelectBowler { .. } => "select_bowler",
            Self::SelectBatsman { .. } => "select_batsman",
            Self::SelectOpeners { .. } => "select_openers",
        }
    }
}
