//! Common error infrastructure for scoring-core.
//!
//! Every error type in the crate implements [`ScoringFailure`] so the caller
//! can decide how to present it: a missing selection is a warning for the
//! scorer, an invalid delivery is rejected input, and a corrupted log is a bug.
//!
//! Invalid lifecycle transitions (a third innings, ending a finished match)
//! are not errors at all; see [`crate::lifecycle::Transition`].

use crate::state::{DeliveryError, InningsStatus, PlayerId};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The scorer can fix it and retry (e.g. choose a bowler first).
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    Validation,

    /// Unexpected inconsistency between the log and the live state.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all scoring errors.
pub trait ScoringFailure: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier of the variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Crease position a scoring action needs filled.
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
pub enum CreaseRole {
    Striker,
    NonStriker,
    Bowler,
}

/// Reasons a scoring action is rejected. A rejected action never mutates state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("no {role} selected")]
    MissingSelection { role: CreaseRole },

    #[error("invalid delivery: {0}")]
    InvalidDelivery(#[from] DeliveryError),

    #[error("over {over} is complete; end the over before the next delivery")]
    OverComplete { over: u32 },

    #[error("innings is {status}, not in progress")]
    InningsNotInProgress { status: InningsStatus },

    #[error("over {over} has {balls} legal balls; it cannot end yet")]
    OverNotComplete { over: u32, balls: u32 },

    #[error("nothing to undo in the current over")]
    NothingToUndo,

    #[error("player {player} is already at the crease")]
    AlreadyAtCrease { player: PlayerId },

    #[error("player {player} cannot bowl consecutive overs")]
    ConsecutiveOvers { player: PlayerId },

    #[error("both ends of the crease are occupied")]
    CreaseFull,

    #[error("batsman {player} was dismissed earlier in the innings")]
    AlreadyDismissed { player: PlayerId },

    #[error("{runs} runs is not a plausible score off one delivery")]
    ImplausibleRuns { runs: u8 },
}

impl ScoringFailure for ScoringError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingSelection { .. }
            | Self::OverComplete { .. }
            | Self::OverNotComplete { .. }
            | Self::NothingToUndo
            | Self::CreaseFull
            | Self::AlreadyAtCrease { .. }
            | Self::ConsecutiveOvers { .. }
            | Self::AlreadyDismissed { .. } => ErrorSeverity::Recoverable,
            Self::InvalidDelivery(_)
            | Self::InningsNotInProgress { .. }
            | Self::ImplausibleRuns { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSelection { .. } => "missing_selection",
            Self::InvalidDelivery(_) => "invalid_delivery",
            Self::OverComplete { .. } => "over_complete",
            Self::InningsNotInProgress { .. } => "innings_not_in_progress",
            Self::OverNotComplete { .. } => "over_not_complete",
            Self::NothingToUndo => "nothing_to_undo",
            Self::CreaseFull => "crease_full",
            Self::AlreadyAtCrease { .. } => "already_at_crease",
            Self::ConsecutiveOvers { .. } => "consecutive_overs",
            Self::AlreadyDismissed { .. } => "already_dismissed",
            Self::ImplausibleRuns { .. } => "implausible_runs",
        }
    }
}

impl ScoringFailure for DeliveryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}
