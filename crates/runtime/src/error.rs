//! Errors surfaced by a scoring session.
//!
//! Wraps action rejections from the engine and repository failures so
//! clients can bubble them up with consistent context.

use scoring_core::{ErrorSeverity, MatchId, ScoringError, ScoringFailure};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("match {match_id} has no innings in progress")]
    NoActiveInnings { match_id: MatchId },

    #[error("match {0} cannot start before the toss")]
    TossMissing(MatchId),
}

impl ScoringFailure for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Scoring(err) => err.severity(),
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::NoActiveInnings { .. } => ErrorSeverity::Recoverable,
            Self::MatchNotFound(_) | Self::TossMissing(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Scoring(err) => err.error_code(),
            Self::Repository(RepositoryError::LockPoisoned) => "repository_lock_poisoned",
            Self::Repository(RepositoryError::Io(_)) => "repository_io",
            Self::Repository(RepositoryError::Json(_)) => "repository_json",
            Self::Repository(RepositoryError::CorruptedData { .. }) => "repository_corrupted",
            Self::MatchNotFound(_) => "match_not_found",
            Self::NoActiveInnings { .. } => "no_active_innings",
            Self::TossMissing(_) => "toss_missing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::CreaseRole;

    #[test]
    fn scoring_errors_keep_their_severity() {
        let err = SessionError::from(ScoringError::MissingSelection {
            role: CreaseRole::Bowler,
        });
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "missing_selection");
        assert_eq!(err.to_string(), "no bowler selected");
    }

    #[test]
    fn repository_failures_are_internal() {
        let err = SessionError::from(RepositoryError::LockPoisoned);
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "repository_lock_poisoned");
    }
}
