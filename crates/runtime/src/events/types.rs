//! Event types for different topics.

use scoring_core::{
    CompletionReason, InningsId, InningsTotals, MatchId, MatchResult, ScoringEvent,
};
use serde::{Deserialize, Serialize};

/// A scoring event together with the innings totals after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringUpdate {
    pub innings: InningsId,
    pub event: ScoringEvent,
    pub totals: InningsTotals,
}

/// Innings and match transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifecycleEvent {
    InningsStarted {
        innings: InningsId,
    },

    InningsCompleted {
        innings: InningsId,
        reason: CompletionReason,
        totals: InningsTotals,
    },

    MatchCompleted {
        match_id: MatchId,
        result: MatchResult,
        result_text: String,
    },

    /// The delivery that completed the innings was undone.
    InningsReopened {
        innings: InningsId,
    },

    /// An innings with nothing bowled was withdrawn along with the
    /// completion that created it.
    InningsDiscarded {
        innings: InningsId,
    },

    /// A completed match is back in progress and its result was cleared.
    MatchReopened {
        match_id: MatchId,
    },

    /// Cached totals disagreed with the log and were replaced.
    TotalsRepaired {
        innings: InningsId,
        stale: InningsTotals,
        fresh: InningsTotals,
    },
}
