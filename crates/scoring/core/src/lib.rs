//! Deterministic cricket scoring rules and derived statistics.
//!
//! `scoring-core` turns a ball-by-ball delivery log into everything a
//! scoreboard shows: innings totals, over grouping, batting and bowling
//! figures, partnerships, fall of wickets and phase splits. It also owns the
//! innings and match lifecycle. All mutation of a live innings flows through
//! [`engine::ScoringEngine`]; every derived figure is recomputed from the log
//! on request. The crate performs no I/O and reads no clock.
pub mod aggregate;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod lifecycle;
pub mod overs;
pub mod partnership;
pub mod scorecard;
pub mod state;
pub mod stats;

pub use aggregate::{Extras, InningsTotals, rate_per_over};
pub use config::MatchFormat;
pub use engine::{
    ActionOutcome, Crease, LiveInnings, MAX_RUNS_PER_DELIVERY, ScoringAction, ScoringEngine,
    ScoringEvent,
};
pub use env::{Roster, RosterOracle};
pub use error::{CreaseRole, ErrorSeverity, ScoringError, ScoringFailure};
pub use lifecycle::{
    CompletionReason, Margin, MatchController, MatchResult, Transition, batting_order,
    compute_result,
};
pub use overs::{OverGroup, Overs, group_overs, legal_ball_count};
pub use partnership::{CurrentStand, FallOfWicket, Partnership, WicketTimeline};
pub use scorecard::{Chase, OverSummary, Scorecard};
pub use state::{
    Delivery, DeliveryError, DeliveryId, DeliveryOutcome, ExtraKind, Innings, InningsId,
    InningsNumber, InningsStatus, Match, MatchId, MatchStatus, Player, PlayerId, PlayerRole,
    StadiumId, Team, TeamId, TournamentId, Toss, TossDecision, WicketKind,
};
pub use stats::{
    BattingFigures, BowlingFigures, Dismissal, Phase, PhaseSplit, batting_card, batting_figures,
    bowling_card, bowling_figures, phase_splits,
};
