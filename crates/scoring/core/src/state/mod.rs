//! Persisted scoring records: deliveries, innings, matches and the roster.
//!
//! Everything derived from the delivery log (figures, partnerships, fall of
//! wickets, phases) lives elsewhere and is never stored.
pub mod delivery;
pub mod fixture;
pub mod ids;
pub mod innings;
pub mod roster;

pub use delivery::{Delivery, DeliveryError, DeliveryOutcome, ExtraKind, WicketKind};
pub use fixture::{Match, MatchStatus, Toss, TossDecision};
pub use ids::{
    DeliveryId, InningsId, InningsNumber, MatchId, PlayerId, StadiumId, TeamId, TournamentId,
};
pub use innings::{Innings, InningsStatus};
pub use roster::{Player, PlayerRole, Team};
