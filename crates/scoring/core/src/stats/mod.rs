//! Per-player and per-phase statistics.
//!
//! Every figure here is recomputed from the delivery log on each call and
//! never stored. Lookups against the roster that miss are skipped: the player
//! simply does not appear.

pub mod batting;
pub mod bowling;
pub mod phases;

pub use batting::{BattingFigures, Dismissal, batting_card, batting_figures};
pub use bowling::{BowlingFigures, bowling_card, bowling_figures};
pub use phases::{Phase, PhaseSplit, phase_splits};

use crate::state::PlayerId;

/// Distinct ids in order of first occurrence.
pub(crate) fn appearance_order(ids: impl IntoIterator<Item = PlayerId>) -> Vec<PlayerId> {
    let mut order = Vec::new();
    for id in ids {
        if !order.contains(&id) {
            order.push(id);
        }
    }
    order
}
