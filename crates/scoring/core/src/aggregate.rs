//! Folding a delivery log into innings totals.
//!
//! [`InningsTotals::from_log`] is the reference computation: it is a pure fold
//! and running it twice over the same log gives the same answer. The
//! incremental [`InningsTotals::apply`] / [`InningsTotals::revert`] pair keeps
//! a running copy in step with appends and undos; callers can compare it
//! against a fresh fold at any time with [`InningsTotals::diverges_from`].

use crate::overs::Overs;
use crate::state::{Delivery, DeliveryOutcome};

/// Extras conceded, by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    /// Extras recorded on deliveries that are not themselves extras
    /// (e.g. penalty runs on a wicket ball).
    pub penalties: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes + self.penalties
    }

    fn slot(&mut self, outcome: &DeliveryOutcome) -> &mut u32 {
        match outcome {
            DeliveryOutcome::Wide => &mut self.wides,
            DeliveryOutcome::NoBall => &mut self.no_balls,
            DeliveryOutcome::Bye => &mut self.byes,
            DeliveryOutcome::LegBye => &mut self.leg_byes,
            DeliveryOutcome::Regular | DeliveryOutcome::Wicket { .. } => &mut self.penalties,
        }
    }
}

/// Cumulative state of an innings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InningsTotals {
    pub runs: u32,
    pub wickets: u32,
    pub legal_balls: u32,
    pub extras: Extras,
    /// Deliveries folded in, legal or not.
    pub deliveries: u32,
}

impl InningsTotals {
    /// Full recompute from the log.
    pub fn from_log<'a>(log: impl IntoIterator<Item = &'a Delivery>) -> Self {
        log.into_iter().fold(Self::default(), |mut totals, delivery| {
            totals.apply(delivery);
            totals
        })
    }

    /// Adds one appended delivery.
    pub fn apply(&mut self, delivery: &Delivery) {
        self.runs += delivery.total_runs();
        *self.extras.slot(&delivery.outcome) += u32::from(delivery.extras);
        if delivery.is_wicket() {
            self.wickets += 1;
        }
        if delivery.is_legal() {
            self.legal_balls += 1;
        }
        self.deliveries += 1;
    }

    /// Removes a delivery previously applied. Exact inverse of [`Self::apply`].
    pub fn revert(&mut self, delivery: &Delivery) {
        self.runs = self.runs.saturating_sub(delivery.total_runs());
        let slot = self.extras.slot(&delivery.outcome);
        *slot = slot.saturating_sub(u32::from(delivery.extras));
        if delivery.is_wicket() {
            self.wickets = self.wickets.saturating_sub(1);
        }
        if delivery.is_legal() {
            self.legal_balls = self.legal_balls.saturating_sub(1);
        }
        self.deliveries = self.deliveries.saturating_sub(1);
    }

    /// Returns the fresh fold when the running totals disagree with it.
    pub fn diverges_from<'a>(&self, log: impl IntoIterator<Item = &'a Delivery>) -> Option<Self> {
        let fresh = Self::from_log(log);
        (fresh != *self).then_some(fresh)
    }

    pub fn overs(&self, balls_per_over: u8) -> Overs {
        Overs::new(self.legal_balls, balls_per_over)
    }

    /// Runs per over over the legal balls bowled so far.
    pub fn run_rate(&self, balls_per_over: u8) -> f64 {
        rate_per_over(self.runs, self.legal_balls, balls_per_over)
    }
}

/// `runs / balls * balls_per_over`, 0 when nothing has been bowled.
pub fn rate_per_over(runs: u32, legal_balls: u32, balls_per_over: u8) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    f64::from(runs) * f64::from(balls_per_over) / f64::from(legal_balls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::delivery::fixtures::*;
    use crate::state::{ExtraKind, PlayerId, WicketKind};

    #[test]
    fn total_is_bat_runs_plus_all_extras() {
        let deliveries = log(&[
            regular(4),
            extra(ExtraKind::Wide, 1),
            extra(ExtraKind::NoBall, 1),
            extra(ExtraKind::Bye, 2),
            extra(ExtraKind::LegBye, 1),
            wicket(WicketKind::Bowled, None),
            regular(6),
        ]);

        let totals = InningsTotals::from_log(&deliveries);
        assert_eq!(totals.runs, 4 + 1 + 1 + 2 + 1 + 6);
        assert_eq!(totals.extras.total(), 5);
        assert_eq!(totals.extras.wides, 1);
        assert_eq!(totals.extras.byes, 2);
        assert_eq!(totals.wickets, 1);
        assert_eq!(totals.legal_balls, 5);
        assert_eq!(totals.deliveries, 7);
    }

    #[test]
    fn recompute_is_idempotent() {
        let deliveries = log(&[regular(1), regular(2), extra(ExtraKind::Wide, 1)]);
        let first = InningsTotals::from_log(&deliveries);
        let second = InningsTotals::from_log(&deliveries);
        assert_eq!(first, second);
        assert_eq!(first.diverges_from(&deliveries), None);
    }

    #[test]
    fn revert_is_the_inverse_of_apply() {
        let deliveries = log(&[
            regular(3),
            extra(ExtraKind::Wide, 2),
            wicket(WicketKind::Caught, Some(PlayerId(7))),
        ]);
        let before = InningsTotals::from_log(&deliveries[..2]);

        let mut totals = before;
        totals.apply(&deliveries[2]);
        assert_ne!(totals, before);
        totals.revert(&deliveries[2]);
        assert_eq!(totals, before);
    }

    #[test]
    fn wide_then_five_dots_is_point_five_overs() {
        let mut entries = vec![extra(ExtraKind::Wide, 1)];
        entries.extend([regular(0); 5]);
        let totals = InningsTotals::from_log(&log(&entries));

        assert_eq!(totals.legal_balls, 5);
        assert_eq!(totals.runs, 1);
        assert_eq!(totals.overs(6).to_string(), "0.5");
    }

    #[test]
    fn run_rate_is_zero_before_the_first_ball() {
        assert_eq!(InningsTotals::default().run_rate(6), 0.0);
        assert_eq!(rate_per_over(12, 6, 6), 12.0);
    }
}
