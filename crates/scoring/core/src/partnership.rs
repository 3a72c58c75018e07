//! Partnership and fall-of-wicket reconstruction.
//!
//! Both are rebuilt by a single walk over the delivery log, segmenting it at
//! every wicket. A partnership record is only emitted when the stand produced
//! runs and two distinct batsmen were seen at the crease; a fall-of-wicket
//! record is emitted for every dismissal, including one on the first ball of
//! a new stand.
//!
//! Runs in both records are runs off the bat on regular deliveries; extras
//! are left out.

use arrayvec::ArrayVec;

use crate::aggregate::rate_per_over;
use crate::config::MatchFormat;
use crate::env::RosterOracle;
use crate::overs::Overs;
use crate::state::{Delivery, PlayerId, WicketKind};
use crate::stats::Dismissal;

/// A completed stand between two batsmen, ended by a wicket.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partnership {
    /// The wicket that ended the stand (1 for the opening stand).
    pub wicket: u32,
    pub batsmen: [PlayerId; 2],
    pub names: [Option<String>; 2],
    pub runs: u32,
    pub balls: u32,
    balls_per_over: u8,
}

impl Partnership {
    /// Runs per over of the stand, 0 if no legal ball was bowled.
    pub fn run_rate(&self) -> f64 {
        rate_per_over(self.runs, self.balls, self.balls_per_over)
    }
}

/// Score and over at a dismissal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallOfWicket {
    pub wicket: u32,
    /// Cumulative runs off the bat when the wicket fell.
    pub runs: u32,
    /// `over + (ball - 1) / balls_per_over` of the wicket ball.
    pub over: f64,
    /// Legal balls bowled including the wicket ball, for `14.3` style display.
    pub overs: Overs,
    pub batsman: PlayerId,
    pub batsman_name: Option<String>,
    pub kind: WicketKind,
    pub bowler: Option<String>,
    pub fielder: Option<String>,
}

impl FallOfWicket {
    /// Scorecard abbreviation of the dismissal (`b`, `c`, `run out`, ...).
    pub fn dismissal(&self) -> &'static str {
        self.kind.abbreviation()
    }

    /// `1-34 (Smith, 5.2 ov)`.
    pub fn summary(&self) -> String {
        let name = self
            .batsman_name
            .clone()
            .unwrap_or_else(|| self.batsman.to_string());
        format!("{}-{} ({}, {} ov)", self.wicket, self.runs, name, self.overs)
    }
}

/// The unbroken stand at the crease.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentStand {
    pub batsmen: ArrayVec<PlayerId, 2>,
    pub runs: u32,
    pub balls: u32,
}

/// Everything the wicket walk produces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WicketTimeline {
    pub partnerships: Vec<Partnership>,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub current: CurrentStand,
}

impl WicketTimeline {
    /// Walks the log once and rebuilds partnerships and fall of wickets.
    pub fn reconstruct(log: &[Delivery], roster: &dyn RosterOracle, format: &MatchFormat) -> Self {
        let mut timeline = Self::default();
        let mut stand = CurrentStand::default();
        let mut wickets = 0u32;
        let mut total_runs = 0u32;
        let mut legal_balls = 0u32;

        for delivery in log {
            stand.track(delivery.striker, delivery.non_striker);

            let runs = delivery.bat_runs();
            stand.runs += runs;
            total_runs += runs;
            if delivery.is_legal() {
                stand.balls += 1;
                legal_balls += 1;
            }

            let Some(wicket) = delivery.outcome.wicket() else {
                continue;
            };
            wickets += 1;

            if stand.runs > 0
                && let [first, second] = stand.batsmen.as_slice()
            {
                timeline.partnerships.push(Partnership {
                    wicket: wickets,
                    batsmen: [*first, *second],
                    names: [
                        roster.player_name(*first).map(str::to_owned),
                        roster.player_name(*second).map(str::to_owned),
                    ],
                    runs: stand.runs,
                    balls: stand.balls,
                    balls_per_over: format.balls_per_over,
                });
            }

            let dismissal = Dismissal::from_delivery(delivery, roster);
            timeline.fall_of_wickets.push(FallOfWicket {
                wicket: wickets,
                runs: total_runs,
                over: delivery.over_position(format.balls_per_over),
                overs: Overs::new(legal_balls, format.balls_per_over),
                batsman: delivery.striker,
                batsman_name: roster.player_name(delivery.striker).map(str::to_owned),
                kind: wicket,
                bowler: dismissal.as_ref().and_then(|d| d.bowler.clone()),
                fielder: dismissal.and_then(|d| d.fielder),
            });

            stand.runs = 0;
            stand.balls = 0;
            stand.batsmen.retain(|id| *id != delivery.striker);
        }

        timeline.current = stand;
        timeline
    }
}

impl CurrentStand {
    /// Adds the batsmen of a delivery to the pair, dropping anyone no longer
    /// at the crease when a new face appears.
    fn track(&mut self, striker: PlayerId, non_striker: PlayerId) {
        for id in [striker, non_striker] {
            if self.batsmen.contains(&id) {
                continue;
            }
            if self.batsmen.is_full() {
                self.batsmen.retain(|p| *p == striker || *p == non_striker);
            }
            // Full only if striker == non_striker, which a valid log never has.
            let _ = self.batsmen.try_push(id);
        }
    }
}
