//! Everything a scoreboard shows for one innings, derived in one pass over
//! the pieces above.

use crate::aggregate::{Extras, InningsTotals, rate_per_over};
use crate::config::MatchFormat;
use crate::env::RosterOracle;
use crate::overs::{Overs, group_overs};
use crate::partnership::{CurrentStand, FallOfWicket, Partnership, WicketTimeline};
use crate::state::{Delivery, Innings, InningsId, InningsStatus, PlayerId};
use crate::stats::{
    BattingFigures, BowlingFigures, PhaseSplit, batting_card, bowling_card, phase_splits,
};

/// Runs and wickets in one over of the innings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverSummary {
    /// 1-based over number.
    pub number: u32,
    pub bowler: PlayerId,
    pub runs: u32,
    pub wickets: u32,
    pub maiden: bool,
    /// Cumulative innings score at the end of the over.
    pub score: u32,
}

/// The chase, for a second innings with a target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chase {
    pub target: u32,
    pub runs_needed: u32,
    pub balls_remaining: u32,
    /// Runs per over still required, `None` once no balls remain.
    pub required_run_rate: Option<f64>,
}

impl Chase {
    fn of(innings: &Innings, format: &MatchFormat) -> Option<Self> {
        let target = innings.target?;
        let runs_needed = innings.runs_needed()?;
        let balls_remaining = format
            .balls_per_innings()
            .saturating_sub(innings.totals.legal_balls);
        let required_run_rate = (balls_remaining > 0)
            .then(|| rate_per_over(runs_needed, balls_remaining, format.balls_per_over));
        Some(Self {
            target,
            runs_needed,
            balls_remaining,
            required_run_rate,
        })
    }

    /// `Need 20 runs from 14 balls`.
    pub fn summary(&self) -> String {
        format!(
            "Need {} runs from {} balls",
            self.runs_needed, self.balls_remaining
        )
    }
}

/// Scorecard for one innings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scorecard {
    pub innings: InningsId,
    pub batting_team: String,
    pub bowling_team: String,
    pub status: InningsStatus,
    pub totals: InningsTotals,
    pub overs: Overs,
    pub run_rate: f64,
    pub chase: Option<Chase>,
    pub batting: Vec<BattingFigures>,
    pub bowling: Vec<BowlingFigures>,
    pub partnerships: Vec<Partnership>,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub current_partnership: CurrentStand,
    pub phases: Vec<PhaseSplit>,
    pub over_summaries: Vec<OverSummary>,
}

impl Scorecard {
    /// Builds the card from the innings record and its log.
    ///
    /// The totals are recomputed from the log rather than read from the
    /// record, so a stale record cannot leak into the card.
    pub fn build(
        innings: &Innings,
        log: &[Delivery],
        roster: &dyn RosterOracle,
        format: &MatchFormat,
    ) -> Self {
        let totals = InningsTotals::from_log(log);
        let timeline = WicketTimeline::reconstruct(log, roster, format);

        let mut current = innings.clone();
        current.totals = totals;

        Self {
            innings: innings.id,
            batting_team: roster.team_name(innings.batting_team),
            bowling_team: roster.team_name(innings.bowling_team),
            status: innings.status,
            totals,
            overs: totals.overs(format.balls_per_over),
            run_rate: totals.run_rate(format.balls_per_over),
            chase: Chase::of(&current, format),
            batting: batting_card(log, roster, format),
            bowling: bowling_card(log, roster, format),
            partnerships: timeline.partnerships,
            fall_of_wickets: timeline.fall_of_wickets,
            current_partnership: timeline.current,
            phases: phase_splits(log, format),
            over_summaries: over_summaries(log, format),
        }
    }

    pub fn extras(&self) -> &Extras {
        &self.totals.extras
    }

    /// `150/8 (20.0 ov)`.
    pub fn headline(&self) -> String {
        format!(
            "{}/{} ({} ov)",
            self.totals.runs, self.totals.wickets, self.overs
        )
    }
}

fn over_summaries(log: &[Delivery], format: &MatchFormat) -> Vec<OverSummary> {
    let mut score = 0;
    group_overs(log, format.balls_per_over)
        .into_iter()
        .filter_map(|group| {
            let first = group.deliveries.first()?;
            let runs = group.runs();
            score += runs;
            Some(OverSummary {
                number: first.over + 1,
                bowler: first.bowler,
                runs,
                wickets: group.wickets(),
                maiden: group.is_maiden(),
                score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::fixtures::{AWAY, HOME, roster};
    use crate::state::delivery::fixtures::*;
    use crate::state::{ExtraKind, MatchId, WicketKind};

    #[test]
    fn card_collects_every_derived_figure() {
        let mut entries = vec![regular(1); 6];
        entries.extend([
            regular(4),
            extra(ExtraKind::Wide, 1),
            wicket(WicketKind::Caught, Some(PlayerId(15))),
        ]);
        let deliveries = log(&entries);
        let innings = Innings::new(InningsId::first(MatchId(1)), HOME, AWAY);

        let card = Scorecard::build(&innings, &deliveries, &roster(), &MatchFormat::t20());

        assert_eq!(card.batting_team, "Falcons");
        assert_eq!(card.headline(), "11/1 (1.2 ov)");
        assert_eq!(card.extras().wides, 1);
        assert_eq!(card.fall_of_wickets.len(), 1);
        assert_eq!(card.bowling[0].summary(), "1.2-0-11-1");
        assert_eq!(card.over_summaries.len(), 2);
        assert_eq!(card.over_summaries[0].runs, 6);
        assert_eq!(card.over_summaries[1].score, 11);
        assert_eq!(card.chase, None);
    }

    #[test]
    fn chase_reports_required_rate() {
        let deliveries = log(&[regular(2); 6]);
        let innings = Innings::new(InningsId::second(MatchId(1)), AWAY, HOME).with_target(132);

        let card = Scorecard::build(&innings, &deliveries, &roster(), &MatchFormat::t20());
        let chase = card.chase.unwrap();

        assert_eq!(chase.runs_needed, 120);
        assert_eq!(chase.balls_remaining, 114);
        assert!((chase.required_run_rate.unwrap() - 120.0 * 6.0 / 114.0).abs() < 1e-9);
        assert_eq!(chase.summary(), "Need 120 runs from 114 balls");
    }
}
