//! Per-bowler figures derived from the delivery log.

use crate::config::MatchFormat;
use crate::env::RosterOracle;
use crate::overs::{Overs, group_overs};
use crate::state::{Delivery, DeliveryOutcome, PlayerId};

use super::appearance_order;

/// Bowling figures for one player in one innings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BowlingFigures {
    pub player: PlayerId,
    pub name: String,
    pub overs: Overs,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub dots: u32,
    pub wides: u32,
    pub no_balls: u32,
}

impl BowlingFigures {
    /// Runs per over, 0 before the first legal ball.
    pub fn economy(&self) -> f64 {
        let overs = self.overs.as_decimal();
        if overs == 0.0 {
            return 0.0;
        }
        f64::from(self.runs) / overs
    }

    /// `O-M-R-W` as printed on a scorecard.
    pub fn summary(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.overs, self.maidens, self.runs, self.wickets
        )
    }
}

/// Figures for one bowler, or `None` if the player is not on the roster.
pub fn bowling_figures(
    log: &[Delivery],
    player: PlayerId,
    roster: &dyn RosterOracle,
    format: &MatchFormat,
) -> Option<BowlingFigures> {
    let name = roster.player_name(player)?;
    let bowled: Vec<&Delivery> = log.iter().filter(|d| d.bowler == player).collect();

    let mut figures = BowlingFigures {
        player,
        name: name.to_owned(),
        overs: Overs::new(0, format.balls_per_over),
        maidens: 0,
        runs: 0,
        wickets: 0,
        dots: 0,
        wides: 0,
        no_balls: 0,
    };

    let mut legal_balls = 0;
    for delivery in &bowled {
        figures.runs += delivery.runs_conceded();
        if delivery.is_legal() {
            legal_balls += 1;
        }
        if delivery.is_dot() {
            figures.dots += 1;
        }
        match delivery.outcome {
            DeliveryOutcome::Wide => figures.wides += 1,
            DeliveryOutcome::NoBall => figures.no_balls += 1,
            DeliveryOutcome::Wicket { wicket, .. } if wicket.credits_bowler() => {
                figures.wickets += 1
            }
            _ => {}
        }
    }

    figures.overs = Overs::new(legal_balls, format.balls_per_over);
    figures.maidens = group_overs(bowled.iter().copied(), format.balls_per_over)
        .iter()
        .filter(|over| over.is_maiden())
        .count() as u32;

    Some(figures)
}

/// Bowling card in order of first delivery bowled.
///
/// Players missing from the roster are left out.
pub fn bowling_card(
    log: &[Delivery],
    roster: &dyn RosterOracle,
    format: &MatchFormat,
) -> Vec<BowlingFigures> {
    appearance_order(log.iter().map(|d| d.bowler))
        .into_iter()
        .filter_map(|player| bowling_figures(log, player, roster, format))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::fixtures::roster;
    use crate::state::delivery::fixtures::*;
    use crate::state::{ExtraKind, WicketKind};

    fn figures_for(entries: &[(DeliveryOutcome, u8, u8)]) -> BowlingFigures {
        bowling_figures(&log(entries), BOWLER, &roster(), &MatchFormat::t20()).unwrap()
    }

    #[test]
    fn runs_conceded_include_extras() {
        let figures = figures_for(&[
            regular(4),
            extra(ExtraKind::Wide, 1),
            extra(ExtraKind::NoBall, 1),
            extra(ExtraKind::Bye, 2),
        ]);
        assert_eq!(figures.runs, 8);
        assert_eq!(figures.wides, 1);
        assert_eq!(figures.no_balls, 1);
        assert_eq!(figures.overs.legal_balls(), 2);
    }

    #[test]
    fn run_outs_are_not_bowler_wickets() {
        let figures = figures_for(&[
            wicket(WicketKind::Bowled, None),
            wicket(WicketKind::RunOut, Some(PlayerId(13))),
            wicket(WicketKind::Stumped, Some(PlayerId(21))),
            wicket(WicketKind::Other, None),
        ]);
        assert_eq!(figures.wickets, 2);
        assert_eq!(figures.dots, 4);
    }

    #[test]
    fn maiden_counted_only_for_a_clean_complete_over() {
        let mut entries = vec![regular(0); 6];
        entries.extend([regular(0), regular(0), regular(1), regular(0), regular(0), regular(0)]);
        entries.extend([regular(0); 3]);
        let figures = figures_for(&entries);

        assert_eq!(figures.maidens, 1);
        assert_eq!(figures.overs.to_string(), "2.3");
        assert_eq!(figures.summary(), "2.3-1-1-0");
    }

    #[test]
    fn a_wide_spoils_the_maiden() {
        let mut entries = vec![extra(ExtraKind::Wide, 1)];
        entries.extend([regular(0); 6]);
        assert_eq!(figures_for(&entries).maidens, 0);
    }

    #[test]
    fn economy_guards_against_zero_overs() {
        let figures = figures_for(&[extra(ExtraKind::Wide, 1)]);
        assert_eq!(figures.economy(), 0.0);

        let figures = figures_for(&[regular(1); 6]);
        assert_eq!(figures.economy(), 6.0);
    }

    #[test]
    fn maidens_group_only_this_bowlers_balls() {
        // Player 20 bowls the first and third overs, both clean.
        let mut entries = vec![regular(0); 6];
        entries.extend([regular(2); 6]);
        entries.extend([regular(0); 6]);
        let deliveries = log_with(&entries, |idx| {
            let bowler = if (idx / 6) % 2 == 0 { BOWLER } else { PlayerId(21) };
            (STRIKER, NON_STRIKER, bowler)
        });

        let card = bowling_card(&deliveries, &roster(), &MatchFormat::t20());
        assert_eq!(card.len(), 2);
        assert_eq!(card[0].player, BOWLER);
        assert_eq!(card[0].maidens, 2);
        assert_eq!(card[1].maidens, 0);
        assert_eq!(card[1].runs, 12);
    }
}
