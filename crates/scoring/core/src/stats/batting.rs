//! Per-batsman figures derived from the delivery log.

use crate::config::MatchFormat;
use crate::env::RosterOracle;
use crate::state::{Delivery, PlayerId, WicketKind};

use super::appearance_order;

/// How and by whom a batsman was dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dismissal {
    pub wicket: WicketKind,
    /// Bowler credited with the wicket. `None` for run outs.
    pub bowler: Option<String>,
    /// Catcher or wicket-keeper, for dismissals that name one.
    pub fielder: Option<String>,
}

impl Dismissal {
    pub(crate) fn from_delivery(delivery: &Delivery, roster: &dyn RosterOracle) -> Option<Self> {
        let wicket = delivery.outcome.wicket()?;
        let bowler = wicket
            .credits_bowler()
            .then(|| roster.player_name(delivery.bowler))
            .flatten()
            .map(str::to_owned);
        let fielder = if wicket.requires_fielder() || wicket == WicketKind::RunOut {
            delivery
                .outcome
                .fielder()
                .and_then(|id| roster.player_name(id))
                .map(str::to_owned)
        } else {
            None
        };

        Some(Self {
            wicket,
            bowler,
            fielder,
        })
    }

    /// Scorecard abbreviation (`c`, `b`, `lbw`, ...).
    pub fn kind(&self) -> &'static str {
        self.wicket.abbreviation()
    }

    /// Full scorecard line, e.g. `c Smith b Jones` or `run out (Smith)`.
    pub fn description(&self) -> String {
        let bowler = self.bowler.as_deref().unwrap_or("?");
        match (self.wicket, self.fielder.as_deref()) {
            (WicketKind::Caught, Some(fielder)) if fielder == bowler => format!("c & b {bowler}"),
            (WicketKind::Caught | WicketKind::Stumped, Some(fielder)) => {
                format!("{} {fielder} b {bowler}", self.kind())
            }
            (WicketKind::RunOut, Some(fielder)) => format!("run out ({fielder})"),
            (WicketKind::RunOut | WicketKind::Other, _) => self.kind().to_string(),
            (WicketKind::Bowled, _) => format!("b {bowler}"),
            _ => format!("{} b {bowler}", self.kind()),
        }
    }
}

/// Batting figures for one player in one innings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattingFigures {
    pub player: PlayerId,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub dismissal: Option<Dismissal>,
}

impl BattingFigures {
    fn new(player: PlayerId, name: &str) -> Self {
        Self {
            player,
            name: name.to_owned(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            dismissal: None,
        }
    }

    pub fn is_out(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Name of the bowler credited with the dismissal.
    pub fn dismissed_by(&self) -> Option<&str> {
        self.dismissal.as_ref().and_then(|d| d.bowler.as_deref())
    }

    /// Runs per hundred balls, 0 before the first ball faced.
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        f64::from(self.runs) * 100.0 / f64::from(self.balls)
    }

    /// `not out` or the dismissal line.
    pub fn status(&self) -> String {
        self.dismissal
            .as_ref()
            .map(Dismissal::description)
            .unwrap_or_else(|| "not out".to_string())
    }

    fn record(&mut self, delivery: &Delivery, format: &MatchFormat, roster: &dyn RosterOracle) {
        if delivery.striker != self.player {
            return;
        }

        if delivery.is_legal() {
            self.balls += 1;
        }

        let runs = delivery.bat_runs();
        self.runs += runs;
        if runs > 0 && runs == u32::from(format.four) {
            self.fours += 1;
        } else if runs > 0 && runs == u32::from(format.six) {
            self.sixes += 1;
        }

        if delivery.is_wicket() {
            self.dismissal = Dismissal::from_delivery(delivery, roster);
        }
    }
}

/// Figures for one batsman, or `None` if the player is not on the roster.
pub fn batting_figures(
    log: &[Delivery],
    player: PlayerId,
    roster: &dyn RosterOracle,
    format: &MatchFormat,
) -> Option<BattingFigures> {
    let name = roster.player_name(player)?;
    let mut figures = BattingFigures::new(player, name);
    for delivery in log {
        figures.record(delivery, format, roster);
    }
    Some(figures)
}

/// Batting card in order of appearance at the crease.
///
/// Players missing from the roster are left out.
pub fn batting_card(
    log: &[Delivery],
    roster: &dyn RosterOracle,
    format: &MatchFormat,
) -> Vec<BattingFigures> {
    let order = appearance_order(log.iter().flat_map(|d| [d.striker, d.non_striker]));
    order
        .into_iter()
        .filter_map(|player| batting_figures(log, player, roster, format))
        .collect()
}
