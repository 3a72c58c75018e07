//! Plain-text scorecards.

use std::fmt::Write;

use scoring_core::{Match, RosterOracle, Scorecard};

/// One innings as printed on a scoresheet.
pub fn render_scorecard(card: &Scorecard) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} innings: {}  RR {:.2}  [{}]",
        card.batting_team,
        card.headline(),
        card.run_rate,
        card.status
    );
    if let Some(chase) = &card.chase {
        let rate = chase
            .required_run_rate
            .map(|rrr| format!("  RRR {rrr:.2}"))
            .unwrap_or_default();
        let _ = writeln!(out, "Target {}. {}{}", chase.target, chase.summary(), rate);
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<22} {:<28} {:>4} {:>4} {:>3} {:>3} {:>7}",
        "Batter", "", "R", "B", "4s", "6s", "SR"
    );
    for batter in &card.batting {
        let _ = writeln!(
            out,
            "{:<22} {:<28} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            batter.name,
            batter.status(),
            batter.runs,
            batter.balls,
            batter.fours,
            batter.sixes,
            batter.strike_rate()
        );
    }

    let extras = card.extras();
    let _ = writeln!(
        out,
        "Extras {} (w {}, nb {}, b {}, lb {})",
        extras.total(),
        extras.wides,
        extras.no_balls,
        extras.byes,
        extras.leg_byes
    );

    if !card.fall_of_wickets.is_empty() {
        let falls: Vec<String> = card.fall_of_wickets.iter().map(|f| f.summary()).collect();
        let _ = writeln!(out, "Fall of wickets: {}", falls.join(", "));
    }
    if let [first, second] = card.current_partnership.batsmen[..] {
        let _ = writeln!(
            out,
            "Partnership: {} ({}) between {} and {}",
            card.current_partnership.runs, card.current_partnership.balls, first, second
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<22} {:>5} {:>3} {:>4} {:>3} {:>6}",
        "Bowler", "O", "M", "R", "W", "Econ"
    );
    for bowler in &card.bowling {
        let _ = writeln!(
            out,
            "{:<22} {:>5} {:>3} {:>4} {:>3} {:>6.2}",
            bowler.name,
            bowler.overs.to_string(),
            bowler.maidens,
            bowler.runs,
            bowler.wickets,
            bowler.economy()
        );
    }

    if !card.phases.is_empty() {
        let _ = writeln!(out);
        for split in &card.phases {
            let _ = writeln!(
                out,
                "{:<10} overs {:>2}-{:<2} {:>4}/{:<2} RR {:.2}",
                split.phase.to_string(),
                split.first_over,
                split.last_over,
                split.totals.runs,
                split.totals.wickets,
                split.run_rate()
            );
        }
    }
    out
}

/// Fixture header, result and every innings.
pub fn render_match(fixture: &Match, cards: &[Scorecard], roster: &dyn RosterOracle) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} v {} ({}, {} overs)",
        roster.team_name(fixture.home),
        roster.team_name(fixture.away),
        fixture.id,
        fixture.format.overs
    );
    let _ = writeln!(
        out,
        "{}",
        fixture
            .result_text
            .clone()
            .unwrap_or_else(|| fixture.status.to_string())
    );
    for card in cards {
        let _ = writeln!(out);
        out.push_str(&render_scorecard(card));
    }
    out
}
