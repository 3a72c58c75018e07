//! Match lifecycle: innings order from the toss, second-innings handover,
//! match completion and result.

use crate::aggregate::InningsTotals;
use crate::config::MatchFormat;
use crate::env::RosterOracle;
use crate::state::{Innings, InningsId, Match, MatchStatus, TeamId, TossDecision};

use super::innings::{CompletionReason, Transition};
use super::result::MatchResult;

/// `(batting, bowling)` for the first innings, or `None` before the toss.
pub fn batting_order(fixture: &Match) -> Option<(TeamId, TeamId)> {
    let toss = fixture.toss?;
    let other = fixture.opponent(toss.winner)?;
    Some(match toss.decision {
        TossDecision::Bat => (toss.winner, other),
        TossDecision::Bowl => (other, toss.winner),
    })
}

/// Result of the innings played so far.
pub fn compute_result(innings: &[Innings], format: &MatchFormat) -> MatchResult {
    match innings {
        [] => MatchResult::NoResult,
        [first] => MatchResult::from_innings(first, None, format),
        [first, second, ..] => MatchResult::from_innings(first, Some(second), format),
    }
}

/// Drives a fixture and its innings list through the match lifecycle.
///
/// The controller never fails: calls that do not fit the current state
/// return [`Transition::Ignored`] and change nothing.
pub struct MatchController<'a> {
    fixture: &'a mut Match,
}

impl<'a> MatchController<'a> {
    pub fn new(fixture: &'a mut Match) -> Self {
        Self { fixture }
    }

    /// `scheduled -> in_progress`, creating and starting the first innings.
    pub fn begin(&mut self, innings: &mut Vec<Innings>) -> Transition {
        if self.fixture.status != MatchStatus::Scheduled || !innings.is_empty() {
            return Transition::Ignored;
        }
        let Some((batting, bowling)) = batting_order(self.fixture) else {
            return Transition::Ignored;
        };

        let mut first = Innings::new(InningsId::first(self.fixture.id), batting, bowling);
        let _ = first.start();
        innings.push(first);
        self.fixture.status = MatchStatus::InProgress;
        Transition::Applied
    }

    /// Closes the first innings if still open and starts the second with the
    /// teams swapped and the target set. Blocked once two innings exist.
    pub fn start_next_innings(&mut self, innings: &mut Vec<Innings>) -> Transition {
        if self.fixture.status != MatchStatus::InProgress || innings.len() != 1 {
            return Transition::Ignored;
        }

        let first = &mut innings[0];
        let _ = first.complete(CompletionReason::Closed);
        let target = first.runs() + 1;
        let (batting, bowling) = (first.bowling_team, first.batting_team);

        let mut second =
            Innings::new(InningsId::second(self.fixture.id), batting, bowling).with_target(target);
        let _ = second.start();
        innings.push(second);
        Transition::Applied
    }

    /// Closes any open innings, records the result and completes the match.
    /// A no-op on a match that is already completed or cancelled.
    pub fn end_match(&mut self, innings: &mut [Innings], roster: &dyn RosterOracle) -> Transition {
        if self.fixture.is_finished() {
            return Transition::Ignored;
        }

        for open in innings.iter_mut() {
            let _ = open.complete(CompletionReason::Closed);
        }
        let result = compute_result(innings, &self.fixture.format);
        self.fixture.result_text = Some(result.describe(roster));
        self.fixture.result = Some(result);
        self.fixture.status = MatchStatus::Completed;
        Transition::Applied
    }

    /// Follows an innings completion: hands over to the second innings, or
    /// completes the match once the second innings is over.
    pub fn advance(&mut self, innings: &mut Vec<Innings>, roster: &dyn RosterOracle) -> Transition {
        let last_completed = innings.last().is_some_and(Innings::is_completed);
        match (innings.len(), last_completed) {
            (1, true) => self.start_next_innings(innings),
            (2, true) => self.end_match(innings, roster),
            _ => Transition::Ignored,
        }
    }

    /// Takes back the [`advance`](Self::advance) that followed an innings
    /// completion, once the completing delivery has been undone.
    ///
    /// `reopened` replaces its stored record. Later innings are dropped, and
    /// a completed match returns to in progress with its result cleared.
    /// Ignored if `reopened` is not in progress, or if a later innings has
    /// already had a ball bowled.
    pub fn reopen(&mut self, innings: &mut Vec<Innings>, reopened: Innings) -> Transition {
        if self.fixture.status == MatchStatus::Cancelled || !reopened.is_in_progress() {
            return Transition::Ignored;
        }
        let Some(index) = innings.iter().position(|i| i.id == reopened.id) else {
            return Transition::Ignored;
        };
        if innings[index + 1..]
            .iter()
            .any(|later| later.totals != InningsTotals::default())
        {
            return Transition::Ignored;
        }

        innings.truncate(index);
        innings.push(reopened);
        self.fixture.status = MatchStatus::InProgress;
        self.fixture.result = None;
        self.fixture.result_text = None;
        Transition::Applied
    }

    pub fn cancel(&mut self) -> Transition {
        if self.fixture.is_finished() {
            return Transition::Ignored;
        }
        self.fixture.status = MatchStatus::Cancelled;
        Transition::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::fixtures::{AWAY, HOME, roster};
    use crate::state::{InningsNumber, MatchId};

    fn fixture(decision: TossDecision) -> Match {
        Match::new(MatchId(7), HOME, AWAY, MatchFormat::t20()).with_toss(AWAY, decision)
    }

    #[test]
    fn toss_decides_who_bats_first() {
        assert_eq!(batting_order(&fixture(TossDecision::Bat)), Some((AWAY, HOME)));
        assert_eq!(batting_order(&fixture(TossDecision::Bowl)), Some((HOME, AWAY)));

        let no_toss = Match::new(MatchId(7), HOME, AWAY, MatchFormat::t20());
        assert_eq!(batting_order(&no_toss), None);
    }

    #[test]
    fn begin_creates_the_first_innings_once() {
        let mut fixture = fixture(TossDecision::Bowl);
        let mut innings = Vec::new();
        let mut controller = MatchController::new(&mut fixture);

        assert_eq!(controller.begin(&mut innings), Transition::Applied);
        assert_eq!(controller.begin(&mut innings), Transition::Ignored);
        assert_eq!(innings.len(), 1);
        assert_eq!(innings[0].batting_team, HOME);
        assert!(innings[0].is_in_progress());
        assert_eq!(fixture.status, MatchStatus::InProgress);
    }

    #[test]
    fn second_innings_swaps_teams_and_sets_target() {
        let mut fixture = fixture(TossDecision::Bowl);
        let mut innings = Vec::new();
        let mut controller = MatchController::new(&mut fixture);
        let _ = controller.begin(&mut innings);
        innings[0].totals.runs = 150;

        assert_eq!(controller.start_next_innings(&mut innings), Transition::Applied);
        assert_eq!(controller.start_next_innings(&mut innings), Transition::Ignored);
        assert_eq!(innings.len(), 2);

        assert_eq!(innings[0].completion, Some(CompletionReason::Closed));
        let second = &innings[1];
        assert_eq!(second.number(), InningsNumber::Second);
        assert_eq!((second.batting_team, second.bowling_team), (AWAY, HOME));
        assert_eq!(second.target, Some(151));
        assert!(second.is_in_progress());
    }

    #[test]
    fn advance_follows_innings_completion() {
        let roster = roster();
        let mut fixture = fixture(TossDecision::Bowl);
        let mut innings = Vec::new();
        let mut controller = MatchController::new(&mut fixture);
        let _ = controller.begin(&mut innings);

        assert_eq!(controller.advance(&mut innings, &roster), Transition::Ignored);

        innings[0].totals.runs = 150;
        let _ = innings[0].complete(CompletionReason::OversComplete);
        assert_eq!(controller.advance(&mut innings, &roster), Transition::Applied);
        assert_eq!(innings.len(), 2);

        innings[1].totals.runs = 151;
        innings[1].totals.wickets = 4;
        innings[1].totals.legal_balls = 110;
        let _ = innings[1].complete(CompletionReason::TargetChased);
        assert_eq!(controller.advance(&mut innings, &roster), Transition::Applied);

        assert!(fixture.is_completed());
        assert_eq!(fixture.winner(), Some(AWAY));
        assert_eq!(
            fixture.result_text.as_deref(),
            Some("Hawks won by 6 wickets (10 balls remaining)")
        );
    }

    #[test]
    fn reopen_withdraws_the_result_and_the_unplayed_chase() {
        let roster = roster();
        let mut fixture = fixture(TossDecision::Bowl);
        let mut innings = Vec::new();
        let mut controller = MatchController::new(&mut fixture);
        let _ = controller.begin(&mut innings);

        innings[0].totals.runs = 150;
        innings[0].totals.wickets = 10;
        let _ = innings[0].complete(CompletionReason::AllOut);
        let _ = controller.advance(&mut innings, &roster);
        assert_eq!(innings.len(), 2);

        let mut first = innings[0].clone();
        first.totals.wickets = 9;
        let _ = first.reopen();
        assert_eq!(controller.reopen(&mut innings, first), Transition::Applied);
        assert_eq!(innings.len(), 1);
        assert!(innings[0].is_in_progress());
        assert_eq!(innings[0].wickets(), 9);

        innings[0].totals.wickets = 10;
        let _ = innings[0].complete(CompletionReason::AllOut);
        let _ = controller.advance(&mut innings, &roster);
        innings[1].totals.runs = 151;
        innings[1].totals.legal_balls = 30;
        let _ = innings[1].complete(CompletionReason::TargetChased);
        let _ = controller.advance(&mut innings, &roster);
        assert!(fixture_completed(&controller));

        let mut second = innings[1].clone();
        second.totals.runs = 147;
        let _ = second.reopen();
        assert_eq!(controller.reopen(&mut innings, second), Transition::Applied);
        assert_eq!(innings.len(), 2);
        assert!(innings[1].is_in_progress());
        assert_eq!(fixture.status, MatchStatus::InProgress);
        assert_eq!(fixture.result, None);
        assert_eq!(fixture.result_text, None);
    }

    #[test]
    fn reopen_keeps_a_chase_that_is_under_way() {
        let roster = roster();
        let mut fixture = fixture(TossDecision::Bowl);
        let mut innings = Vec::new();
        let mut controller = MatchController::new(&mut fixture);
        let _ = controller.begin(&mut innings);
        let _ = innings[0].complete(CompletionReason::OversComplete);
        let _ = controller.advance(&mut innings, &roster);
        innings[1].totals.runs = 4;
        innings[1].totals.legal_balls = 1;

        let mut first = innings[0].clone();
        let _ = first.reopen();
        assert_eq!(controller.reopen(&mut innings, first), Transition::Ignored);
        assert_eq!(innings.len(), 2);
        assert!(innings[0].is_completed());
    }

    fn fixture_completed(controller: &MatchController<'_>) -> bool {
        controller.fixture.is_completed()
    }

    #[test]
    fn ending_a_finished_match_is_a_no_op() {
        let roster = roster();
        let mut fixture = fixture(TossDecision::Bat);
        let mut innings = Vec::new();
        let mut controller = MatchController::new(&mut fixture);
        let _ = controller.begin(&mut innings);

        assert_eq!(controller.end_match(&mut innings, &roster), Transition::Applied);
        assert_eq!(controller.end_match(&mut innings, &roster), Transition::Ignored);
        assert_eq!(controller.cancel(), Transition::Ignored);
        assert_eq!(controller.start_next_innings(&mut innings), Transition::Ignored);

        assert_eq!(fixture.result, Some(MatchResult::NoResult));
        assert!(innings[0].is_completed());
    }
}
