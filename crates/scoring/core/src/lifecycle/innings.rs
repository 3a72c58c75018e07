//! Innings state machine: `not_started -> in_progress -> completed`.

use crate::config::MatchFormat;
use crate::state::{Innings, InningsStatus};

/// Why an innings reached its terminal state.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CompletionReason {
    AllOut,
    OversComplete,
    TargetChased,
    /// Closed by the scorer (start of the next innings or end of the match).
    Closed,
}

impl CompletionReason {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::AllOut => "all out",
            Self::OversComplete => "overs complete",
            Self::TargetChased => "target reached",
            Self::Closed => "innings closed",
        }
    }

    /// Whether the innings ended on a delivery rather than by the scorer.
    pub const fn follows_delivery(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Result of a lifecycle call. Calls that make no sense in the current
/// state are ignored rather than rejected, so repeating one is harmless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl Innings {
    /// The terminal condition the totals have met, if any.
    ///
    /// A successful chase takes precedence: the winning run can come off the
    /// last ball of the last over.
    pub fn completion_reason(&self, format: &MatchFormat) -> Option<CompletionReason> {
        let totals = &self.totals;
        if let Some(target) = self.target
            && self.is_second()
            && totals.runs >= target
        {
            return Some(CompletionReason::TargetChased);
        }
        if totals.wickets >= u32::from(format.wickets) {
            return Some(CompletionReason::AllOut);
        }
        if totals.legal_balls >= format.balls_per_innings() {
            return Some(CompletionReason::OversComplete);
        }
        None
    }

    /// `not_started -> in_progress`.
    pub fn start(&mut self) -> Transition {
        if self.status != InningsStatus::NotStarted {
            return Transition::Ignored;
        }
        self.status = InningsStatus::InProgress;
        Transition::Applied
    }

    /// `in_progress -> completed`.
    pub fn complete(&mut self, reason: CompletionReason) -> Transition {
        if self.status != InningsStatus::InProgress {
            return Transition::Ignored;
        }
        self.status = InningsStatus::Completed;
        self.completion = Some(reason);
        Transition::Applied
    }

    /// `completed -> in_progress`, once the delivery that completed the
    /// innings has been taken back. Innings closed by the scorer stay closed.
    pub fn reopen(&mut self) -> Option<CompletionReason> {
        let reason = self.completion.filter(|r| r.follows_delivery())?;
        if self.status != InningsStatus::Completed {
            return None;
        }
        self.status = InningsStatus::InProgress;
        self.completion = None;
        Some(reason)
    }

    /// Completes the innings if a terminal condition has been reached.
    pub fn evaluate(&mut self, format: &MatchFormat) -> Option<CompletionReason> {
        let reason = self.completion_reason(format)?;
        self.complete(reason).is_applied().then_some(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{InningsId, MatchId, TeamId};

    fn innings() -> Innings {
        let mut innings = Innings::new(InningsId::first(MatchId(1)), TeamId(1), TeamId(2));
        let _ = innings.start();
        innings
    }

    #[test]
    fn transitions_are_one_way() {
        let mut innings = innings();
        assert!(innings.is_in_progress());
        assert_eq!(innings.start(), Transition::Ignored);

        assert_eq!(innings.complete(CompletionReason::Closed), Transition::Applied);
        assert_eq!(innings.complete(CompletionReason::AllOut), Transition::Ignored);
        assert_eq!(innings.completion, Some(CompletionReason::Closed));
        assert_eq!(innings.start(), Transition::Ignored);
    }

    #[test]
    fn all_out_at_ten_wickets() {
        let format = MatchFormat::t20();
        let mut innings = innings();
        innings.totals.wickets = 9;
        assert_eq!(innings.evaluate(&format), None);
        innings.totals.wickets = 10;
        assert_eq!(innings.evaluate(&format), Some(CompletionReason::AllOut));
        assert!(innings.is_completed());
    }

    #[test]
    fn overs_complete_after_the_last_legal_ball() {
        let format = MatchFormat::custom(2);
        let mut innings = innings();
        innings.totals.legal_balls = 11;
        assert_eq!(innings.completion_reason(&format), None);
        innings.totals.legal_balls = 12;
        assert_eq!(
            innings.completion_reason(&format),
            Some(CompletionReason::OversComplete)
        );
    }

    #[test]
    fn target_only_applies_to_the_second_innings() {
        let format = MatchFormat::t20();
        let mut first = innings().with_target(10);
        first.totals.runs = 50;
        assert_eq!(first.completion_reason(&format), None);

        let mut second =
            Innings::new(InningsId::second(MatchId(1)), TeamId(2), TeamId(1)).with_target(151);
        second.totals.runs = 150;
        second.totals.legal_balls = 120;
        assert_eq!(
            second.completion_reason(&format),
            Some(CompletionReason::OversComplete)
        );
        second.totals.runs = 151;
        assert_eq!(
            second.completion_reason(&format),
            Some(CompletionReason::TargetChased)
        );
    }

    #[test]
    fn only_innings_ended_by_a_delivery_reopen() {
        let format = MatchFormat::t20();
        let mut innings = innings();
        innings.totals.wickets = 10;
        let _ = innings.evaluate(&format);

        innings.totals.wickets = 9;
        assert_eq!(innings.reopen(), Some(CompletionReason::AllOut));
        assert!(innings.is_in_progress());
        assert_eq!(innings.completion, None);
        assert_eq!(innings.reopen(), None);

        let _ = innings.complete(CompletionReason::Closed);
        assert_eq!(innings.reopen(), None);
        assert!(innings.is_completed());
    }

    #[test]
    fn evaluate_on_a_finished_innings_is_a_no_op() {
        let format = MatchFormat::t20();
        let mut innings = innings();
        let _ = innings.complete(CompletionReason::Closed);
        innings.totals.wickets = 10;
        assert_eq!(innings.evaluate(&format), None);
        assert_eq!(innings.completion, Some(CompletionReason::Closed));
    }
}
