//! Applying scoring actions to a live innings.
//!
//! The [`ScoringEngine`] is the only writer of a [`LiveInnings`]. Each action
//! is validated in full before anything changes, so a rejected action leaves
//! the log, totals and crease exactly as they were. Accepted deliveries
//! update the running totals incrementally and are followed by a check of
//! the innings completion rules.

mod action;
mod crease;
mod live;

pub use action::ScoringAction;
pub use crease::Crease;
pub use live::LiveInnings;

use crate::error::ScoringError;
use crate::lifecycle::CompletionReason;
use crate::state::{Delivery, DeliveryId, DeliveryOutcome, PlayerId};

/// Upper bound on runs (off the bat or as extras) from a single delivery.
pub const MAX_RUNS_PER_DELIVERY: u8 = 8;

/// What an accepted action changed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum ScoringEvent {
    DeliveryRecorded { delivery: Delivery },
    DeliveryUndone { delivery: Delivery },
    OverEnded { over: u32, runs: u32, maiden: bool },
    CreaseChanged { crease: Crease },
}

/// Outcome of an accepted action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub event: ScoringEvent,
    /// Set when the action completed the innings.
    pub completed: Option<CompletionReason>,
    /// Set when an undo took back the delivery that completed the innings.
    pub reopened: Option<CompletionReason>,
}

pub struct ScoringEngine<'a> {
    live: &'a mut LiveInnings,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(live: &'a mut LiveInnings) -> Self {
        Self { live }
    }

    /// Applies one action. `recorded_at` stamps any delivery it creates.
    ///
    /// A completed innings accepts only `Undo`, and only when a delivery
    /// completed it; undoing that delivery reopens the innings.
    pub fn apply(
        &mut self,
        action: &ScoringAction,
        recorded_at: u64,
    ) -> Result<ActionOutcome, ScoringError> {
        let reopening = matches!(action, ScoringAction::Undo)
            && self.live.innings.is_completed()
            && self
                .live
                .innings
                .completion
                .is_some_and(CompletionReason::follows_delivery);
        if !self.live.innings.is_in_progress() && !reopening {
            return Err(ScoringError::InningsNotInProgress {
                status: self.live.innings.status,
            });
        }

        let event = match *action {
            ScoringAction::Runs { runs } => {
                self.deliver(DeliveryOutcome::Regular, runs, 0, recorded_at)?
            }
            ScoringAction::Extra { kind, runs } => {
                self.deliver(kind.into(), 0, runs, recorded_at)?
            }
            ScoringAction::Wicket { kind, fielder } => self.deliver(
                DeliveryOutcome::Wicket {
                    wicket: kind,
                    fielder,
                },
                0,
                0,
                recorded_at,
            )?,
            ScoringAction::Undo => self.undo()?,
            ScoringAction::EndOver => self.end_over()?,
            ScoringAction::SelectBowler { bowler } => self.select_bowler(bowler)?,
            ScoringAction::SelectBatsman { batsman } => self.select_batsman(batsman)?,
            ScoringAction::SelectOpeners {
                striker,
                non_striker,
            } => self.select_openers(striker, non_striker)?,
        };

        let completed = if action.is_delivery() {
            let format = self.live.format;
            self.live.innings.evaluate(&format)
        } else {
            None
        };
        let reopened = if reopening {
            self.live.innings.reopen()
        } else {
            None
        };

        Ok(ActionOutcome {
            event,
            completed,
            reopened,
        })
    }

    fn deliver(
        &mut self,
        outcome: DeliveryOutcome,
        runs: u8,
        extras: u8,
        recorded_at: u64,
    ) -> Result<ScoringEvent, ScoringError> {
        let selection = self.live.crease.selection()?;
        if self.live.over_complete() {
            return Err(ScoringError::OverComplete {
                over: self.live.over + 1,
            });
        }
        if runs > MAX_RUNS_PER_DELIVERY || extras > MAX_RUNS_PER_DELIVERY {
            return Err(ScoringError::ImplausibleRuns {
                runs: runs.max(extras),
            });
        }

        let ball = self.live.balls_this_over() as u8 + 1;
        let delivery = Delivery {
            id: DeliveryId::new(self.live.innings.id, self.live.log.len() as u32 + 1),
            over: self.live.over,
            ball,
            striker: selection.striker,
            non_striker: selection.non_striker,
            bowler: selection.bowler,
            runs,
            extras,
            outcome,
            recorded_at,
        };
        delivery.validate(self.live.format.balls_per_over)?;

        self.live.innings.totals.apply(&delivery);
        self.live.crease = Crease::after(&delivery);
        self.live.log.push(delivery.clone());
        Ok(ScoringEvent::DeliveryRecorded { delivery })
    }

    fn undo(&mut self) -> Result<ScoringEvent, ScoringError> {
        let over = self.live.over;
        if !self.live.log.last().is_some_and(|d| d.over == over) {
            return Err(ScoringError::NothingToUndo);
        }
        let Some(delivery) = self.live.log.pop() else {
            return Err(ScoringError::NothingToUndo);
        };

        self.live.innings.totals.revert(&delivery);
        self.live.crease = Crease::before(&delivery);
        Ok(ScoringEvent::DeliveryUndone { delivery })
    }

    fn end_over(&mut self) -> Result<ScoringEvent, ScoringError> {
        let over = self.live.over;
        let balls = self.live.balls_this_over();
        if balls < u32::from(self.live.format.balls_per_over) {
            return Err(ScoringError::OverNotComplete {
                over: over + 1,
                balls,
            });
        }

        let runs = self.live.current_over().map(Delivery::runs_conceded).sum();
        let maiden = self.live.current_over().all(Delivery::is_dot);

        self.live.over += 1;
        self.live.crease.swap_ends();
        self.live.crease.bowler = None;
        Ok(ScoringEvent::OverEnded { over, runs, maiden })
    }

    fn select_bowler(&mut self, bowler: PlayerId) -> Result<ScoringEvent, ScoringError> {
        if self.live.previous_bowler() == Some(bowler) {
            return Err(ScoringError::ConsecutiveOvers { player: bowler });
        }
        self.live.crease.bowler = Some(bowler);
        Ok(self.crease_changed())
    }

    fn select_batsman(&mut self, batsman: PlayerId) -> Result<ScoringEvent, ScoringError> {
        self.check_available(batsman)?;
        let crease = &mut self.live.crease;
        if crease.striker.is_none() {
            crease.striker = Some(batsman);
        } else if crease.non_striker.is_none() {
            crease.non_striker = Some(batsman);
        } else {
            return Err(ScoringError::CreaseFull);
        }
        Ok(self.crease_changed())
    }

    fn select_openers(
        &mut self,
        striker: PlayerId,
        non_striker: PlayerId,
    ) -> Result<ScoringEvent, ScoringError> {
        if striker == non_striker {
            return Err(ScoringError::AlreadyAtCrease { player: striker });
        }
        for player in [striker, non_striker] {
            if self.live.dismissed().any(|p| p == player) {
                return Err(ScoringError::AlreadyDismissed { player });
            }
        }
        self.live.crease.striker = Some(striker);
        self.live.crease.non_striker = Some(non_striker);
        Ok(self.crease_changed())
    }

    fn check_available(&self, batsman: PlayerId) -> Result<(), ScoringError> {
        if self.live.crease.contains_batsman(batsman) {
            return Err(ScoringError::AlreadyAtCrease { player: batsman });
        }
        if self.live.dismissed().any(|p| p == batsman) {
            return Err(ScoringError::AlreadyDismissed { player: batsman });
        }
        Ok(())
    }

    fn crease_changed(&self) -> ScoringEvent {
        ScoringEvent::CreaseChanged {
            crease: self.live.crease,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchFormat;
    use crate::error::{CreaseRole, ScoringFailure};
    use crate::state::{ExtraKind, Innings, InningsId, MatchId, TeamId, WicketKind};

    const BOWLER: PlayerId = PlayerId(20);
    const CHANGE_BOWLER: PlayerId = PlayerId(21);

    fn live(format: MatchFormat) -> LiveInnings {
        let mut innings = Innings::new(InningsId::first(MatchId(1)), TeamId(1), TeamId(2));
        let _ = innings.start();
        let mut live = LiveInnings::new(innings, format);
        live.set_crease(Crease::new(PlayerId(1), PlayerId(2), BOWLER));
        live
    }

    fn apply(live: &mut LiveInnings, action: ScoringAction) -> Result<ActionOutcome, ScoringError> {
        ScoringEngine::new(live).apply(&action, 0)
    }

    fn apply_all(live: &mut LiveInnings, actions: &[ScoringAction]) {
        for action in actions {
            apply(live, *action).unwrap();
        }
    }

    #[test]
    fn six_singles_rotate_strike_every_ball() {
        let mut live = live(MatchFormat::t20());
        apply_all(&mut live, &[ScoringAction::runs(1); 6]);

        let strikers: Vec<_> = live.log().iter().map(|d| d.striker.0).collect();
        assert_eq!(strikers, vec![1, 2, 1, 2, 1, 2]);
        assert_eq!(live.innings().runs(), 6);
        assert_eq!(live.innings().totals.overs(6).as_decimal(), 1.0);
        assert_eq!(live.crease().striker, Some(PlayerId(1)));

        apply(&mut live, ScoringAction::EndOver).unwrap();
        assert_eq!(live.crease().striker, Some(PlayerId(2)));
        assert_eq!(live.crease().bowler, None);
        assert_eq!(live.over(), 1);
    }

    #[test]
    fn wide_then_five_dots_is_five_legal_balls() {
        let mut live = live(MatchFormat::t20());
        let mut actions = vec![ScoringAction::extra(ExtraKind::Wide, 1)];
        actions.extend([ScoringAction::runs(0); 5]);
        apply_all(&mut live, &actions);

        let totals = live.innings().totals;
        assert_eq!(totals.legal_balls, 5);
        assert_eq!(totals.runs, 1);
        assert_eq!(totals.overs(6).to_string(), "0.5");
        // The wide shares ball number 1 with the first legal delivery.
        let balls: Vec<_> = live.log().iter().map(|d| d.ball).collect();
        assert_eq!(balls, vec![1, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn missing_selection_rejects_without_mutation() {
        let mut live = live(MatchFormat::t20());
        live.set_crease(Crease {
            bowler: None,
            ..*live.crease()
        });
        let before = live.clone();

        let error = apply(&mut live, ScoringAction::runs(4)).unwrap_err();
        assert_eq!(
            error,
            ScoringError::MissingSelection {
                role: CreaseRole::Bowler
            }
        );
        assert!(error.severity().is_recoverable());
        assert_eq!(live, before);
    }

    #[test]
    fn invalid_delivery_is_rejected() {
        let mut live = live(MatchFormat::t20());
        let error = apply(&mut live, ScoringAction::wicket(WicketKind::Caught, None)).unwrap_err();
        assert!(matches!(error, ScoringError::InvalidDelivery(_)));
        assert!(live.log().is_empty());

        let error = apply(&mut live, ScoringAction::runs(12)).unwrap_err();
        assert_eq!(error, ScoringError::ImplausibleRuns { runs: 12 });
    }

    #[test]
    fn seventh_legal_ball_needs_end_over() {
        let mut live = live(MatchFormat::t20());
        apply_all(&mut live, &[ScoringAction::runs(0); 6]);

        assert_eq!(
            apply(&mut live, ScoringAction::runs(1)).unwrap_err(),
            ScoringError::OverComplete { over: 1 }
        );

        let outcome = apply(&mut live, ScoringAction::EndOver).unwrap();
        assert_eq!(
            outcome.event,
            ScoringEvent::OverEnded {
                over: 0,
                runs: 0,
                maiden: true
            }
        );
        assert_eq!(
            apply(&mut live, ScoringAction::runs(1)).unwrap_err(),
            ScoringError::MissingSelection {
                role: CreaseRole::Bowler
            }
        );
        assert_eq!(
            apply(&mut live, ScoringAction::SelectBowler { bowler: BOWLER }).unwrap_err(),
            ScoringError::ConsecutiveOvers { player: BOWLER }
        );
        apply(
            &mut live,
            ScoringAction::SelectBowler {
                bowler: CHANGE_BOWLER,
            },
        )
        .unwrap();
        let outcome = apply(&mut live, ScoringAction::runs(1)).unwrap();
        let ScoringEvent::DeliveryRecorded { delivery } = outcome.event else {
            panic!("expected a delivery");
        };
        assert_eq!((delivery.over, delivery.ball), (1, 1));
    }

    #[test]
    fn end_over_before_six_legal_balls_is_rejected() {
        let mut live = live(MatchFormat::t20());
        apply_all(&mut live, &[ScoringAction::runs(0), ScoringAction::extra(ExtraKind::Wide, 1)]);
        assert_eq!(
            apply(&mut live, ScoringAction::EndOver).unwrap_err(),
            ScoringError::OverNotComplete { over: 1, balls: 1 }
        );
    }

    #[test]
    fn undo_is_the_exact_inverse_of_the_last_delivery() {
        let mut live = live(MatchFormat::t20());
        apply_all(&mut live, &[ScoringAction::runs(2), ScoringAction::runs(3)]);
        let before = live.clone();

        apply(&mut live, ScoringAction::runs(1)).unwrap();
        let outcome = apply(&mut live, ScoringAction::Undo).unwrap();

        assert!(matches!(outcome.event, ScoringEvent::DeliveryUndone { .. }));
        assert_eq!(live, before);
    }

    #[test]
    fn undo_restores_a_dismissed_striker() {
        let mut live = live(MatchFormat::t20());
        apply(&mut live, ScoringAction::wicket(WicketKind::Bowled, None)).unwrap();
        assert_eq!(live.crease().striker, None);
        assert_eq!(live.innings().wickets(), 1);

        apply(&mut live, ScoringAction::SelectBatsman { batsman: PlayerId(3) }).unwrap();
        apply(&mut live, ScoringAction::Undo).unwrap();

        assert_eq!(live.crease().striker, Some(PlayerId(1)));
        assert_eq!(live.innings().wickets(), 0);
        assert!(live.log().is_empty());
    }

    #[test]
    fn undo_cannot_reach_into_a_finished_over() {
        let mut live = live(MatchFormat::t20());
        apply_all(&mut live, &[ScoringAction::runs(0); 6]);
        apply(&mut live, ScoringAction::EndOver).unwrap();

        assert_eq!(
            apply(&mut live, ScoringAction::Undo).unwrap_err(),
            ScoringError::NothingToUndo
        );
        assert_eq!(live.log().len(), 6);
    }

    #[test]
    fn run_out_dismisses_the_striker() {
        let mut live = live(MatchFormat::t20());
        apply(&mut live, ScoringAction::wicket(WicketKind::RunOut, Some(PlayerId(15)))).unwrap();

        assert_eq!(live.crease().striker, None);
        assert_eq!(live.crease().non_striker, Some(PlayerId(2)));
        assert_eq!(live.dismissed().collect::<Vec<_>>(), vec![PlayerId(1)]);
    }

    #[test]
    fn dismissed_batsman_cannot_return() {
        let mut live = live(MatchFormat::t20());
        apply(&mut live, ScoringAction::wicket(WicketKind::Lbw, None)).unwrap();

        assert_eq!(
            apply(&mut live, ScoringAction::SelectBatsman { batsman: PlayerId(1) }).unwrap_err(),
            ScoringError::AlreadyDismissed { player: PlayerId(1) }
        );
        assert_eq!(
            apply(&mut live, ScoringAction::SelectBatsman { batsman: PlayerId(2) }).unwrap_err(),
            ScoringError::AlreadyAtCrease { player: PlayerId(2) }
        );
        apply(&mut live, ScoringAction::SelectBatsman { batsman: PlayerId(3) }).unwrap();
        assert_eq!(
            apply(&mut live, ScoringAction::SelectBatsman { batsman: PlayerId(4) }).unwrap_err(),
            ScoringError::CreaseFull
        );
    }

    #[test]
    fn tenth_wicket_completes_the_innings() {
        let mut live = live(MatchFormat::t20());
        let mut completed = None;
        for n in 0..10u32 {
            let outcome = apply(&mut live, ScoringAction::wicket(WicketKind::Bowled, None)).unwrap();
            completed = outcome.completed;
            if n < 9 {
                assert_eq!(completed, None);
                let batsman = PlayerId(3 + n);
                apply(&mut live, ScoringAction::SelectBatsman { batsman }).unwrap();
                if live.over_complete() {
                    apply(&mut live, ScoringAction::EndOver).unwrap();
                    let bowler = if live.over() % 2 == 0 { BOWLER } else { CHANGE_BOWLER };
                    apply(&mut live, ScoringAction::SelectBowler { bowler }).unwrap();
                }
            }
        }

        assert_eq!(completed, Some(CompletionReason::AllOut));
        assert!(live.innings().is_completed());
        assert!(matches!(
            apply(&mut live, ScoringAction::runs(1)),
            Err(ScoringError::InningsNotInProgress { .. })
        ));
        assert!(matches!(
            apply(&mut live, ScoringAction::SelectBatsman { batsman: PlayerId(13) }),
            Err(ScoringError::InningsNotInProgress { .. })
        ));
    }

    #[test]
    fn undoing_the_completing_delivery_reopens_the_innings() {
        let mut innings =
            Innings::new(InningsId::second(MatchId(1)), TeamId(2), TeamId(1)).with_target(4);
        let _ = innings.start();
        let mut live = LiveInnings::new(innings, MatchFormat::t20());
        live.set_crease(Crease::new(PlayerId(12), PlayerId(13), PlayerId(1)));
        let before = live.clone();

        let outcome = apply(&mut live, ScoringAction::runs(4)).unwrap();
        assert_eq!(outcome.completed, Some(CompletionReason::TargetChased));

        let outcome = apply(&mut live, ScoringAction::Undo).unwrap();
        assert_eq!(outcome.reopened, Some(CompletionReason::TargetChased));
        assert_eq!(outcome.completed, None);
        assert_eq!(live, before);

        apply(&mut live, ScoringAction::runs(2)).unwrap();
        assert!(live.innings().is_in_progress());
        assert_eq!(live.innings().runs(), 2);
    }

    #[test]
    fn an_innings_closed_by_the_scorer_cannot_be_undone() {
        let mut live = live(MatchFormat::t20());
        apply(&mut live, ScoringAction::runs(1)).unwrap();
        let _ = live.innings.complete(CompletionReason::Closed);

        assert!(matches!(
            apply(&mut live, ScoringAction::Undo),
            Err(ScoringError::InningsNotInProgress { .. })
        ));
        assert_eq!(live.log().len(), 1);
    }

    #[test]
    fn chase_completes_on_reaching_the_target() {
        let mut innings =
            Innings::new(InningsId::second(MatchId(1)), TeamId(2), TeamId(1)).with_target(5);
        let _ = innings.start();
        let mut live = LiveInnings::new(innings, MatchFormat::t20());
        live.set_crease(Crease::new(PlayerId(12), PlayerId(13), PlayerId(1)));

        let outcome = apply(&mut live, ScoringAction::runs(4)).unwrap();
        assert_eq!(outcome.completed, None);
        let outcome = apply(&mut live, ScoringAction::extra(ExtraKind::Wide, 1)).unwrap();
        assert_eq!(outcome.completed, Some(CompletionReason::TargetChased));
    }

    #[test]
    fn resume_rebuilds_crease_and_over() {
        let mut live = live(MatchFormat::t20());
        apply_all(&mut live, &[ScoringAction::runs(1); 6]);
        let (innings, log) = live.clone().into_parts();

        let resumed = LiveInnings::resume(innings, log, MatchFormat::t20());
        assert_eq!(resumed.over(), 1);
        assert_eq!(resumed.crease().striker, Some(PlayerId(2)));
        assert_eq!(resumed.crease().bowler, None);
        assert_eq!(resumed.previous_bowler(), Some(BOWLER));
        assert_eq!(resumed.innings().totals, live.innings().totals);
    }

    #[test]
    fn verify_totals_repairs_a_stale_cache() {
        let mut live = live(MatchFormat::t20());
        apply_all(&mut live, &[ScoringAction::runs(4), ScoringAction::runs(2)]);
        assert_eq!(live.verify_totals(), None);

        live.innings.totals.runs = 99;
        let stale = live.verify_totals().unwrap();
        assert_eq!(stale.runs, 99);
        assert_eq!(live.innings().runs(), 6);
    }
}
