//! The scoring session: one match, one scorer.
//!
//! A session owns a working copy of the fixture, its innings and the live
//! innings being scored. Every accepted action is applied through
//! [`ScoringEngine`], written through to the repositories, and announced on
//! the [`EventBus`]. Persistence failures after an accepted action are logged
//! and do not undo the action.

use scoring_core::{
    ActionOutcome, CompletionReason, Crease, Delivery, Innings, InningsId, InningsNumber,
    InningsStatus, LiveInnings, Match, MatchController, MatchId, MatchStatus, Roster,
    RosterOracle, ScoringAction, ScoringEngine, ScoringEvent, Scorecard, Transition,
};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::events::{Event, EventBus, LifecycleEvent, ScoringUpdate};
use crate::repository::Repositories;
use crate::setup::SetupBridge;

pub struct ScoringSession {
    fixture: Match,
    innings: Vec<Innings>,
    live: Option<LiveInnings>,
    /// The innings the last delivery completed, kept so that delivery can
    /// still be undone until the next one is bowled.
    settled: Option<LiveInnings>,
    repos: Repositories,
    roster: Roster,
    bus: EventBus,
    config: SessionConfig,
    /// Accepted actions since the session opened.
    mutations: u64,
}

impl ScoringSession {
    /// Opens a session for `match_id`.
    ///
    /// A scheduled match is started (first innings created from the toss). An
    /// innings already in progress is resumed from its stored delivery log.
    /// The opening selection left in `bridge` is consumed and applied if the
    /// live innings has no deliveries yet.
    pub fn open(
        match_id: MatchId,
        repos: Repositories,
        bridge: &SetupBridge,
        bus: EventBus,
        config: SessionConfig,
    ) -> Result<Self> {
        let fixture = repos
            .matches
            .get(match_id)?
            .ok_or(SessionError::MatchNotFound(match_id))?;
        let roster = repos.roster.snapshot()?;
        let innings = repos.innings.list_for_match(match_id)?;

        let mut session = Self {
            fixture,
            innings,
            live: None,
            settled: None,
            repos,
            roster,
            bus,
            config,
            mutations: 0,
        };

        if session.fixture.status == MatchStatus::Scheduled {
            if session.fixture.toss.is_none() {
                return Err(SessionError::TossMissing(match_id));
            }
            let _ = session.drive(|controller, innings, _| controller.begin(innings));
        } else {
            session.resume()?;
            session.settled = session.load_settled()?;
        }

        let selection = bridge.take(match_id)?;
        if let Some(selection) = selection
            && let Some(live) = session.live.as_mut()
        {
            if live.log().is_empty() {
                live.set_crease(selection.crease());
                tracing::debug!(match_id = %match_id, ?selection, "Applied opening selection");
            } else {
                tracing::debug!(
                    match_id = %match_id,
                    "Ignoring opening selection for an innings already under way"
                );
            }
        }

        tracing::info!(
            match_id = %match_id,
            status = %session.fixture.status,
            innings = session.innings.len(),
            "Scoring session opened"
        );
        Ok(session)
    }

    /// Rebuilds the live innings from the repositories, repairing stored
    /// totals that disagree with the log.
    fn resume(&mut self) -> Result<()> {
        if self.fixture.status != MatchStatus::InProgress {
            return Ok(());
        }
        let Some(current) = self.innings.last().filter(|i| i.is_in_progress()) else {
            return Ok(());
        };

        let log = self.repos.deliveries.list(current.id)?;
        let stored = current.totals;
        let live = LiveInnings::resume(current.clone(), log, self.fixture.format);

        let fresh = live.innings().totals;
        if fresh != stored {
            tracing::warn!(
                innings = %current.id,
                stored_runs = stored.runs,
                fresh_runs = fresh.runs,
                "Stored innings totals disagree with the delivery log; repairing"
            );
            self.publish_lifecycle(LifecycleEvent::TotalsRepaired {
                innings: current.id,
                stale: stored,
                fresh,
            });
        }

        tracing::debug!(
            innings = %current.id,
            deliveries = live.log().len(),
            over = live.over(),
            "Resumed live innings"
        );
        self.live = Some(live);
        self.sync_live();
        Ok(())
    }

    /// The last innings completed by a delivery, if nothing has been bowled
    /// since.
    fn load_settled(&self) -> Result<Option<LiveInnings>> {
        if self.fixture.status == MatchStatus::Cancelled
            || self.live.as_ref().is_some_and(|live| !live.log().is_empty())
        {
            return Ok(None);
        }
        let Some(settled) = self.innings.iter().rev().find(|i| i.is_completed()) else {
            return Ok(None);
        };
        if !settled
            .completion
            .is_some_and(CompletionReason::follows_delivery)
        {
            return Ok(None);
        }

        let log = self.repos.deliveries.list(settled.id)?;
        Ok(Some(LiveInnings::resume(
            settled.clone(),
            log,
            self.fixture.format,
        )))
    }

    /// Applies one scoring action to the live innings.
    ///
    /// `Undo` with nothing bowled in the live innings takes back the delivery
    /// that completed the previous one, together with the chase or result
    /// that followed it.
    pub fn record(&mut self, action: ScoringAction) -> Result<ActionOutcome> {
        if matches!(action, ScoringAction::Undo)
            && self.settled.is_some()
            && self.live.as_ref().is_none_or(|live| live.log().is_empty())
        {
            return self.reopen_settled();
        }

        let match_id = self.fixture.id;
        let live = self
            .live
            .as_mut()
            .ok_or(SessionError::NoActiveInnings { match_id })?;

        let outcome = ScoringEngine::new(live).apply(&action, now_millis())?;
        let innings_id = live.innings().id;
        self.mutations += 1;
        if action.is_delivery() {
            self.settled = None;
        }

        tracing::debug!(
            innings = %innings_id,
            action = action.as_str(),
            "Accepted scoring action"
        );

        self.write_through(&outcome.event);
        if self.config.verify_due(self.mutations) {
            self.verify();
        }
        self.sync_live();

        if let Some(live) = self.live.as_ref() {
            self.bus.publish(Event::Scoring(ScoringUpdate {
                innings: innings_id,
                event: outcome.event.clone(),
                totals: live.innings().totals,
            }));
        }

        if let Some(reason) = outcome.completed {
            self.on_innings_completed(reason);
        }
        Ok(outcome)
    }

    fn reopen_settled(&mut self) -> Result<ActionOutcome> {
        let match_id = self.fixture.id;
        let mut settled = self
            .settled
            .take()
            .ok_or(SessionError::NoActiveInnings { match_id })?;

        let outcome = match ScoringEngine::new(&mut settled).apply(&ScoringAction::Undo, now_millis())
        {
            Ok(outcome) => outcome,
            Err(error) => {
                self.settled = Some(settled);
                return Err(error.into());
            }
        };
        self.mutations += 1;
        self.write_through(&outcome.event);

        let record = settled.innings().clone();
        tracing::info!(
            innings = %record.id,
            score = %record.score_line(),
            reopened = ?outcome.reopened,
            "Completing delivery undone; innings reopened"
        );
        self.live = Some(settled);
        let _ = self.drive(|controller, innings, _| controller.reopen(innings, record));
        self.sync_live();

        if let Some(live) = self.live.as_ref() {
            self.bus.publish(Event::Scoring(ScoringUpdate {
                innings: live.innings().id,
                event: outcome.event.clone(),
                totals: live.innings().totals,
            }));
        }
        Ok(outcome)
    }

    /// Closes the first innings and starts the chase.
    pub fn start_next_innings(&mut self) -> Transition {
        self.drive(|controller, innings, _| controller.start_next_innings(innings))
    }

    /// Closes any open innings and completes the match with its result.
    pub fn end_match(&mut self) -> Transition {
        self.drive(|controller, innings, roster| controller.end_match(innings, roster))
    }

    pub fn cancel(&mut self) -> Transition {
        self.drive(|controller, _, _| controller.cancel())
    }

    /// Scorecard for one innings of this match, if it exists.
    pub fn scorecard(&self, number: InningsNumber) -> Result<Option<Scorecard>> {
        let Some(innings) = self.innings.iter().find(|i| i.number() == number) else {
            return Ok(None);
        };
        let log = self.log_of(innings)?;
        Ok(Some(Scorecard::build(
            innings,
            &log,
            &self.roster,
            &self.fixture.format,
        )))
    }

    /// Scorecards for every innings played so far.
    pub fn scorecards(&self) -> Result<Vec<Scorecard>> {
        self.innings
            .iter()
            .map(|innings| {
                let log = self.log_of(innings)?;
                Ok(Scorecard::build(
                    innings,
                    &log,
                    &self.roster,
                    &self.fixture.format,
                ))
            })
            .collect()
    }

    pub fn fixture(&self) -> &Match {
        &self.fixture
    }

    pub fn innings(&self) -> &[Innings] {
        &self.innings
    }

    pub fn live(&self) -> Option<&LiveInnings> {
        self.live.as_ref()
    }

    pub fn crease(&self) -> Option<&Crease> {
        self.live.as_ref().map(LiveInnings::crease)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    fn log_of(&self, innings: &Innings) -> Result<Vec<Delivery>> {
        match self.live.as_ref() {
            Some(live) if live.innings().id == innings.id => Ok(live.log().to_vec()),
            _ => Ok(self.repos.deliveries.list(innings.id)?),
        }
    }

    fn write_through(&self, event: &ScoringEvent) {
        let written = match event {
            ScoringEvent::DeliveryRecorded { delivery } => {
                self.repos.deliveries.append(delivery)
            }
            ScoringEvent::DeliveryUndone { delivery } => self
                .repos
                .deliveries
                .remove_last(delivery.innings())
                .map(|_| ()),
            ScoringEvent::OverEnded { .. } | ScoringEvent::CreaseChanged { .. } => Ok(()),
        };
        if let Err(error) = written {
            tracing::warn!(%error, "Failed to write delivery log");
        }
    }

    fn verify(&mut self) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        let Some(stale) = live.verify_totals() else {
            return;
        };
        let innings = live.innings().id;
        let fresh = live.innings().totals;
        tracing::warn!(
            innings = %innings,
            stale_runs = stale.runs,
            fresh_runs = fresh.runs,
            "Running totals diverged from the delivery log; replaced with a recompute"
        );
        self.publish_lifecycle(LifecycleEvent::TotalsRepaired {
            innings,
            stale,
            fresh,
        });
    }

    /// Copies the live innings record into the innings list and persists it.
    fn sync_live(&mut self) {
        let Some(live) = self.live.as_ref() else {
            return;
        };
        let record = live.innings();
        if let Some(slot) = self.innings.iter_mut().find(|i| i.id == record.id) {
            *slot = record.clone();
        }
        if let Err(error) = self.repos.innings.upsert(record) {
            tracing::warn!(innings = %record.id, %error, "Failed to persist innings");
        }
    }

    fn on_innings_completed(&mut self, reason: CompletionReason) {
        let Some(live) = self.live.take() else {
            return;
        };
        let innings = live.innings();
        tracing::info!(
            innings = %innings.id,
            score = %innings.score_line(),
            reason = reason.describe(),
            "Innings completed"
        );
        self.publish_lifecycle(LifecycleEvent::InningsCompleted {
            innings: innings.id,
            reason,
            totals: innings.totals,
        });

        let _ = self.drive(|controller, innings, roster| controller.advance(innings, roster));
        self.settled = Some(live);
    }

    /// Runs a lifecycle transition, then persists and announces whatever it
    /// changed.
    fn drive<F>(&mut self, op: F) -> Transition
    where
        F: FnOnce(&mut MatchController<'_>, &mut Vec<Innings>, &Roster) -> Transition,
    {
        let before: Vec<(InningsId, InningsStatus)> =
            self.innings.iter().map(|i| (i.id, i.status)).collect();
        let was_completed = self.fixture.is_completed();
        let transition = {
            let mut controller = MatchController::new(&mut self.fixture);
            op(&mut controller, &mut self.innings, &self.roster)
        };
        if !transition.is_applied() {
            tracing::debug!(match_id = %self.fixture.id, "Lifecycle call ignored");
            return transition;
        }
        self.settled = None;

        if let Err(error) = self.repos.matches.upsert(&self.fixture) {
            tracing::warn!(match_id = %self.fixture.id, %error, "Failed to persist match");
        }

        let mut announcements = Vec::new();
        for (index, innings) in self.innings.iter().enumerate() {
            let was = before.get(index).map(|&(_, status)| status);
            if was == Some(innings.status) {
                continue;
            }
            if let Err(error) = self.repos.innings.upsert(innings) {
                tracing::warn!(innings = %innings.id, %error, "Failed to persist innings");
            }
            match (was, innings.status) {
                (None, InningsStatus::InProgress) => {
                    tracing::info!(
                        innings = %innings.id,
                        batting = %self.roster.team_name(innings.batting_team),
                        target = ?innings.target,
                        "Innings started"
                    );
                    announcements.push(LifecycleEvent::InningsStarted {
                        innings: innings.id,
                    });
                }
                (Some(InningsStatus::InProgress), InningsStatus::Completed) => {
                    let reason = innings.completion.unwrap_or(CompletionReason::Closed);
                    tracing::info!(
                        innings = %innings.id,
                        score = %innings.score_line(),
                        reason = reason.describe(),
                        "Innings closed"
                    );
                    announcements.push(LifecycleEvent::InningsCompleted {
                        innings: innings.id,
                        reason,
                        totals: innings.totals,
                    });
                }
                (Some(InningsStatus::Completed), InningsStatus::InProgress) => {
                    tracing::info!(innings = %innings.id, "Innings reopened");
                    announcements.push(LifecycleEvent::InningsReopened {
                        innings: innings.id,
                    });
                }
                _ => {}
            }
        }

        for &(id, _) in &before {
            if self.innings.iter().any(|i| i.id == id) {
                continue;
            }
            match self.repos.remove_innings(id) {
                Ok(deliveries) => {
                    tracing::info!(innings = %id, deliveries, "Innings discarded")
                }
                Err(error) => {
                    tracing::warn!(innings = %id, %error, "Failed to remove discarded innings")
                }
            }
            announcements.push(LifecycleEvent::InningsDiscarded { innings: id });
        }

        if was_completed && !self.fixture.is_completed() {
            tracing::info!(match_id = %self.fixture.id, "Match result withdrawn");
            announcements.push(LifecycleEvent::MatchReopened {
                match_id: self.fixture.id,
            });
        }

        if self.fixture.is_completed()
            && let Some(result) = self.fixture.result
        {
            let result_text = self.fixture.result_text.clone().unwrap_or_default();
            tracing::info!(match_id = %self.fixture.id, result = %result_text, "Match completed");
            announcements.push(LifecycleEvent::MatchCompleted {
                match_id: self.fixture.id,
                result,
                result_text,
            });
        }

        let current = match self.fixture.status {
            MatchStatus::InProgress => self.innings.last().filter(|i| i.is_in_progress()),
            _ => None,
        };
        self.live = match (current, self.live.take()) {
            (Some(current), Some(live)) if live.innings().id == current.id => Some(live),
            (Some(current), _) => Some(LiveInnings::new(current.clone(), self.fixture.format)),
            (None, _) => None,
        };

        for event in announcements {
            self.publish_lifecycle(event);
        }
        transition
    }

    fn publish_lifecycle(&self, event: LifecycleEvent) {
        self.bus.publish(Event::Lifecycle(event));
    }
}

/// Scorecards for every innings of a stored match, read straight from the
/// repositories.
pub fn match_scorecards(repos: &Repositories, match_id: MatchId) -> Result<Vec<Scorecard>> {
    let fixture = repos
        .matches
        .get(match_id)?
        .ok_or(SessionError::MatchNotFound(match_id))?;
    let roster = repos.roster.snapshot()?;

    repos
        .innings
        .list_for_match(match_id)?
        .iter()
        .map(|innings| {
            let log = repos.deliveries.list(innings.id)?;
            Ok(Scorecard::build(innings, &log, &roster, &fixture.format))
        })
        .collect()
}

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
