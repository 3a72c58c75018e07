use crate::aggregate::InningsTotals;
use crate::config::MatchFormat;
use crate::state::{Delivery, Innings, PlayerId};

use super::crease::Crease;

/// Working copy of the innings being scored: the record, its delivery log,
/// the crease and the over on the clock.
///
/// Only [`super::ScoringEngine`] mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveInnings {
    pub(crate) innings: Innings,
    pub(crate) log: Vec<Delivery>,
    pub(crate) crease: Crease,
    pub(crate) format: MatchFormat,
    /// 0-based over currently being bowled.
    pub(crate) over: u32,
}

impl LiveInnings {
    /// Fresh innings with an empty log.
    pub fn new(innings: Innings, format: MatchFormat) -> Self {
        Self {
            innings,
            log: Vec::new(),
            crease: Crease::default(),
            format,
            over: 0,
        }
    }

    /// Rebuilds the live state from a stored log.
    ///
    /// The totals are re-derived from the log and the crease is the one left
    /// by the last delivery. In an innings still in progress a complete last
    /// over is treated as ended.
    pub fn resume(mut innings: Innings, log: Vec<Delivery>, format: MatchFormat) -> Self {
        innings.totals = InningsTotals::from_log(&log);
        let mut live = Self::new(innings, format);

        if let Some(last) = log.last() {
            live.crease = Crease::after(last);
            live.over = last.over;
        }
        live.log = log;

        if live.innings.is_in_progress() && !live.log.is_empty() && live.over_complete() {
            live.over += 1;
            live.crease.swap_ends();
            live.crease.bowler = None;
        }
        live
    }

    pub fn innings(&self) -> &Innings {
        &self.innings
    }

    pub fn log(&self) -> &[Delivery] {
        &self.log
    }

    pub fn crease(&self) -> &Crease {
        &self.crease
    }

    pub fn format(&self) -> &MatchFormat {
        &self.format
    }

    pub fn over(&self) -> u32 {
        self.over
    }

    /// Sets the crease directly, e.g. from the match setup handoff.
    pub fn set_crease(&mut self, crease: Crease) {
        self.crease = crease;
    }

    /// Deliveries in the over on the clock.
    pub fn current_over(&self) -> impl Iterator<Item = &Delivery> {
        let over = self.over;
        self.log
            .iter()
            .rev()
            .take_while(move |d| d.over == over)
    }

    /// Legal balls bowled in the over on the clock.
    pub fn balls_this_over(&self) -> u32 {
        self.current_over().filter(|d| d.is_legal()).count() as u32
    }

    pub fn over_complete(&self) -> bool {
        self.balls_this_over() >= u32::from(self.format.balls_per_over)
    }

    /// Bowler of the previous over, who may not bowl this one.
    pub fn previous_bowler(&self) -> Option<PlayerId> {
        let previous = self.over.checked_sub(1)?;
        self.log
            .iter()
            .rev()
            .find(|d| d.over == previous)
            .map(|d| d.bowler)
    }

    /// Batsmen dismissed so far, in order.
    pub fn dismissed(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.log.iter().filter(|d| d.is_wicket()).map(|d| d.striker)
    }

    /// Replaces the running totals with a full recompute when they disagree,
    /// returning the stale totals.
    pub fn verify_totals(&mut self) -> Option<InningsTotals> {
        let fresh = self.innings.totals.diverges_from(&self.log)?;
        Some(core::mem::replace(&mut self.innings.totals, fresh))
    }

    pub fn into_parts(self) -> (Innings, Vec<Delivery>) {
        (self.innings, self.log)
    }
}
