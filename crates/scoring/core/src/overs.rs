//! Over arithmetic and grouping of a delivery sequence into overs.
//!
//! Only legal deliveries (anything but a wide or no-ball) advance the over.
//! Two representations of a ball count are kept apart:
//!
//! - the display form `completed.balls` (e.g. `18.2`), where the digit after
//!   the point is a literal ball count, never a base-10 fraction;
//! - the decimal form `completed + balls / 6` (e.g. `18.333…`), used for
//!   comparisons and rate calculations.

use std::fmt;

use crate::state::Delivery;

/// A count of legal deliveries, interpreted against a balls-per-over value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overs {
    legal_balls: u32,
    balls_per_over: u8,
}

impl Overs {
    pub const fn new(legal_balls: u32, balls_per_over: u8) -> Self {
        Self {
            legal_balls,
            balls_per_over,
        }
    }

    /// Standard six-ball overs.
    pub const fn from_balls(legal_balls: u32) -> Self {
        Self::new(legal_balls, 6)
    }

    pub const fn legal_balls(&self) -> u32 {
        self.legal_balls
    }

    pub const fn completed(&self) -> u32 {
        match self.balls_per_over {
            0 => 0,
            n => self.legal_balls / n as u32,
        }
    }

    /// Legal balls bowled in the unfinished over.
    pub const fn balls(&self) -> u32 {
        match self.balls_per_over {
            0 => self.legal_balls,
            n => self.legal_balls % n as u32,
        }
    }

    /// `completed + balls / balls_per_over`, so three balls is 0.5, not 0.3.
    pub fn as_decimal(&self) -> f64 {
        if self.balls_per_over == 0 {
            return 0.0;
        }
        f64::from(self.completed()) + f64::from(self.balls()) / f64::from(self.balls_per_over)
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed(), self.balls())
    }
}

/// Counts deliveries that advance the over.
pub fn legal_ball_count<'a>(deliveries: impl IntoIterator<Item = &'a Delivery>) -> u32 {
    deliveries.into_iter().filter(|d| d.is_legal()).count() as u32
}

/// One over's worth of deliveries, borrowed from the log.
#[derive(Clone, Debug, PartialEq)]
pub struct OverGroup<'a> {
    /// 0-based index of the group in the grouped sequence.
    pub index: u32,
    pub deliveries: Vec<&'a Delivery>,
    pub legal_balls: u8,
    balls_per_over: u8,
}

impl<'a> OverGroup<'a> {
    fn new(index: u32, balls_per_over: u8) -> Self {
        Self {
            index,
            deliveries: Vec::new(),
            legal_balls: 0,
            balls_per_over,
        }
    }

    /// Every legal ball of the over has been bowled.
    pub fn is_complete(&self) -> bool {
        self.legal_balls >= self.balls_per_over
    }

    pub fn runs(&self) -> u32 {
        self.deliveries.iter().map(|d| d.runs_conceded()).sum()
    }

    /// A complete over without a single run or extra.
    pub fn is_maiden(&self) -> bool {
        self.is_complete() && self.deliveries.iter().all(|d| d.is_dot())
    }

    pub fn wickets(&self) -> u32 {
        self.deliveries.iter().filter(|d| d.is_wicket()).count() as u32
    }
}

/// Partitions a delivery sequence into overs of `balls_per_over` legal balls.
///
/// Walks the sequence in order. Illegal deliveries join the current group
/// without counting; a group closes as soon as its legal count reaches the
/// limit, and the next delivery opens a new one. The last group may be
/// partial. Works for a whole innings or for one bowler's deliveries.
pub fn group_overs<'a, I>(deliveries: I, balls_per_over: u8) -> Vec<OverGroup<'a>>
where
    I: IntoIterator<Item = &'a Delivery>,
{
    let mut groups = Vec::new();
    let mut current = OverGroup::new(0, balls_per_over);

    for delivery in deliveries {
        if current.is_complete() {
            let next = OverGroup::new(current.index + 1, balls_per_over);
            groups.push(std::mem::replace(&mut current, next));
        }

        current.deliveries.push(delivery);
        if delivery.is_legal() {
            current.legal_balls += 1;
        }
    }

    if !current.deliveries.is_empty() {
        groups.push(current);
    }

    groups
}
