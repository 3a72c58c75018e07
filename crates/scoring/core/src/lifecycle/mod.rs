//! Innings and match lifecycle.
//!
//! An innings moves `not_started -> in_progress -> completed` and completes
//! on all out, overs exhausted or target chased. The [`MatchController`]
//! decides batting order from the toss, hands over to the second innings with
//! a target, and records the result once the second innings is over.

mod controller;
mod innings;
mod result;

pub use controller::{MatchController, batting_order, compute_result};
pub use innings::{CompletionReason, Transition};
pub use result::{Margin, MatchResult};
