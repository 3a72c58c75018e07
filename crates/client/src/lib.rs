//! Text front-end for the scorer.
//!
//! - [`commands`] parses scorer input lines into session commands
//! - [`report`] renders scorecards and match summaries as plain text
//! - [`logging`] installs the tracing subscriber for the binary
pub mod commands;
pub mod logging;
pub mod report;

pub use commands::{Command, parse_command};
pub use report::{render_match, render_scorecard};
