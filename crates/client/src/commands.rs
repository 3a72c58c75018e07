//! Scorer input: one command per line.
//!
//! ```text
//! 0..8              runs off the bat
//! wd [n] | nb [n]   wide / no-ball, n extras in total (default 1)
//! b n | lb n        byes / leg-byes
//! out KIND [FIELDER]  wicket: b, c, lbw, ro, st, hw or a full name
//! undo | over       undo last ball / end the over
//! bowl ID | bat ID | open ID ID
//! card | next | end | help | quit
//! ```

use anyhow::{Context, Result, anyhow, bail};
use scoring_core::{ExtraKind, PlayerId, ScoringAction, WicketKind};

/// A parsed input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Score(ScoringAction),
    /// Print the scorecard of the innings in progress.
    Card,
    NextInnings,
    EndMatch,
    Help,
    Quit,
}

pub const HELP: &str = "\
0..8            runs off the bat
wd [n], nb [n]  wide / no-ball (n extras in total, default 1)
b n, lb n       byes / leg-byes
out KIND [ID]   wicket (b, c, lbw, ro, st, hw) with optional fielder
undo, over      undo last ball, end the over
bowl ID         select the bowler
bat ID          send in the next batsman
open ID ID      select the openers
card, next, end, help, quit";

pub fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        bail!("empty command");
    };
    let args: Vec<&str> = words.collect();

    if let Ok(runs) = head.parse::<u8>() {
        return Ok(Command::Score(ScoringAction::runs(runs)));
    }

    let command = match head.to_ascii_lowercase().as_str() {
        "wd" | "wide" => extra(ExtraKind::Wide, &args)?,
        "nb" | "noball" => extra(ExtraKind::NoBall, &args)?,
        "b" | "bye" => extra(ExtraKind::Bye, &args)?,
        "lb" | "legbye" => extra(ExtraKind::LegBye, &args)?,
        "out" | "w" => {
            let kind = args.first().context("out needs a dismissal kind")?;
            let fielder = args.get(1).map(|id| player(id)).transpose()?;
            Command::Score(ScoringAction::wicket(wicket_kind(kind)?, fielder))
        }
        "undo" | "u" => Command::Score(ScoringAction::Undo),
        "over" | "eo" => Command::Score(ScoringAction::EndOver),
        "bowl" => Command::Score(ScoringAction::SelectBowler {
            bowler: player(args.first().context("bowl needs a player id")?)?,
        }),
        "bat" => Command::Score(ScoringAction::SelectBatsman {
            batsman: player(args.first().context("bat needs a player id")?)?,
        }),
        "open" => {
            let [striker, non_striker] = args[..] else {
                bail!("open needs two player ids");
            };
            Command::Score(ScoringAction::SelectOpeners {
                striker: player(striker)?,
                non_striker: player(non_striker)?,
            })
        }
        "card" => Command::Card,
        "next" => Command::NextInnings,
        "end" => Command::EndMatch,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => bail!("unknown command `{other}`"),
    };
    Ok(command)
}

fn extra(kind: ExtraKind, args: &[&str]) -> Result<Command> {
    let runs = match args.first() {
        Some(value) => value
            .parse()
            .with_context(|| format!("`{value}` is not a run count"))?,
        None => 1,
    };
    Ok(Command::Score(ScoringAction::extra(kind, runs)))
}

fn wicket_kind(word: &str) -> Result<WicketKind> {
    let kind = match word.to_ascii_lowercase().as_str() {
        "b" => WicketKind::Bowled,
        "c" => WicketKind::Caught,
        "ro" => WicketKind::RunOut,
        "st" => WicketKind::Stumped,
        "hw" => WicketKind::HitWicket,
        other => other
            .parse()
            .map_err(|_| anyhow!("unknown dismissal `{word}`"))?,
    };
    Ok(kind)
}

/// `12` or `p12`.
fn player(word: &str) -> Result<PlayerId> {
    let digits = word.strip_prefix('p').unwrap_or(word);
    digits
        .parse()
        .map(PlayerId)
        .with_context(|| format!("`{word}` is not a player id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(line: &str) -> ScoringAction {
        match parse_command(line).unwrap() {
            Command::Score(action) => action,
            other => panic!("expected a scoring action, got {other:?}"),
        }
    }

    #[test]
    fn digits_are_runs() {
        assert_eq!(score("4"), ScoringAction::runs(4));
        assert_eq!(score(" 0 "), ScoringAction::runs(0));
    }

    #[test]
    fn extras_default_to_one() {
        assert_eq!(score("wd"), ScoringAction::extra(ExtraKind::Wide, 1));
        assert_eq!(score("lb 2"), ScoringAction::extra(ExtraKind::LegBye, 2));
        assert!(parse_command("nb many").is_err());
    }

    #[test]
    fn wickets_accept_short_and_long_names() {
        assert_eq!(
            score("out c p15"),
            ScoringAction::wicket(WicketKind::Caught, Some(PlayerId(15)))
        );
        assert_eq!(
            score("out run_out"),
            ScoringAction::wicket(WicketKind::RunOut, None)
        );
        assert_eq!(score("w lbw"), ScoringAction::wicket(WicketKind::Lbw, None));
        assert!(parse_command("out sideways").is_err());
    }

    #[test]
    fn selections_take_player_ids() {
        assert_eq!(
            score("open 1 p2"),
            ScoringAction::SelectOpeners {
                striker: PlayerId(1),
                non_striker: PlayerId(2),
            }
        );
        assert_eq!(
            score("bowl 20"),
            ScoringAction::SelectBowler {
                bowler: PlayerId(20)
            }
        );
        assert!(parse_command("open 1").is_err());
        assert!(parse_command("bat").is_err());
    }

    #[test]
    fn session_commands() {
        assert_eq!(parse_command("card").unwrap(), Command::Card);
        assert_eq!(parse_command("NEXT").unwrap(), Command::NextInnings);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert!(parse_command("").is_err());
        assert!(parse_command("dance").is_err());
    }
}
