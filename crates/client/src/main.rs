//! Cricket scorer binary.
//!
//! Composition root: loads `.env`, reads [`ScorerConfig`], installs logging,
//! assembles storage through [`ScorerBuilder`] and then either prints stored
//! matches or scores one match from stdin.
//!
//! ```bash
//! scorer                 # every stored match with its scorecards
//! scorer card 1          # one match
//! scorer score 1         # score match 1, one command per line (`help`)
//! ```

use anyhow::{Context, Result, bail};
use client_bootstrap::{ScorerBuilder, ScorerConfig, ScorerSetup};
use runtime::{Event, LifecycleEvent, ScoringSession, Topic, match_scorecards};
use scoring_core::{MatchId, PlayerId, RosterOracle, ScoringFailure};
use scorer_client::commands::HELP;
use scorer_client::{Command, logging, parse_command, render_match, render_scorecard};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ScorerConfig::from_env();

    // 2. Setup logging
    let _guard = logging::setup_logging(config.log_stderr)?;
    tracing::info!("Starting scorer");
    tracing::info!("Persistence: {:?}", config.persistence);
    tracing::info!("Verify interval: {}", config.session.verify_interval);

    // 3. Build storage
    let setup = ScorerBuilder::new(config).build()?;

    // 4. Run the requested command
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => print_matches(&setup, None),
        [cmd, id] if cmd == "card" => print_matches(&setup, Some(match_id(id)?)),
        [cmd, id] if cmd == "score" => score(&setup, match_id(id)?).await,
        _ => bail!("usage: scorer [card <match-id> | score <match-id>]"),
    }
}

fn match_id(arg: &str) -> Result<MatchId> {
    let digits = arg.strip_prefix('m').unwrap_or(arg);
    digits
        .parse()
        .map(MatchId)
        .with_context(|| format!("`{arg}` is not a match id"))
}

fn print_matches(setup: &ScorerSetup, only: Option<MatchId>) -> Result<()> {
    let roster = setup.repos.roster.snapshot()?;
    let fixtures = setup.repos.matches.list()?;
    let mut printed = 0;

    for fixture in fixtures
        .iter()
        .filter(|f| only.is_none_or(|id| id == f.id))
    {
        let cards = match_scorecards(&setup.repos, fixture.id)?;
        println!("{}", render_match(fixture, &cards, &roster));
        printed += 1;
    }

    if printed == 0 {
        println!("No matches stored.");
    }
    Ok(())
}

async fn score(setup: &ScorerSetup, match_id: MatchId) -> Result<()> {
    let mut lifecycle = setup.bus.subscribe(Topic::Lifecycle);
    tokio::spawn(async move {
        while let Ok(event) = lifecycle.recv().await {
            if let Event::Lifecycle(event) = event {
                announce(&event);
            }
        }
    });

    let mut session = setup.open_session(match_id)?;
    print_state(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(error) => {
                eprintln!("{error}");
                continue;
            }
        };

        match command {
            Command::Score(action) => match session.record(action) {
                Ok(_) => {
                    print_state(&session);
                    if session.fixture().is_completed() {
                        println!("Match complete: `undo` takes back the last ball, `quit` leaves.");
                    }
                }
                Err(error) => {
                    tracing::debug!(code = error.error_code(), "Action rejected: {error}");
                    eprintln!("{} ({})", error, error.severity().as_str());
                }
            },
            Command::Card => {
                for card in session.scorecards()? {
                    println!("{}", render_scorecard(&card));
                }
            }
            Command::NextInnings => {
                if !session.start_next_innings().is_applied() {
                    eprintln!("No innings to start.");
                }
            }
            Command::EndMatch => {
                if !session.end_match().is_applied() {
                    eprintln!("Match is already finished.");
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    // Give the announcer a moment to drain before the runtime shuts down.
    tokio::task::yield_now().await;
    tracing::info!("Scoring session closed");
    Ok(())
}

fn print_state(session: &ScoringSession) {
    let Some(live) = session.live() else {
        return;
    };
    let innings = live.innings();
    let crease = live.crease();
    let name = |id: Option<PlayerId>| {
        id.map(|id| {
            session
                .roster()
                .player_name(id)
                .map(str::to_owned)
                .unwrap_or_else(|| id.to_string())
        })
        .unwrap_or_else(|| "-".to_string())
    };

    println!(
        "{} ({} ov)  striker {}  non-striker {}  bowler {}",
        innings.score_line(),
        innings.overs(live.format()),
        name(crease.striker),
        name(crease.non_striker),
        name(crease.bowler),
    );
    if live.over_complete() {
        println!("Over complete: `over` to change ends.");
    }
}

fn announce(event: &LifecycleEvent) {
    match event {
        LifecycleEvent::InningsStarted { innings } => println!("== Innings {innings} started"),
        LifecycleEvent::InningsCompleted {
            innings,
            reason,
            totals,
        } => println!(
            "== Innings {innings} over: {}/{} ({})",
            totals.runs,
            totals.wickets,
            reason.describe()
        ),
        LifecycleEvent::MatchCompleted { result_text, .. } => println!("== {result_text}"),
        LifecycleEvent::InningsReopened { innings } => println!("== Innings {innings} reopened"),
        LifecycleEvent::InningsDiscarded { innings } => {
            println!("== Innings {innings} withdrawn")
        }
        LifecycleEvent::MatchReopened { .. } => println!("== Result withdrawn"),
        LifecycleEvent::TotalsRepaired { innings, .. } => {
            println!("== Totals for {innings} recomputed from the delivery log")
        }
    }
}
