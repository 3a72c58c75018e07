//! Fallback demo data for empty stores.

use runtime::Seed;
use scoring_core::{
    Match, MatchFormat, MatchId, Player, PlayerId, PlayerRole, Team, TeamId, TossDecision,
};

const FALCONS: [&str; 11] = [
    "Arjun Mehta",
    "Liam Carter",
    "Ravi Nair",
    "Tom Hollis",
    "Imran Qadir",
    "Sam Whitley",
    "Dev Patel",
    "Owen Brooks",
    "Kiran Rao",
    "Jack Pearce",
    "Nathan Cole",
];

const HAWKS: [&str; 11] = [
    "Marcus Reid",
    "Faisal Ahmed",
    "Ben Gallagher",
    "Rohan Iyer",
    "Chris Dunn",
    "Aiden Shaw",
    "Vikram Joshi",
    "Harry Lyons",
    "Zain Malik",
    "Luke Fenton",
    "Sanjay Kumar",
];

/// Batting order position to role: six batsmen, a keeper, an all-rounder and
/// three bowlers.
fn role(position: usize) -> PlayerRole {
    match position {
        0..=5 => PlayerRole::Batsman,
        6 => PlayerRole::WicketKeeper,
        7 => PlayerRole::AllRounder,
        _ => PlayerRole::Bowler,
    }
}

/// Two teams of eleven and two T20 fixtures, the first with the toss done.
pub fn demo_seed() -> Seed {
    let falcons = TeamId(1);
    let hawks = TeamId(2);

    let players = [(falcons, FALCONS, 1), (hawks, HAWKS, 101)]
        .into_iter()
        .flat_map(|(team, names, first_id)| {
            names.into_iter().enumerate().map(move |(position, name)| {
                Player::new(PlayerId(first_id + position as u32), team, name, role(position))
            })
        })
        .collect();

    let mut opener =
        Match::new(MatchId(1), falcons, hawks, MatchFormat::t20()).with_toss(hawks, TossDecision::Bowl);
    opener.scheduled_at = 1_767_261_600;
    let mut rematch = Match::new(MatchId(2), hawks, falcons, MatchFormat::t20());
    rematch.scheduled_at = 1_767_866_400;

    Seed {
        teams: vec![
            Team::new(falcons, "Falcons", "FAL"),
            Team::new(hawks, "Hawks", "HAW"),
        ],
        players,
        matches: vec![opener, rematch],
    }
}
