use scoring_core::{Match, Player, Team};

/// Fallback contents for a store that is empty or unreadable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Seed {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
}

impl Seed {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.players.is_empty() && self.matches.is_empty()
    }
}
