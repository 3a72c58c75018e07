//! Read-only roster data the statistics need.
//!
//! The scoring core never owns team or player records; it asks a
//! [`RosterOracle`] for names. Lookups may miss (a player removed from the
//! roster after the match), and every caller treats a miss as "skip".

use crate::state::{Player, PlayerId, Team, TeamId};

/// Oracle providing team and player records.
pub trait RosterOracle: Send + Sync {
    fn player(&self, id: PlayerId) -> Option<&Player>;

    fn team(&self, id: TeamId) -> Option<&Team>;

    /// All players registered to a team, in registration order.
    fn players_by_team(&self, team: TeamId) -> Vec<&Player>;

    /// Display name for a player, if known.
    fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.player(id).map(|p| p.name.as_str())
    }

    /// Display name for a team, falling back to its id.
    fn team_name(&self, id: TeamId) -> String {
        self.team(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Players available for selection.
    fn available_players(&self, team: TeamId) -> Vec<&Player> {
        self.players_by_team(team)
            .into_iter()
            .filter(|p| p.available)
            .collect()
    }
}

/// Simple owned roster backed by vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
}

impl Roster {
    pub fn new(teams: Vec<Team>, players: Vec<Player>) -> Self {
        Self { teams, players }
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.players.is_empty()
    }
}

impl RosterOracle for Roster {
    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    fn players_by_team(&self, team: TeamId) -> Vec<&Player> {
        self.players.iter().filter(|p| p.team == team).collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::state::PlayerRole;

    pub const HOME: TeamId = TeamId(1);
    pub const AWAY: TeamId = TeamId(2);

    /// Two teams of eleven: home players are 1..=11, away players 12..=22.
    pub fn roster() -> Roster {
        let teams = vec![
            Team::new(HOME, "Falcons", "FAL"),
            Team::new(AWAY, "Hawks", "HAW"),
        ];
        let players = (1..=22)
            .map(|n| {
                let team = if n <= 11 { HOME } else { AWAY };
                let role = if n % 11 >= 7 || n % 11 == 0 {
                    PlayerRole::Bowler
                } else {
                    PlayerRole::Batsman
                };
                Player::new(PlayerId(n), team, format!("Player {n}"), role)
            })
            .collect();
        Roster::new(teams, players)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn lookups_miss_gracefully() {
        let roster = roster();
        assert_eq!(roster.player_name(PlayerId(3)), Some("Player 3"));
        assert_eq!(roster.player_name(PlayerId(99)), None);
        assert_eq!(roster.team_name(TeamId(9)), "t9");
        assert_eq!(roster.players_by_team(AWAY).len(), 11);
    }

    #[test]
    fn unavailable_players_are_filtered() {
        let mut roster = roster();
        roster.players[0].available = false;
        assert_eq!(roster.available_players(HOME).len(), 10);
    }
}
