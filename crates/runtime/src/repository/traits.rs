//! Repository contracts the scoring session reads and writes through.
//!
//! Every mutation in a session is written through immediately; nothing is
//! buffered. Implementations are shared behind `Arc` and must be `Send + Sync`.

use scoring_core::{
    Delivery, Innings, InningsId, Match, MatchId, Player, PlayerId, Roster, Team, TeamId,
};

use super::Result;

/// Per-innings delivery log.
pub trait DeliveryRepository: Send + Sync {
    /// Deliveries of an innings in the order they were recorded.
    fn list(&self, innings: InningsId) -> Result<Vec<Delivery>>;

    fn append(&self, delivery: &Delivery) -> Result<()>;

    /// Removes and returns the most recent delivery of an innings.
    fn remove_last(&self, innings: InningsId) -> Result<Option<Delivery>>;

    /// Removes a whole log alongside its innings. Returns how many were removed.
    fn remove_innings(&self, innings: InningsId) -> Result<usize>;
}

pub trait InningsRepository: Send + Sync {
    /// Innings of a match, first innings first.
    fn list_for_match(&self, match_id: MatchId) -> Result<Vec<Innings>>;

    fn get(&self, id: InningsId) -> Result<Option<Innings>> {
        Ok(self
            .list_for_match(id.match_id)?
            .into_iter()
            .find(|innings| innings.id == id))
    }

    fn upsert(&self, innings: &Innings) -> Result<()>;

    fn remove(&self, id: InningsId) -> Result<()>;
}

pub trait MatchRepository: Send + Sync {
    fn get(&self, id: MatchId) -> Result<Option<Match>>;

    fn upsert(&self, fixture: &Match) -> Result<()>;

    /// All fixtures, ordered by scheduled time then id.
    fn list(&self) -> Result<Vec<Match>>;
}

/// Teams and players.
pub trait RosterRepository: Send + Sync {
    fn teams(&self) -> Result<Vec<Team>>;

    fn players(&self) -> Result<Vec<Player>>;

    fn upsert_team(&self, team: &Team) -> Result<()>;

    fn upsert_player(&self, player: &Player) -> Result<()>;

    fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self.players()?.into_iter().find(|p| p.id == id))
    }

    fn players_by_team(&self, team: TeamId) -> Result<Vec<Player>> {
        Ok(self
            .players()?
            .into_iter()
            .filter(|p| p.team == team)
            .collect())
    }

    /// Owned snapshot used as the roster oracle for statistics.
    fn snapshot(&self) -> Result<Roster> {
        Ok(Roster::new(self.teams()?, self.players()?))
    }
}
