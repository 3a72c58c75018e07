use std::sync::RwLock;

use scoring_core::{Player, Team};

use crate::repository::{RepositoryError, Result, RosterRepository};

/// Teams and players in registration order.
#[derive(Default)]
pub struct InMemoryRosterRepo {
    teams: RwLock<Vec<Team>>,
    players: RwLock<Vec<Player>>,
}

impl InMemoryRosterRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(teams: Vec<Team>, players: Vec<Player>) -> Self {
        Self {
            teams: RwLock::new(teams),
            players: RwLock::new(players),
        }
    }
}

impl RosterRepository for InMemoryRosterRepo {
    fn teams(&self) -> Result<Vec<Team>> {
        let teams = self.teams.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(teams.clone())
    }

    fn players(&self) -> Result<Vec<Player>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.clone())
    }

    fn upsert_team(&self, team: &Team) -> Result<()> {
        let mut teams = self
            .teams
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match teams.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => *existing = team.clone(),
            None => teams.push(team.clone()),
        }
        Ok(())
    }

    fn upsert_player(&self, player: &Player) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player.clone(),
            None => players.push(player.clone()),
        }
        Ok(())
    }
}
