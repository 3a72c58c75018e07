//! JSON file repositories.
//!
//! One file per collection under the data directory: `matches.json`,
//! `innings.json`, `deliveries.json`, `teams.json` and `players.json`. Each
//! file is rewritten through a temp file and rename on every change.

mod collection;

use std::fs;
use std::path::Path;

use scoring_core::{Delivery, Innings, InningsId, Match, MatchId, Player, Team};

use self::collection::JsonCollection;
use super::{
    DeliveryRepository, InningsRepository, MatchRepository, Result, RosterRepository, Seed,
};

/// All scoring collections stored as JSON files in one directory.
pub struct FileStore {
    matches: JsonCollection<Match>,
    innings: JsonCollection<Innings>,
    deliveries: JsonCollection<Delivery>,
    teams: JsonCollection<Team>,
    players: JsonCollection<Player>,
}

impl FileStore {
    /// Opens (or creates) the store under `dir`.
    ///
    /// Collections that are missing or unreadable start from `seed`.
    pub fn open(dir: impl AsRef<Path>, seed: Seed) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let store = Self {
            matches: JsonCollection::open(dir, "matches", seed.matches)?,
            innings: JsonCollection::open(dir, "innings", Vec::new())?,
            deliveries: JsonCollection::open(dir, "deliveries", Vec::new())?,
            teams: JsonCollection::open(dir, "teams", seed.teams)?,
            players: JsonCollection::open(dir, "players", seed.players)?,
        };
        tracing::debug!(dir = %dir.display(), "Opened file store");
        Ok(store)
    }
}

impl DeliveryRepository for FileStore {
    fn list(&self, innings: InningsId) -> Result<Vec<Delivery>> {
        self.deliveries.read(|all| {
            all.iter()
                .filter(|d| d.innings() == innings)
                .cloned()
                .collect()
        })
    }

    fn append(&self, delivery: &Delivery) -> Result<()> {
        self.deliveries.update(|all| all.push(delivery.clone()))
    }

    fn remove_last(&self, innings: InningsId) -> Result<Option<Delivery>> {
        self.deliveries.update(|all| {
            let index = all.iter().rposition(|d| d.innings() == innings)?;
            Some(all.remove(index))
        })
    }

    fn remove_innings(&self, innings: InningsId) -> Result<usize> {
        self.deliveries.update(|all| {
            let before = all.len();
            all.retain(|d| d.innings() != innings);
            before - all.len()
        })
    }
}

impl InningsRepository for FileStore {
    fn list_for_match(&self, match_id: MatchId) -> Result<Vec<Innings>> {
        self.innings.read(|all| {
            let mut found: Vec<Innings> = all
                .iter()
                .filter(|i| i.match_id() == match_id)
                .cloned()
                .collect();
            found.sort_by_key(|i| i.number());
            found
        })
    }

    fn upsert(&self, record: &Innings) -> Result<()> {
        self.innings.update(|all| upsert_by(all, record.clone(), |i| i.id))
    }

    fn remove(&self, id: InningsId) -> Result<()> {
        self.innings.update(|all| all.retain(|i| i.id != id))
    }
}

impl MatchRepository for FileStore {
    fn get(&self, id: MatchId) -> Result<Option<Match>> {
        self.matches
            .read(|all| all.iter().find(|m| m.id == id).cloned())
    }

    fn upsert(&self, fixture: &Match) -> Result<()> {
        self.matches
            .update(|all| upsert_by(all, fixture.clone(), |m| m.id))
    }

    fn list(&self) -> Result<Vec<Match>> {
        self.matches.read(|all| {
            let mut sorted = all.to_vec();
            sorted.sort_by_key(|m| (m.scheduled_at, m.id));
            sorted
        })
    }
}

impl RosterRepository for FileStore {
    fn teams(&self) -> Result<Vec<Team>> {
        self.teams.read(<[Team]>::to_vec)
    }

    fn players(&self) -> Result<Vec<Player>> {
        self.players.read(<[Player]>::to_vec)
    }

    fn upsert_team(&self, team: &Team) -> Result<()> {
        self.teams.update(|all| upsert_by(all, team.clone(), |t| t.id))
    }

    fn upsert_player(&self, player: &Player) -> Result<()> {
        self.players
            .update(|all| upsert_by(all, player.clone(), |p| p.id))
    }
}

/// Replaces the item with the same key or appends it.
fn upsert_by<T, K: PartialEq>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> K) {
    let id = key(&item);
    match items.iter_mut().find(|existing| key(existing) == id) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}
