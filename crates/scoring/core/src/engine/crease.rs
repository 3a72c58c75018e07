use crate::error::{CreaseRole, ScoringError};
use crate::state::{Delivery, PlayerId};

/// Who is at the crease and who is bowling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crease {
    pub striker: Option<PlayerId>,
    pub non_striker: Option<PlayerId>,
    pub bowler: Option<PlayerId>,
}

/// The three players a delivery needs, all selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Selection {
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
}

impl Crease {
    pub fn new(striker: PlayerId, non_striker: PlayerId, bowler: PlayerId) -> Self {
        Self {
            striker: Some(striker),
            non_striker: Some(non_striker),
            bowler: Some(bowler),
        }
    }

    /// The crease as it stood when `delivery` was bowled.
    pub fn before(delivery: &Delivery) -> Self {
        Self::new(delivery.striker, delivery.non_striker, delivery.bowler)
    }

    /// The crease right after `delivery`: strike rotated on odd runs off the
    /// bat, striker cleared on a wicket.
    pub fn after(delivery: &Delivery) -> Self {
        let mut crease = Self::before(delivery);
        if delivery.bat_runs() % 2 == 1 {
            crease.swap_ends();
        }
        if delivery.is_wicket() {
            crease.striker = None;
        }
        crease
    }

    pub fn swap_ends(&mut self) {
        core::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    pub fn contains_batsman(&self, player: PlayerId) -> bool {
        self.striker == Some(player) || self.non_striker == Some(player)
    }

    /// Everyone needed for a delivery, or the first missing role.
    pub(crate) fn selection(&self) -> Result<Selection, ScoringError> {
        let striker = self.striker.ok_or(ScoringError::MissingSelection {
            role: CreaseRole::Striker,
        })?;
        let non_striker = self.non_striker.ok_or(ScoringError::MissingSelection {
            role: CreaseRole::NonStriker,
        })?;
        let bowler = self.bowler.ok_or(ScoringError::MissingSelection {
            role: CreaseRole::Bowler,
        })?;
        Ok(Selection {
            striker,
            non_striker,
            bowler,
        })
    }
}
