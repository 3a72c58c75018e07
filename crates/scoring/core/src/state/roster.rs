use super::ids::{PlayerId, TeamId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub short_name: String,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlayerRole {
    #[default]
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

impl PlayerRole {
    pub const fn can_bowl(self) -> bool {
        matches!(self, Self::Bowler | Self::AllRounder)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub team: TeamId,
    pub name: String,
    pub role: PlayerRole,
    /// Unavailable players are kept on the roster but left out of selections.
    pub available: bool,
}

impl Player {
    pub fn new(id: PlayerId, team: TeamId, name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            id,
            team,
            name: name.into(),
            role,
            available: true,
        }
    }
}
