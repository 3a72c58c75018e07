use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a registered player.
    PlayerId,
    "p"
);
id_type!(
    /// Identifier of a team.
    TeamId,
    "t"
);
id_type!(
    /// Identifier of a fixture.
    MatchId,
    "m"
);
id_type!(TournamentId, "tour");
id_type!(StadiumId, "std");

/// Which of the (at most) two innings of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InningsNumber {
    #[default]
    First,
    Second,
}

impl InningsNumber {
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// The innings that follows this one, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::First => Some(Self::Second),
            Self::Second => None,
        }
    }
}

/// Identifier of an innings: the match plus the innings sequence marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InningsId {
    pub match_id: MatchId,
    pub number: InningsNumber,
}

impl InningsId {
    pub const fn new(match_id: MatchId, number: InningsNumber) -> Self {
        Self { match_id, number }
    }

    pub const fn first(match_id: MatchId) -> Self {
        Self::new(match_id, InningsNumber::First)
    }

    pub const fn second(match_id: MatchId) -> Self {
        Self::new(match_id, InningsNumber::Second)
    }
}

impl fmt::Display for InningsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-i{}", self.match_id, self.number.ordinal())
    }
}

/// Identifier of a delivery, derived from its innings and its position in the log.
///
/// The sequence is the 1-based index of the delivery within the innings log,
/// so ids stay unique even when several illegal deliveries share a ball number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryId {
    pub innings: InningsId,
    pub sequence: u32,
}

impl DeliveryId {
    pub const fn new(innings: InningsId, sequence: u32) -> Self {
        Self { innings, sequence }
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-d{}", self.innings, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_render_with_prefixes() {
        let innings = InningsId::second(MatchId(12));
        assert_eq!(innings.to_string(), "m12-i2");
        assert_eq!(DeliveryId::new(innings, 7).to_string(), "m12-i2-d7");
        assert_eq!(PlayerId(3).to_string(), "p3");
    }

    #[test]
    fn innings_number_has_no_third() {
        assert_eq!(InningsNumber::First.next(), Some(InningsNumber::Second));
        assert_eq!(InningsNumber::Second.next(), None);
    }
}
