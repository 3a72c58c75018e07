/// Format of a fixture: innings length and the rule constants scoring depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchFormat {
    /// Overs available to each innings.
    pub overs: u32,
    /// Legal deliveries per over.
    pub balls_per_over: u8,
    /// Dismissals that end an innings (all out).
    pub wickets: u8,
    /// Runs off the bat counted as a four.
    pub four: u8,
    /// Runs off the bat counted as a six.
    pub six: u8,
    /// Overs at the start of an innings counted as the powerplay.
    pub powerplay_overs: u32,
    /// Overs at the end of an innings counted as the death overs.
    pub death_overs: u32,
}

impl MatchFormat {
    // ===== rule constants =====
    pub const BALLS_PER_OVER: u8 = 6;
    pub const WICKETS: u8 = 10;
    pub const FOUR: u8 = 4;
    pub const SIX: u8 = 6;

    // ===== phase defaults =====
    pub const DEFAULT_POWERPLAY_OVERS: u32 = 6;
    pub const DEFAULT_DEATH_OVERS: u32 = 4;

    /// Twenty overs a side.
    pub const fn t20() -> Self {
        Self::custom(20)
    }

    /// Fifty overs a side with a ten-over powerplay and ten death overs.
    pub const fn odi() -> Self {
        let mut format = Self::custom(50);
        format.powerplay_overs = 10;
        format.death_overs = 10;
        format
    }

    /// Any innings length. Phases shrink so they never overlap in short formats.
    pub const fn custom(overs: u32) -> Self {
        let powerplay = if overs < Self::DEFAULT_POWERPLAY_OVERS * 2 {
            overs / 2
        } else {
            Self::DEFAULT_POWERPLAY_OVERS
        };
        let remaining = overs - powerplay;
        let death = if remaining < Self::DEFAULT_DEATH_OVERS {
            remaining
        } else {
            Self::DEFAULT_DEATH_OVERS
        };

        Self {
            overs,
            balls_per_over: Self::BALLS_PER_OVER,
            wickets: Self::WICKETS,
            four: Self::FOUR,
            six: Self::SIX,
            powerplay_overs: powerplay,
            death_overs: death,
        }
    }

    /// Legal deliveries available to one innings.
    pub const fn balls_per_innings(&self) -> u32 {
        self.overs * self.balls_per_over as u32
    }
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self::t20()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t20_phases() {
        let format = MatchFormat::t20();
        assert_eq!(format.balls_per_innings(), 120);
        assert_eq!(format.powerplay_overs, 6);
        assert_eq!(format.death_overs, 4);
    }

    #[test]
    fn short_formats_do_not_overlap_phases() {
        let format = MatchFormat::custom(5);
        assert_eq!(format.powerplay_overs, 2);
        assert_eq!(format.death_overs, 3);
        assert!(format.powerplay_overs + format.death_overs <= format.overs);
    }
}
