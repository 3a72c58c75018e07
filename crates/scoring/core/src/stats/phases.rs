//! Innings splits by phase: powerplay, middle overs, death overs.

use crate::aggregate::{InningsTotals, rate_per_over};
use crate::config::MatchFormat;
use crate::state::Delivery;

#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum Phase {
    Powerplay,
    Middle,
    Death,
}

impl Phase {
    /// Phase of a 0-based over number.
    pub fn of_over(over: u32, format: &MatchFormat) -> Self {
        if over < format.powerplay_overs {
            Self::Powerplay
        } else if over >= format.overs.saturating_sub(format.death_overs) {
            Self::Death
        } else {
            Self::Middle
        }
    }
}

/// Runs, wickets and balls within one phase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseSplit {
    pub phase: Phase,
    /// 1-based inclusive over range, e.g. 1..=6 for a T20 powerplay.
    pub first_over: u32,
    pub last_over: u32,
    pub totals: InningsTotals,
    balls_per_over: u8,
}

impl PhaseSplit {
    pub fn run_rate(&self) -> f64 {
        rate_per_over(self.totals.runs, self.totals.legal_balls, self.balls_per_over)
    }
}

/// Splits the log into the phases the format defines.
///
/// Phases with an empty over range (no middle overs in a very short game) are
/// omitted. Phases that have not been reached yet are reported with zeros.
pub fn phase_splits(log: &[Delivery], format: &MatchFormat) -> Vec<PhaseSplit> {
    let death_start = format.overs.saturating_sub(format.death_overs);
    let ranges = [
        (Phase::Powerplay, 0, format.powerplay_overs),
        (Phase::Middle, format.powerplay_overs, death_start),
        (Phase::Death, death_start, format.overs),
    ];

    ranges
        .into_iter()
        .filter(|(_, start, end)| end > start)
        .map(|(phase, start, end)| PhaseSplit {
            phase,
            first_over: start + 1,
            last_over: end,
            totals: InningsTotals::from_log(
                log.iter().filter(|d| Phase::of_over(d.over, format) == phase),
            ),
            balls_per_over: format.balls_per_over,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WicketKind;
    use crate::state::delivery::fixtures::*;

    #[test]
    fn t20_phase_boundaries() {
        let format = MatchFormat::t20();
        assert_eq!(Phase::of_over(0, &format), Phase::Powerplay);
        assert_eq!(Phase::of_over(5, &format), Phase::Powerplay);
        assert_eq!(Phase::of_over(6, &format), Phase::Middle);
        assert_eq!(Phase::of_over(15, &format), Phase::Middle);
        assert_eq!(Phase::of_over(16, &format), Phase::Death);
        assert_eq!(Phase::of_over(19, &format), Phase::Death);
    }

    #[test]
    fn splits_attribute_runs_by_over() {
        // 7 overs: six in the powerplay, one in the middle.
        let mut entries = vec![regular(1); 36];
        entries.push(regular(4));
        entries.push(wicket(WicketKind::Bowled, None));
        let splits = phase_splits(&log(&entries), &MatchFormat::t20());

        assert_eq!(splits.len(), 3);
        assert_eq!((splits[0].first_over, splits[0].last_over), (1, 6));
        assert_eq!(splits[0].totals.runs, 36);
        assert_eq!(splits[0].run_rate(), 6.0);
        assert_eq!(splits[1].totals.runs, 4);
        assert_eq!(splits[1].totals.wickets, 1);
        assert_eq!((splits[2].first_over, splits[2].last_over), (17, 20));
        assert_eq!(splits[2].totals.legal_balls, 0);
    }

    #[test]
    fn very_short_format_has_no_middle() {
        let splits = phase_splits(&[], &MatchFormat::custom(2));
        let phases: Vec<_> = splits.iter().map(|s| s.phase).collect();
        assert_eq!(phases, vec![Phase::Powerplay, Phase::Death]);
    }
}
