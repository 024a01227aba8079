use tracing::warn;

use crate::zones::{locate, threshold_index_for_zone, Zone, ZoneModel};

/// A threshold reached or crossed by one step of the signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crossing {
    /// Position in the configured threshold set.
    pub threshold_index: usize,
    /// `true` when the threshold was reached by an increasing signal.
    pub increased: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrossingResult {
    #[default]
    NoCrossing,
    Crossed(Crossing),
}

impl CrossingResult {
    pub const fn crossed(threshold_index: usize, increased: bool) -> Self {
        Self::Crossed(Crossing {
            threshold_index,
            increased,
        })
    }

    pub const fn crossing(self) -> Option<Crossing> {
        match self {
            Self::NoCrossing => None,
            Self::Crossed(crossing) => Some(crossing),
        }
    }
}

/// Decides whether moving from `previous` to `current` reached or crossed a
/// threshold.
///
/// `zones` must partition `0.0..=1.0` in ascending order and
/// `threshold_zones` must list the ascending positions of its point zones, as
/// built by [`ZoneModel::build`]. When a single step skips several
/// thresholds, only the farthest one in the direction of travel is reported.
pub fn evaluate(
    previous: f64,
    current: f64,
    zones: &[Zone],
    threshold_zones: &[usize],
) -> CrossingResult {
    if current == previous || zones.is_empty() {
        return CrossingResult::NoCrossing;
    }

    let (Some(previous_zone), Some(current_zone)) =
        (locate(zones, previous), locate(zones, current))
    else {
        warn!(
            previous,
            current,
            zone_count = zones.len(),
            "force value outside every zone; zone list does not cover 0..=1"
        );
        return CrossingResult::NoCrossing;
    };

    if current_zone == previous_zone {
        return CrossingResult::NoCrossing;
    }
    let increased = current_zone > previous_zone;

    let reached_zone = if zones[current_zone].is_threshold() {
        current_zone
    } else {
        let (low, high) = if increased {
            (previous_zone, current_zone)
        } else {
            (current_zone, previous_zone)
        };
        let stepped_over = threshold_zones
            .iter()
            .copied()
            .filter(|&position| low < position && position < high);
        let farthest = if increased {
            stepped_over.max()
        } else {
            stepped_over.min()
        };
        let Some(farthest) = farthest else {
            return CrossingResult::NoCrossing;
        };
        farthest
    };

    match threshold_index_for_zone(threshold_zones, reached_zone) {
        Some(threshold_index) => CrossingResult::crossed(threshold_index, increased),
        None => {
            warn!(
                zone = reached_zone,
                "threshold zone missing from the threshold index set"
            );
            CrossingResult::NoCrossing
        }
    }
}

impl ZoneModel {
    pub fn evaluate(&self, previous: f64, current: f64) -> CrossingResult {
        evaluate(
            previous,
            current,
            self.zones(),
            self.threshold_zone_indexes(),
        )
    }

    /// Crossing check for the first sample of a contact.
    ///
    /// There is no earlier sample, so a start of exactly `0.0` on a `0.0`
    /// threshold is reported as reached by decrease; any other non-zero start
    /// is evaluated as a step up from `0.0`.
    pub fn evaluate_initial(&self, value: f64) -> CrossingResult {
        let Some(&first) = self.thresholds().first() else {
            return CrossingResult::NoCrossing;
        };

        if value == 0.0 {
            if first == 0.0 {
                CrossingResult::crossed(0, false)
            } else {
                CrossingResult::NoCrossing
            }
        } else {
            self.evaluate(0.0, value)
        }
    }
}

#[cfg(test)]
mod tests;
