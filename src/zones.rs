//! Discrete view of the normalized force range.
//!
//! A sorted threshold set splits `0.0..=1.0` into alternating zones: each
//! threshold owns exactly its own point, and the open stretches between and
//! around thresholds are gap zones. Moving the signal then becomes moving
//! between zone positions, which is plain index arithmetic.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Zone {
    /// `(start, end)`
    OpenOpen { start: f64, end: f64 },
    /// `[start, end]`; built only as a single point.
    ClosedClosed { start: f64, end: f64 },
    /// `[start, end)`
    ClosedOpen { start: f64, end: f64 },
    /// `(start, end]`
    OpenClosed { start: f64, end: f64 },
}

impl Zone {
    pub const fn point(value: f64) -> Self {
        Self::ClosedClosed {
            start: value,
            end: value,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Self::OpenOpen { start, end } => start < value && value < end,
            Self::ClosedClosed { start, end } => start <= value && value <= end,
            Self::ClosedOpen { start, end } => start <= value && value < end,
            Self::OpenClosed { start, end } => start < value && value <= end,
        }
    }

    pub const fn bounds(&self) -> (f64, f64) {
        match *self {
            Self::OpenOpen { start, end }
            | Self::ClosedClosed { start, end }
            | Self::ClosedOpen { start, end }
            | Self::OpenClosed { start, end } => (start, end),
        }
    }

    pub const fn is_threshold(&self) -> bool {
        matches!(self, Self::ClosedClosed { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("threshold[{index}] = {value} is outside 0..=1")]
    OutOfRange { index: usize, value: f64 },
    #[error("threshold[{index}] = {value} duplicates the previous threshold")]
    Duplicate { index: usize, value: f64 },
    #[error("threshold[{index}] is smaller than the previous threshold")]
    Unsorted { index: usize },
}

/// Validates a threshold set: finite, within `0.0..=1.0`, strictly increasing.
pub fn validate_thresholds(thresholds: &[f64]) -> Result<(), ThresholdError> {
    for (index, &value) in thresholds.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(ThresholdError::OutOfRange { index, value });
        }
    }

    for (offset, pair) in thresholds.windows(2).enumerate() {
        let index = offset + 1;
        if pair[1] == pair[0] {
            return Err(ThresholdError::Duplicate {
                index,
                value: pair[1],
            });
        }
        if pair[1] < pair[0] {
            return Err(ThresholdError::Unsorted { index });
        }
    }

    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoneModel {
    thresholds: Vec<f64>,
    zones: Vec<Zone>,
    threshold_zones: Vec<usize>,
}

impl ZoneModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build(thresholds: &[f64]) -> Result<Self, ThresholdError> {
        validate_thresholds(thresholds)?;

        let (Some(&first), Some(&last)) = (thresholds.first(), thresholds.last()) else {
            return Ok(Self::empty());
        };

        let mut zones = Vec::with_capacity(thresholds.len() * 2 + 1);
        if first != 0.0 {
            zones.push(Zone::ClosedOpen {
                start: 0.0,
                end: first,
            });
        }
        for (index, &value) in thresholds.iter().enumerate() {
            if let Some(&prev) = index.checked_sub(1).and_then(|i| thresholds.get(i)) {
                zones.push(Zone::OpenOpen {
                    start: prev,
                    end: value,
                });
            }
            zones.push(Zone::point(value));
        }
        if last != 1.0 {
            zones.push(Zone::OpenClosed {
                start: last,
                end: 1.0,
            });
        }

        let threshold_zones = zones
            .iter()
            .enumerate()
            .filter(|(_, zone)| zone.is_threshold())
            .map(|(position, _)| position)
            .collect();

        Ok(Self {
            thresholds: thresholds.to_vec(),
            zones,
            threshold_zones,
        })
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Ascending zone positions of the threshold (point) zones.
    pub fn threshold_zone_indexes(&self) -> &[usize] {
        &self.threshold_zones
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Position of the zone containing `value`, by linear scan.
    pub fn locate(&self, value: f64) -> Option<usize> {
        locate(&self.zones, value)
    }

    /// Maps a zone position back to the index of its configured threshold.
    pub fn threshold_index_for_zone(&self, zone: usize) -> Option<usize> {
        threshold_index_for_zone(&self.threshold_zones, zone)
    }
}

pub(crate) fn locate(zones: &[Zone], value: f64) -> Option<usize> {
    zones.iter().position(|zone| zone.contains(value))
}

pub(crate) fn threshold_index_for_zone(threshold_zones: &[usize], zone: usize) -> Option<usize> {
    threshold_zones.iter().position(|&position| position == zone)
}
