/// Stable identity of one physical contact for the duration of its touch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Cancelled,
}

impl TouchPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Began => "began",
            Self::Moved => "moved",
            Self::Stationary => "stationary",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "began" => Some(Self::Began),
            "moved" => Some(Self::Moved),
            "stationary" => Some(Self::Stationary),
            "ended" => Some(Self::Ended),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// One contact's normalized force, `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSample {
    pub id: ContactId,
    pub force: f64,
}

impl ContactSample {
    pub const fn new(id: ContactId, force: f64) -> Self {
        Self { id, force }
    }

    /// Normalizes a raw force reading against the device maximum.
    ///
    /// The result is clamped to `0.0..=1.0`. A maximum that is not a positive
    /// finite number yields `0.0`.
    pub fn from_raw(id: ContactId, force: f64, max_possible_force: f64) -> Self {
        Self {
            id,
            force: normalize_force(force, max_possible_force),
        }
    }
}

pub fn normalize_force(force: f64, max_possible_force: f64) -> f64 {
    if !max_possible_force.is_finite() || max_possible_force <= 0.0 || force.is_nan() {
        return 0.0;
    }
    (force / max_possible_force).clamp(0.0, 1.0)
}

/// All contacts delivered by one phase callback of the event source.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchBatch {
    pub phase: TouchPhase,
    pub contacts: Vec<ContactSample>,
}

impl TouchBatch {
    pub fn new(phase: TouchPhase, contacts: Vec<ContactSample>) -> Self {
        Self { phase, contacts }
    }

    pub fn single(phase: TouchPhase, sample: ContactSample) -> Self {
        Self {
            phase,
            contacts: vec![sample],
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ContactId) -> Option<&ContactSample> {
        self.contacts.iter().find(|sample| sample.id == id)
    }

    /// The only contact in the batch, if there is exactly one.
    pub fn sole(&self) -> Option<&ContactSample> {
        match self.contacts.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Outward gesture-recognizer state. Always derived from the machine state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecognizerState {
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
    Recognized,
}

impl RecognizerState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Possible => "possible",
            Self::Began => "began",
            Self::Changed => "changed",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Recognized => "recognized",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Ended | Self::Cancelled | Self::Failed | Self::Recognized
        )
    }
}
