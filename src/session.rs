//! Force threshold tracking for the contact that starts a gesture.
//!
//! [`ThresholdTrackingSession`] follows one contact from `began` to `ended`
//! or `cancelled`, runs every force change through the crossing detector and
//! notifies the caller whenever a configured threshold is reached or
//! crossed. Gestures that start with several contacts at once fail; contacts
//! added later are handed back to the caller as ignored.

mod hsm;

use tracing::debug;

use crate::{
    config::ConfigError,
    crossing::{Crossing, CrossingResult},
    types::{ContactId, RecognizerState, TouchBatch},
    zones::{ThresholdError, ZoneModel},
};

use hsm::{ConfigureStatus, SessionEvent, SessionMachine};

/// What the detector saw while handling one batch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionTrace {
    pub state: RecognizerState,
    pub previous_value: Option<f64>,
    pub current_value: Option<f64>,
    pub result: CrossingResult,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionOutput {
    /// Crossing reported by this batch, at most one.
    pub crossing: Option<Crossing>,
    /// Contacts the event source should stop delivering to this session.
    pub ignored: Vec<ContactId>,
    pub trace: SessionTrace,
}

type CrossingHook = Box<dyn FnMut(&Crossing)>;

pub struct ThresholdTrackingSession {
    machine: SessionMachine,
    on_crossing: Option<CrossingHook>,
}

impl Default for ThresholdTrackingSession {
    fn default() -> Self {
        Self::new(ZoneModel::empty())
    }
}

impl ThresholdTrackingSession {
    pub fn new(model: ZoneModel) -> Self {
        Self {
            machine: SessionMachine::new(model),
            on_crossing: None,
        }
    }

    pub fn with_thresholds(thresholds: &[f64]) -> Result<Self, ThresholdError> {
        Ok(Self::new(ZoneModel::build(thresholds)?))
    }

    /// Registers the hook called synchronously for every reported crossing.
    pub fn on_crossing(&mut self, hook: impl FnMut(&Crossing) + 'static) {
        self.on_crossing = Some(Box::new(hook));
    }

    /// Delivers the contacts of one phase callback.
    pub fn handle(&mut self, batch: TouchBatch) -> SessionOutput {
        let context = self.machine.dispatch(&SessionEvent::Touches(batch));
        let mut trace = context.trace;
        trace.state = self.state();

        if let Some(crossing) = context.crossing {
            debug!(
                threshold_index = crossing.threshold_index,
                increased = crossing.increased,
                state = trace.state.label(),
                "force threshold crossed"
            );
            if let Some(hook) = self.on_crossing.as_mut() {
                hook(&crossing);
            }
        }

        SessionOutput {
            crossing: context.crossing,
            ignored: context.ignored,
            trace,
        }
    }

    /// Returns the session to `Possible` and forgets the last crossing.
    pub fn reset(&mut self) {
        let _ = self.machine.dispatch(&SessionEvent::Reset);
    }

    /// Replaces the threshold set.
    ///
    /// Refused while a contact is being tracked; the current thresholds stay
    /// in force until the gesture ends and the session is reset.
    pub fn set_thresholds(&mut self, thresholds: &[f64]) -> Result<(), ConfigError> {
        let model = ZoneModel::build(thresholds)?;
        let context = self.machine.dispatch(&SessionEvent::Configure(model));
        match context.configure {
            ConfigureStatus::Applied => Ok(()),
            ConfigureStatus::Rejected | ConfigureStatus::NotRequested => {
                Err(ConfigError::SessionActive)
            }
        }
    }

    pub fn thresholds(&self) -> &[f64] {
        self.machine.model().thresholds()
    }

    pub fn state(&self) -> RecognizerState {
        self.machine.snapshot().state
    }

    /// Contact being tracked, or the one that ended or cancelled the gesture.
    pub fn current_contact(&self) -> Option<ContactId> {
        self.machine.snapshot().contact
    }

    /// Last normalized force seen for the tracked contact.
    pub fn current_value(&self) -> Option<f64> {
        self.machine.snapshot().value
    }

    pub fn last_crossing(&self) -> Option<Crossing> {
        self.machine.last_crossing()
    }

    pub fn last_crossed_threshold(&self) -> Option<f64> {
        self.last_crossing()
            .and_then(|crossing| self.thresholds().get(crossing.threshold_index))
            .copied()
    }
}
