use statig::{blocking::IntoStateMachineExt as _, prelude::*};
use tracing::{debug, warn};

use crate::{
    crossing::{Crossing, CrossingResult},
    types::{ContactId, RecognizerState, TouchBatch, TouchPhase},
    zones::ZoneModel,
};

use super::SessionTrace;

#[derive(Debug)]
pub(super) enum SessionEvent {
    Touches(TouchBatch),
    Configure(ZoneModel),
    Reset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) enum ConfigureStatus {
    #[default]
    NotRequested,
    Applied,
    Rejected,
}

#[derive(Debug, Default)]
pub(super) struct DispatchContext {
    pub(super) crossing: Option<Crossing>,
    pub(super) ignored: Vec<ContactId>,
    pub(super) configure: ConfigureStatus,
    pub(super) trace: SessionTrace,
}

/// Projection of the machine state for outward reads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) struct StateSnapshot {
    pub(super) state: RecognizerState,
    pub(super) contact: Option<ContactId>,
    pub(super) value: Option<f64>,
}

pub(super) struct SessionMachine {
    machine: statig::blocking::StateMachine<SessionHsm>,
}

impl SessionMachine {
    pub(super) fn new(model: ZoneModel) -> Self {
        Self {
            machine: SessionHsm::new(model).state_machine(),
        }
    }

    pub(super) fn dispatch(&mut self, event: &SessionEvent) -> DispatchContext {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(event, &mut context);
        context
    }

    pub(super) fn model(&self) -> &ZoneModel {
        &self.machine.inner().model
    }

    pub(super) fn last_crossing(&self) -> Option<Crossing> {
        self.machine.inner().last_crossing
    }

    pub(super) fn snapshot(&self) -> StateSnapshot {
        let (state, contact, value) = match self.machine.state() {
            State::Idle { .. } => (RecognizerState::Possible, None, None),
            State::Began {
                contact,
                last_value,
            } => (RecognizerState::Began, Some(*contact), Some(*last_value)),
            State::Changed {
                contact,
                last_value,
            } => (RecognizerState::Changed, Some(*contact), Some(*last_value)),
            State::Ended {
                contact,
                final_value,
            } => (RecognizerState::Ended, Some(*contact), Some(*final_value)),
            State::Cancelled { contact } => (RecognizerState::Cancelled, Some(*contact), None),
            State::Failed { .. } => (RecognizerState::Failed, None, None),
        };
        StateSnapshot {
            state,
            contact,
            value,
        }
    }
}

struct SessionHsm {
    model: ZoneModel,
    last_crossing: Option<Crossing>,
}

impl SessionHsm {
    fn new(model: ZoneModel) -> Self {
        Self {
            model,
            last_crossing: None,
        }
    }

    fn record(&mut self, context: &mut DispatchContext, result: CrossingResult) {
        context.trace.result = result;
        if let CrossingResult::Crossed(crossing) = result {
            self.last_crossing = Some(crossing);
            context.crossing = Some(crossing);
        }
    }

    fn begin(&mut self, context: &mut DispatchContext, value: f64) {
        context.trace.current_value = Some(value);
        let result = self.model.evaluate_initial(value);
        self.record(context, result);
    }

    fn step(&mut self, context: &mut DispatchContext, previous: f64, current: f64) {
        context.trace.previous_value = Some(previous);
        context.trace.current_value = Some(current);
        let result = self.model.evaluate(previous, current);
        self.record(context, result);
    }

    /// Shared handling for a contact that is being tracked, whether or not it
    /// has delivered a change yet.
    fn track(
        &mut self,
        contact: ContactId,
        last_value: f64,
        context: &mut DispatchContext,
        batch: &TouchBatch,
    ) -> Outcome<State> {
        if batch.phase == TouchPhase::Began {
            context.ignored.extend(
                batch
                    .contacts
                    .iter()
                    .map(|sample| sample.id)
                    .filter(|id| *id != contact),
            );
            return Handled;
        }

        let Some(sample) = batch.get(contact) else {
            debug!(
                phase = batch.phase.label(),
                contact = contact.0,
                "batch does not include the tracked contact"
            );
            return Handled;
        };

        match batch.phase {
            TouchPhase::Cancelled => Transition(State::cancelled(contact)),
            TouchPhase::Ended => {
                self.step(context, last_value, sample.force);
                Transition(State::ended(contact, sample.force))
            }
            TouchPhase::Began | TouchPhase::Moved | TouchPhase::Stationary => {
                self.step(context, last_value, sample.force);
                Transition(State::changed(contact, sample.force))
            }
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl SessionHsm {
    #[state(superstate = "session")]
    fn idle(&mut self, context: &mut DispatchContext, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::Touches(batch) if batch.phase == TouchPhase::Began => {
                let Some(sample) = batch.sole() else {
                    debug!(
                        contacts = batch.len(),
                        "gesture started with more than one contact"
                    );
                    return Transition(State::failed());
                };
                self.begin(context, sample.force);
                Transition(State::began(sample.id, sample.force))
            }
            SessionEvent::Touches(batch) => {
                warn!(
                    phase = batch.phase.label(),
                    "touch update delivered before any contact began"
                );
                Transition(State::failed())
            }
            _ => Super,
        }
    }

    #[state(superstate = "tracking")]
    fn began(
        &mut self,
        contact: &ContactId,
        last_value: &f64,
        context: &mut DispatchContext,
        event: &SessionEvent,
    ) -> Outcome<State> {
        match event {
            SessionEvent::Touches(batch) => self.track(*contact, *last_value, context, batch),
            _ => Super,
        }
    }

    #[state(superstate = "tracking")]
    fn changed(
        &mut self,
        contact: &ContactId,
        last_value: &f64,
        context: &mut DispatchContext,
        event: &SessionEvent,
    ) -> Outcome<State> {
        match event {
            SessionEvent::Touches(batch) => self.track(*contact, *last_value, context, batch),
            _ => Super,
        }
    }

    #[state(superstate = "session")]
    fn ended(
        contact: &ContactId,
        final_value: &f64,
        context: &mut DispatchContext,
        event: &SessionEvent,
    ) -> Outcome<State> {
        let _ = (contact, final_value, context);
        match event {
            SessionEvent::Touches(_) => Handled,
            _ => Super,
        }
    }

    #[state(superstate = "session")]
    fn cancelled(
        contact: &ContactId,
        context: &mut DispatchContext,
        event: &SessionEvent,
    ) -> Outcome<State> {
        let _ = (contact, context);
        match event {
            SessionEvent::Touches(_) => Handled,
            _ => Super,
        }
    }

    #[state(superstate = "session")]
    fn failed(context: &mut DispatchContext, event: &SessionEvent) -> Outcome<State> {
        let _ = context;
        match event {
            SessionEvent::Touches(_) => Handled,
            _ => Super,
        }
    }

    #[superstate(superstate = "session")]
    fn tracking(context: &mut DispatchContext, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::Configure(_) => {
                context.configure = ConfigureStatus::Rejected;
                Handled
            }
            _ => Super,
        }
    }

    #[superstate]
    fn session(&mut self, context: &mut DispatchContext, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::Configure(model) => {
                self.model = model.clone();
                context.configure = ConfigureStatus::Applied;
                Handled
            }
            SessionEvent::Reset => {
                self.last_crossing = None;
                Transition(State::idle())
            }
            SessionEvent::Touches(_) => Handled,
        }
    }
}
