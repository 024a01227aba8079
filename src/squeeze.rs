use statig::{blocking::IntoStateMachineExt as _, prelude::*};
use tracing::debug;

use crate::{
    config::{ConfigError, SqueezeConfig},
    types::{RecognizerState, TouchBatch, TouchPhase},
};

#[derive(Debug)]
enum SqueezeEvent {
    Touches(TouchBatch),
    Reset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SqueezeOutput {
    /// Set only on the batch that completed the squeeze.
    pub recognized: bool,
    pub state: RecognizerState,
}

#[derive(Default)]
struct DispatchContext {
    recognized: bool,
}

/// Discrete recognizer for a single contact pressing past a force level.
pub struct SqueezeRecognizer {
    machine: statig::blocking::StateMachine<SqueezeHsm>,
}

impl Default for SqueezeRecognizer {
    fn default() -> Self {
        Self {
            machine: SqueezeHsm {
                config: SqueezeConfig::default(),
            }
            .state_machine(),
        }
    }
}

impl SqueezeRecognizer {
    pub fn new(config: SqueezeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            machine: SqueezeHsm { config }.state_machine(),
        })
    }

    pub fn config(&self) -> SqueezeConfig {
        self.machine.inner().config
    }

    pub fn handle(&mut self, batch: TouchBatch) -> SqueezeOutput {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&SqueezeEvent::Touches(batch), &mut context);
        SqueezeOutput {
            recognized: context.recognized,
            state: self.state(),
        }
    }

    pub fn reset(&mut self) {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&SqueezeEvent::Reset, &mut context);
    }

    pub fn state(&self) -> RecognizerState {
        match self.machine.state() {
            State::Possible { .. } => RecognizerState::Possible,
            State::Recognized { .. } => RecognizerState::Recognized,
            State::Failed { .. } => RecognizerState::Failed,
        }
    }
}

struct SqueezeHsm {
    config: SqueezeConfig,
}

#[state_machine(initial = "State::possible()")]
impl SqueezeHsm {
    #[state(superstate = "recognizer")]
    fn possible(&mut self, context: &mut DispatchContext, event: &SqueezeEvent) -> Outcome<State> {
        let SqueezeEvent::Touches(batch) = event else {
            return Super;
        };

        if batch.phase == TouchPhase::Cancelled {
            return Transition(State::failed());
        }

        let sample = match batch.sole() {
            Some(sample) if self.config.force_capable => sample,
            _ => {
                debug!(
                    contacts = batch.len(),
                    force_capable = self.config.force_capable,
                    "squeeze needs exactly one contact on a force capable device"
                );
                return Transition(State::failed());
            }
        };

        if sample.force >= self.config.threshold {
            context.recognized = true;
            return Transition(State::recognized());
        }
        Handled
    }

    #[state(superstate = "recognizer")]
    fn recognized(context: &mut DispatchContext, event: &SqueezeEvent) -> Outcome<State> {
        let _ = context;
        match event {
            SqueezeEvent::Touches(_) => Handled,
            SqueezeEvent::Reset => Super,
        }
    }

    #[state(superstate = "recognizer")]
    fn failed(context: &mut DispatchContext, event: &SqueezeEvent) -> Outcome<State> {
        let _ = context;
        match event {
            SqueezeEvent::Touches(_) => Handled,
            SqueezeEvent::Reset => Super,
        }
    }

    #[superstate]
    fn recognizer(context: &mut DispatchContext, event: &SqueezeEvent) -> Outcome<State> {
        let _ = context;
        match event {
            SqueezeEvent::Reset => Transition(State::possible()),
            SqueezeEvent::Touches(_) => Handled,
        }
    }
}

#[cfg(test)]
mod tests;
