use super::*;
use crate::types::{ContactId, ContactSample};

fn one(phase: TouchPhase, force: f64) -> TouchBatch {
    TouchBatch::single(phase, ContactSample::new(ContactId(1), force))
}

fn two(phase: TouchPhase) -> TouchBatch {
    TouchBatch::new(
        phase,
        vec![
            ContactSample::new(ContactId(1), 0.9),
            ContactSample::new(ContactId(2), 0.9),
        ],
    )
}

#[test]
fn recognizes_once_when_force_reaches_threshold() {
    let mut squeeze = SqueezeRecognizer::default();

    let first = squeeze.handle(one(TouchPhase::Began, 0.2));
    assert!(!first.recognized);
    assert_eq!(first.state, RecognizerState::Possible);

    let second = squeeze.handle(one(TouchPhase::Moved, 0.5));
    assert!(second.recognized);
    assert_eq!(second.state, RecognizerState::Recognized);

    let third = squeeze.handle(one(TouchPhase::Moved, 0.9));
    assert!(!third.recognized);
    assert_eq!(third.state, RecognizerState::Recognized);
}

#[test]
fn release_below_threshold_leaves_recognizer_possible() {
    let mut squeeze = SqueezeRecognizer::default();
    squeeze.handle(one(TouchPhase::Began, 0.1));
    squeeze.handle(one(TouchPhase::Stationary, 0.3));
    let out = squeeze.handle(one(TouchPhase::Ended, 0.2));
    assert!(!out.recognized);
    assert_eq!(out.state, RecognizerState::Possible);
}

#[test]
fn two_contacts_fail() {
    let mut squeeze = SqueezeRecognizer::default();
    let out = squeeze.handle(two(TouchPhase::Began));
    assert!(!out.recognized);
    assert_eq!(out.state, RecognizerState::Failed);
}

#[test]
fn cancellation_fails() {
    let mut squeeze = SqueezeRecognizer::default();
    squeeze.handle(one(TouchPhase::Began, 0.1));
    let out = squeeze.handle(one(TouchPhase::Cancelled, 0.9));
    assert!(!out.recognized);
    assert_eq!(out.state, RecognizerState::Failed);
}

#[test]
fn device_without_force_fails() {
    let mut squeeze = SqueezeRecognizer::new(SqueezeConfig {
        threshold: 0.5,
        force_capable: false,
    })
    .expect("valid config");
    let out = squeeze.handle(one(TouchPhase::Began, 1.0));
    assert_eq!(out.state, RecognizerState::Failed);
}

#[test]
fn reset_rearms_after_terminal_states() {
    let mut squeeze = SqueezeRecognizer::default();
    squeeze.handle(two(TouchPhase::Began));
    assert_eq!(squeeze.state(), RecognizerState::Failed);

    squeeze.reset();
    assert_eq!(squeeze.state(), RecognizerState::Possible);
    assert!(squeeze.handle(one(TouchPhase::Began, 0.7)).recognized);
}

#[test]
fn custom_threshold_is_respected() {
    let mut squeeze = SqueezeRecognizer::new(SqueezeConfig {
        threshold: 0.8,
        force_capable: true,
    })
    .expect("valid config");
    assert!(!squeeze.handle(one(TouchPhase::Began, 0.7)).recognized);
    assert!(squeeze.handle(one(TouchPhase::Moved, 0.8)).recognized);
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let err = SqueezeRecognizer::new(SqueezeConfig {
        threshold: -0.2,
        force_capable: true,
    })
    .err();
    assert_eq!(err, Some(ConfigError::SqueezeOutOfRange(-0.2)));
}
