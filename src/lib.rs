//! Threshold crossing detection for normalized contact force.
//!
//! A configured, sorted set of force thresholds in `0.0..=1.0` is turned into
//! a [`ZoneModel`]. The crossing detector compares two samples against that
//! model and reports the farthest threshold reached or crossed, together with
//! the direction of travel, so a coarse sample that skips several thresholds
//! still yields exactly one report per step.
//!
//! [`ThresholdTrackingSession`] drives the detector across the lifecycle of
//! the contact that starts a gesture, and [`SqueezeRecognizer`] is a discrete
//! recognizer for a single press past a force level.
//!
//! ```
//! use forcetrack::{ContactId, ContactSample, ThresholdTrackingSession, TouchBatch, TouchPhase};
//!
//! let mut session = ThresholdTrackingSession::with_thresholds(&[0.25, 0.75]).unwrap();
//! let finger = ContactId(1);
//!
//! session.handle(TouchBatch::single(TouchPhase::Began, ContactSample::new(finger, 0.1)));
//! let out = session.handle(TouchBatch::single(TouchPhase::Moved, ContactSample::new(finger, 0.9)));
//!
//! let crossing = out.crossing.unwrap();
//! assert_eq!(crossing.threshold_index, 1);
//! assert!(crossing.increased);
//! ```

pub mod config;
pub mod crossing;
pub mod session;
pub mod squeeze;
pub mod types;
pub mod zones;

pub use config::{active_config, ConfigError, ForceConfig, SqueezeConfig};
pub use crossing::{evaluate, Crossing, CrossingResult};
pub use session::{SessionOutput, SessionTrace, ThresholdTrackingSession};
pub use squeeze::{SqueezeOutput, SqueezeRecognizer};
pub use types::{
    normalize_force, ContactId, ContactSample, RecognizerState, TouchBatch, TouchPhase,
};
pub use zones::{validate_thresholds, ThresholdError, Zone, ZoneModel};
