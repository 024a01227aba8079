use std::path::Path;

use anyhow::{Context, Result};
use forcetrack::{
    active_config, RecognizerState, SqueezeConfig, SqueezeRecognizer, ThresholdTrackingSession,
    TouchPhase, ZoneModel,
};
use threshold_config_compiler::{parse_config_file, validate_config};
use tracing::{debug, info};

use crate::trace::{ExpectedCrossing, TimedBatch};

pub struct ReplaySetup {
    pub model: ZoneModel,
    pub squeeze: SqueezeConfig,
}

impl ReplaySetup {
    pub fn compiled() -> Result<Self> {
        let config = active_config();
        Ok(Self {
            model: config.zone_model().context("compiled thresholds")?,
            squeeze: config.squeeze,
        })
    }

    /// Loads a config file with the same rules the build applies to
    /// `config/force.toml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = parse_config_file(path)?;
        validate_config(&file)?;
        Ok(Self {
            model: ZoneModel::build(&file.thresholds.values)
                .with_context(|| format!("thresholds in {}", path.display()))?,
            squeeze: SqueezeConfig {
                threshold: file.squeeze.threshold,
                force_capable: file.squeeze.force_capable,
            },
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReplayRow {
    Crossing {
        ms: u64,
        index: usize,
        threshold: f64,
        increased: bool,
    },
    Squeeze {
        ms: u64,
    },
}

impl ReplayRow {
    pub fn csv(&self) -> String {
        match *self {
            Self::Crossing {
                ms,
                index,
                threshold,
                increased,
            } => format!(
                "crossing,{ms},{index},{threshold},{}",
                if increased { "up" } else { "down" }
            ),
            Self::Squeeze { ms } => format!("squeeze,{ms}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReplayReport {
    pub rows: Vec<ReplayRow>,
    pub state: RecognizerState,
    pub squeeze_state: RecognizerState,
}

impl ReplayReport {
    pub fn crossings(&self) -> Vec<ExpectedCrossing> {
        self.rows
            .iter()
            .filter_map(|row| match *row {
                ReplayRow::Crossing {
                    index, increased, ..
                } => Some(ExpectedCrossing { index, increased }),
                ReplayRow::Squeeze { .. } => None,
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("kind,ms,index,threshold,direction\n");
        for row in &self.rows {
            out.push_str(&row.csv());
            out.push('\n');
        }
        out.push_str(&format!("state,{}\n", self.state.label()));
        out.push_str(&format!("squeeze_state,{}\n", self.squeeze_state.label()));
        out
    }
}

/// Runs a tracking session and a squeeze recognizer side by side over the
/// whole trace. A fresh gesture after a terminal state resets both.
pub fn replay(setup: ReplaySetup, batches: &[TimedBatch]) -> Result<ReplayReport> {
    let thresholds = setup.model.thresholds().to_vec();
    let mut session = ThresholdTrackingSession::new(setup.model);
    let mut squeeze = SqueezeRecognizer::new(setup.squeeze)?;
    let mut rows = Vec::new();

    for timed in batches {
        if timed.batch.phase == TouchPhase::Began && session.state().is_terminal() {
            debug!(ms = timed.ms, "new gesture, resetting recognizers");
            session.reset();
            squeeze.reset();
        }

        let out = session.handle(timed.batch.clone());
        if let Some(crossing) = out.crossing {
            let index = crossing.threshold_index;
            let threshold = thresholds
                .get(index)
                .copied()
                .with_context(|| format!("crossing index {index} out of range"))?;
            rows.push(ReplayRow::Crossing {
                ms: timed.ms,
                index,
                threshold,
                increased: crossing.increased,
            });
        }
        for id in &out.ignored {
            debug!(ms = timed.ms, contact = id.0, "contact ignored");
        }

        if squeeze.handle(timed.batch.clone()).recognized {
            rows.push(ReplayRow::Squeeze { ms: timed.ms });
        }
    }

    info!(
        batches = batches.len(),
        rows = rows.len(),
        state = session.state().label(),
        "replay complete"
    );
    Ok(ReplayReport {
        rows,
        state: session.state(),
        squeeze_state: squeeze.state(),
    })
}
