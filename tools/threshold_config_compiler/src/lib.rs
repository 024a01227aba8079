//! Compiles `config/force.toml` into a Rust source fragment that the
//! `forcetrack` crate includes at build time.
//!
//! The output is deterministic for a given input so it can be snapshot
//! tested, and every semantic rule the runtime enforces on thresholds is
//! enforced here first, so an invalid configuration never reaches a build.

use std::{fmt::Write as _, fs, path::Path};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigCompilerError {
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ForceConfigFile {
    pub thresholds: ThresholdSection,
    pub squeeze: SqueezeSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdSection {
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SqueezeSection {
    pub threshold: f64,
    #[serde(default = "default_force_capable")]
    pub force_capable: bool,
}

fn default_force_capable() -> bool {
    true
}

pub fn parse_config_file(path: &Path) -> Result<ForceConfigFile, ConfigCompilerError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_config_str(&raw)
}

pub fn parse_config_str(raw: &str) -> Result<ForceConfigFile, ConfigCompilerError> {
    toml::from_str(raw).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &ForceConfigFile) -> Result<(), ConfigCompilerError> {
    let values = &config.thresholds.values;

    for (index, value) in values.iter().enumerate() {
        if !(0.0..=1.0).contains(value) {
            return Err(ConfigCompilerError::Validation(format!(
                "thresholds.values[{index}] = {value} must be within 0..=1"
            )));
        }
    }

    for (index, pair) in values.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        if next == prev {
            return Err(ConfigCompilerError::Validation(format!(
                "thresholds.values[{}] duplicates {prev}",
                index + 1
            )));
        }
        if next < prev {
            return Err(ConfigCompilerError::Validation(format!(
                "thresholds.values must be strictly increasing: values[{}] = {next} follows {prev}",
                index + 1
            )));
        }
    }

    let squeeze = config.squeeze.threshold;
    if !(0.0..=1.0).contains(&squeeze) {
        return Err(ConfigCompilerError::Validation(format!(
            "squeeze.threshold = {squeeze} must be within 0..=1"
        )));
    }

    Ok(())
}

pub fn render_generated_config(config: &ForceConfigFile) -> String {
    let values = config
        .thresholds
        .values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str("// @generated by threshold_config_compiler from config/force.toml. Do not edit.\n");
    out.push('\n');
    out.push_str("pub static FORCE_CONFIG: ForceConfig = ForceConfig {\n");
    let _ = writeln!(out, "    thresholds: &[{values}],");
    out.push_str("    squeeze: SqueezeConfig {\n");
    let _ = writeln!(out, "        threshold: {:?},", config.squeeze.threshold);
    let _ = writeln!(out, "        force_capable: {},", config.squeeze.force_capable);
    out.push_str("    },\n");
    out.push_str("};\n");
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_config_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}
