use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{bail, Context, Result};
use forcetrack::{ContactId, ContactSample, TouchBatch, TouchPhase};

const TRACE_TAG: &str = "force_trace";

/// One phase callback reconstructed from consecutive trace lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedBatch {
    pub ms: u64,
    pub batch: TouchBatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpectedCrossing {
    pub index: usize,
    pub increased: bool,
}

impl ExpectedCrossing {
    pub fn token(self) -> String {
        format!("{}{}", self.index, if self.increased { '+' } else { '-' })
    }
}

pub fn parse_trace(path: &Path) -> Result<Vec<TimedBatch>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_trace_lines(BufReader::new(file), path)
}

/// Lines are `force_trace,ms,phase,contact,force[,max_force]`. Consecutive
/// lines sharing `ms` and `phase` belong to the same batch. When `max_force`
/// is present `force` is a raw device reading and gets normalized.
pub fn parse_trace_lines(reader: impl BufRead, path: &Path) -> Result<Vec<TimedBatch>> {
    let mut out: Vec<TimedBatch> = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("failed to read {}:{line_no}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts[0] != TRACE_TAG || parts.get(1) == Some(&"ms") {
            continue;
        }
        if parts.len() < 5 {
            bail!(
                "{}:{line_no} invalid trace line, expected at least 5 columns",
                path.display()
            );
        }

        let at = |field: &str| format!("{}:{line_no} invalid {field}", path.display());
        let ms: u64 = parts[1].parse().with_context(|| at("ms"))?;
        let phase = TouchPhase::from_label(&parts[2].to_ascii_lowercase())
            .with_context(|| format!("{}:{line_no} unknown phase '{}'", path.display(), parts[2]))?;
        let contact = ContactId(parts[3].parse().with_context(|| at("contact"))?);
        let force: f64 = parts[4].parse().with_context(|| at("force"))?;
        let sample = match parts.get(5) {
            Some(max) => {
                let max: f64 = max.parse().with_context(|| at("max_force"))?;
                ContactSample::from_raw(contact, force, max)
            }
            None => ContactSample::new(contact, force),
        };

        match out.last_mut() {
            Some(last) if last.ms == ms && last.batch.phase == phase => {
                last.batch.contacts.push(sample);
            }
            _ => out.push(TimedBatch {
                ms,
                batch: TouchBatch::single(phase, sample),
            }),
        }
    }

    Ok(out)
}

pub fn parse_expected(path: &Path) -> Result<Vec<ExpectedCrossing>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut expected = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("failed to read {}:{line_no}", path.display()))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }

        let crossing = parse_expected_token(token).with_context(|| {
            format!(
                "{}:{line_no} invalid expected crossing: {token}",
                path.display()
            )
        })?;
        expected.push(crossing);
    }

    Ok(expected)
}

fn parse_expected_token(token: &str) -> Option<ExpectedCrossing> {
    let (index, increased) = if let Some(index) = token.strip_suffix('+') {
        (index, true)
    } else {
        (token.strip_suffix('-')?, false)
    };
    Some(ExpectedCrossing {
        index: index.trim().parse().ok()?,
        increased,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn parse(raw: &str) -> Result<Vec<TimedBatch>> {
        parse_trace_lines(raw.as_bytes(), Path::new("inline.csv"))
    }

    #[test]
    fn groups_lines_by_timestamp_and_phase() {
        let batches = parse(
            "force_trace,ms,phase,contact,force\n\
             force_trace,0,began,1,0.1\n\
             force_trace,0,began,2,0.2\n\
             force_trace,16,moved,1,0.4\n\
             force_trace,16,stationary,2,0.2\n\
             force_trace,32,moved,1,0.6\n",
        )
        .unwrap();

        let shape: Vec<(u64, TouchPhase, usize)> = batches
            .iter()
            .map(|b| (b.ms, b.batch.phase, b.batch.len()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (0, TouchPhase::Began, 2),
                (16, TouchPhase::Moved, 1),
                (16, TouchPhase::Stationary, 1),
                (32, TouchPhase::Moved, 1),
            ]
        );
    }

    #[test]
    fn raw_force_is_normalized_when_max_is_given() {
        let batches = parse("force_trace,0,began,1,3.0,6.0\nforce_trace,8,moved,1,9.0,6.0\n")
            .unwrap();
        assert_eq!(batches[0].batch.contacts[0].force, 0.5);
        assert_eq!(batches[1].batch.contacts[0].force, 1.0);
    }

    #[test]
    fn comments_and_foreign_lines_are_skipped() {
        let batches = parse("# captured on device\ntouch_trace,0,1\nforce_trace,0,began,1,0.3\n")
            .unwrap();
        assert_eq!(batches.len(), 1);
    }

    #[test]
    fn malformed_lines_report_their_location() {
        let err = parse("force_trace,0,began,1\n").unwrap_err();
        assert!(err.to_string().contains("inline.csv:1"), "{err}");

        let err = parse("force_trace,0,hover,1,0.2\n").unwrap_err();
        assert!(err.to_string().contains("unknown phase 'hover'"), "{err}");

        let err = parse("force_trace,0,began,1,heavy\n").unwrap_err();
        assert!(err.to_string().contains("invalid force"), "{err}");
    }

    #[test]
    fn expected_file_lists_signed_indexes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# rising then falling\n0+\n2+\n\n1-").unwrap();

        let expected = parse_expected(file.path()).unwrap();
        let tokens: Vec<String> = expected.iter().map(|e| e.token()).collect();
        assert_eq!(tokens, vec!["0+", "2+", "1-"]);
    }

    #[test]
    fn expected_file_rejects_missing_direction() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "3").unwrap();
        assert!(parse_expected(file.path()).is_err());
    }
}
