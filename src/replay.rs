//! Replay driver for recorded struct-logs
//!
//! Feeds a JSON-lines instruction log through an [`NgramTracer`] the same
//! way a live VM tracer would: successful instructions go to `step`,
//! instructions carrying an `error` go to `fault` and never to `step`.
//!
//! Each line is one struct-log entry. Only the opcode and depth matter;
//! every other field (`pc`, `gas`, `stack`, ...) is ignored:
//!
//! ```text
//! {"pc":0,"op":"PUSH1","gas":"0x2540be400","depth":1}
//! {"pc":2,"op":96,"opName":"PUSH1","depth":1}
//! {"pc":4,"op":"SSTORE","depth":1,"error":"out of gas"}
//! ```

use serde::Deserialize;
use std::io::BufRead;
use thiserror::Error;

use crate::config::NgramConfig;
use crate::sequence::{CallDepth, Histogram, NgramTracer, StepLog};

/// Errors for struct-log replay
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Failed to read struct-log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed struct-log entry on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Struct-log entry on line {line} has no opcode mnemonic")]
    MissingOpcode { line: usize },

    #[error("Struct-log line {line} is not valid UTF-8")]
    InvalidUtf8 {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReplayError>;

/// One parsed struct-log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLogEntry {
    pub op: String,
    pub depth: CallDepth,
    pub error: Option<String>,
}

impl StructLogEntry {
    /// Entries with a non-empty error are faults
    pub fn is_fault(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

impl StepLog for StructLogEntry {
    fn opcode(&self) -> &str {
        &self.op
    }

    fn depth(&self) -> CallDepth {
        self.depth
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    op: serde_json::Value,
    #[serde(rename = "opName")]
    op_name: Option<String>,
    depth: CallDepth,
    #[serde(default)]
    error: Option<String>,
}

/// Counters describing one replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Entries delivered to `step`
    pub steps: usize,
    /// Entries delivered to `fault`
    pub faults: usize,
    /// Blank lines skipped
    pub skipped: usize,
}

/// Parse a single struct-log line (1-based `line` for error reporting)
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(text: &str, line: usize) -> Result<Option<StructLogEntry>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let raw: RawEntry =
        serde_json::from_str(text).map_err(|source| ReplayError::Parse { line, source })?;

    // Numeric opcodes need the accompanying mnemonic
    let op = match (raw.op_name, raw.op) {
        (Some(name), _) => name,
        (None, serde_json::Value::String(name)) => name,
        (None, _) => return Err(ReplayError::MissingOpcode { line }),
    };

    Ok(Some(StructLogEntry {
        op,
        depth: raw.depth,
        error: raw.error,
    }))
}

/// Drive `tracer` with every entry read from `reader`
pub fn replay<R: BufRead>(reader: R, tracer: &mut NgramTracer) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| match source.kind() {
            std::io::ErrorKind::InvalidData => ReplayError::InvalidUtf8 {
                line: idx + 1,
                source,
            },
            _ => ReplayError::Io(source),
        })?;
        match parse_line(&line, idx + 1)? {
            Some(entry) if entry.is_fault() => {
                tracer.fault(&entry);
                summary.faults += 1;
            }
            Some(entry) => {
                tracer.step(&entry);
                summary.steps += 1;
            }
            None => {
                tracing::warn!(line = idx + 1, "skipping blank struct-log line");
                summary.skipped += 1;
            }
        }
    }

    tracing::debug!(
        steps = summary.steps,
        faults = summary.faults,
        skipped = summary.skipped,
        keys = tracer.on_result().len(),
        "replay finished"
    );

    Ok(summary)
}

/// Replay an in-memory struct-log through a fresh tracer
pub fn replay_str(input: &str, config: NgramConfig) -> Result<Histogram> {
    let mut tracer = NgramTracer::new(config);
    replay(input.as_bytes(), &mut tracer)?;
    Ok(tracer.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_opcode() {
        let entry = parse_line(r#"{"pc":0,"op":"PUSH1","gas":"0x10","depth":1}"#, 1)
            .unwrap()
            .unwrap();
        assert_eq!(entry.op, "PUSH1");
        assert_eq!(entry.depth, 1);
        assert!(!entry.is_fault());
    }

    #[test]
    fn test_parse_numeric_opcode_with_name() {
        let entry = parse_line(r#"{"op":96,"opName":"PUSH1","depth":2}"#, 1)
            .unwrap()
            .unwrap();
        assert_eq!(entry.op, "PUSH1");
        assert_eq!(entry.depth, 2);
    }

    #[test]
    fn test_parse_numeric_opcode_without_name() {
        let err = parse_line(r#"{"op":96,"depth":2}"#, 7).unwrap_err();
        assert!(matches!(err, ReplayError::MissingOpcode { line: 7 }));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_line("   ", 3).unwrap(), None);
    }

    #[test]
    fn test_parse_malformed_reports_line() {
        let err = parse_line("{not json", 12).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 12, .. }));
        assert!(err.to_string().contains("line 12"));
    }

    #[test]
    fn test_empty_error_is_not_a_fault() {
        let entry = parse_line(r#"{"op":"STOP","depth":1,"error":""}"#, 1)
            .unwrap()
            .unwrap();
        assert!(!entry.is_fault());
    }

    #[test]
    fn test_faults_bypass_the_window() {
        let log = r#"{"op":"PUSH1","depth":0}
{"op":"SSTORE","depth":0,"error":"out of gas"}
{"op":"ADD","depth":0}
"#;
        let hist = replay_str(log, NgramConfig::bigram()).unwrap();

        assert_eq!(hist.get("-PUSH1"), Some(1));
        assert_eq!(hist.get("PUSH1-ADD"), Some(1));
        assert!(hist.iter().all(|(key, _)| !key.contains("SSTORE")));
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let mut log = b"{\"op\":\"PUSH1\",\"depth\":0}\n".to_vec();
        log.extend_from_slice(b"{\"op\":\"\xff\xfe\",\"depth\":0}\n");

        let mut tracer = NgramTracer::bigram();
        let err = replay(log.as_slice(), &mut tracer).unwrap_err();

        assert!(matches!(err, ReplayError::InvalidUtf8 { line: 2, .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_replay_summary_counts() {
        let log = "{\"op\":\"A\",\"depth\":0}\n\n{\"op\":\"B\",\"depth\":0,\"error\":\"bad\"}\n";
        let mut tracer = NgramTracer::bigram();
        let summary = replay(log.as_bytes(), &mut tracer).unwrap();

        assert_eq!(
            summary,
            ReplaySummary {
                steps: 1,
                faults: 1,
                skipped: 1
            }
        );
    }
}
