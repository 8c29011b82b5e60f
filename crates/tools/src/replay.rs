//! Drive a [`FieldSession`] from a JSON-lines event stream.

use std::io::{BufRead, Write};

use serde::Serialize;
use session::{FieldSession, SessionEvent, SessionUpdate};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Parse { line: usize, reason: String },
    Encode(serde_json::Error),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "io: {e}"),
            ReplayError::Parse { line, reason } => {
                write!(f, "line {line}: {reason}")
            }
            ReplayError::Encode(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(value: std::io::Error) -> Self {
        ReplayError::Io(value)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub events: usize,
    pub rejected: usize,
    pub skipped_lines: usize,
}

/// Apply each event line from `input` and write one JSON update per event to
/// `output`. Blank lines and `#` comments are ignored. Malformed lines abort
/// the replay when `strict`, otherwise they are skipped with a warning.
pub fn replay<R: BufRead, W: Write>(
    session: &mut FieldSession,
    input: R,
    mut output: W,
    strict: bool,
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: SessionEvent = match serde_json::from_str(trimmed) {
            Ok(ev) => ev,
            Err(e) if strict => {
                return Err(ReplayError::Parse {
                    line: line_no,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed event");
                summary.skipped_lines += 1;
                continue;
            }
        };

        let update = session.apply(event);
        if let SessionUpdate::Rejected { .. } = update {
            summary.rejected += 1;
        }
        summary.events += 1;
        debug!(line = line_no, kind = event.kind(), "event applied");

        serde_json::to_writer(&mut output, &update).map_err(ReplayError::Encode)?;
        output.write_all(b"\n")?;
    }

    output.flush()?;
    Ok(summary)
}
