//! Line-oriented gesture event feed.
//!
//! The daemon reads gesture events from any async line source (stdin in
//! production, a byte slice in tests).  One event per line:
//!
//! ```text
//! # comment
//! start
//! update 12.5 -3
//! finish
//! ```
//!
//! Keywords are case-insensitive.  Blank lines and lines starting with `#`
//! are skipped.  A malformed line yields [`FeedError::Malformed`] with its
//! 1-based line number; the caller decides whether to keep reading.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::application::gesture_session::GestureEvent;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read gesture feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line_no}: {reason}: {line:?}")]
    Malformed {
        line_no: usize,
        line: String,
        reason: &'static str,
    },
}

/// Parses one feed line.  Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns the reason the line is not a gesture event.
pub fn parse_line(line: &str) -> Result<Option<GestureEvent>, &'static str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
    let event = match keyword.as_str() {
        "start" => GestureEvent::Start,
        "finish" => GestureEvent::Finish,
        "update" => {
            let delta_x = parse_delta(words.next())?;
            let delta_y = parse_delta(words.next())?;
            GestureEvent::Update { delta_x, delta_y }
        }
        _ => return Err("unknown event"),
    };

    if words.next().is_some() {
        return Err("trailing input");
    }
    Ok(Some(event))
}

fn parse_delta(word: Option<&str>) -> Result<f64, &'static str> {
    word.ok_or("update needs two deltas")?
        .parse()
        .map_err(|_| "delta is not a number")
}

/// Async reader of gesture events.
pub struct GestureFeed<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: AsyncBufRead + Unpin> GestureFeed<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Next event, or `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// [`FeedError::Io`] if reading fails and [`FeedError::Malformed`] for a
    /// line that is not an event.  The feed stays usable after a malformed
    /// line.
    pub async fn next_event(&mut self) -> Result<Option<GestureEvent>, FeedError> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;
            match parse_line(&line) {
                Ok(Some(event)) => return Ok(Some(event)),
                Ok(None) => continue,
                Err(reason) => {
                    return Err(FeedError::Malformed {
                        line_no: self.line_no,
                        line,
                        reason,
                    })
                }
            }
        }
        Ok(None)
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
