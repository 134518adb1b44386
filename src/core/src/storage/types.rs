use std::fmt;

use serde::Serialize;

/// A single recorded time, as shown in the list and stored on its own line.
///
/// The wrapped string is always trimmed and never empty. Its content is not
/// otherwise interpreted: `"00:12:345"` and `"lap one"` are equally valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeRecord(String);

impl TimeRecord {
    /// Validates user input. Returns `None` for empty or whitespace-only
    /// strings, and for strings with an embedded line break since those
    /// cannot be stored as a single line.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains(['\n', '\r']) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Builds a record from one line of the backing file. Blank lines yield `None`.
    pub(crate) fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
