//! 2-D electrode layout used to place graph nodes.
//!
//! File format (whitespace separated, first line is a header and ignored):
//!
//! ```text
//! index label x y
//! 1     Fc5.  -0.56  0.29
//! 2     Fc3.  -0.38  0.30
//! ```
//!
//! Trailing `.` characters are stripped from labels so they match the cleaned
//! channel names of a [`Recording`](crate::Recording).
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Mapping from channel label to `(x, y)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelLayout {
    positions: HashMap<String, (f64, f64)>,
}

impl ChannelLayout {
    /// Read a layout file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::LayoutParse {
            path: path.to_path_buf(),
            line: 0,
            reason: e.to_string(),
        })?;
        let layout = parse_rows(&text).map_err(|(line, reason)| Error::LayoutParse {
            path: path.to_path_buf(),
            line,
            reason,
        })?;
        log::debug!("loaded {} electrode positions from {}", layout.len(), path.display());
        Ok(layout)
    }

    /// Parse layout text. Errors are [`Error::LayoutParse`] with an empty
    /// path and the 1-based line number.
    pub fn parse(text: &str) -> Result<Self> {
        parse_rows(text).map_err(|(line, reason)| Error::LayoutParse {
            path: PathBuf::new(),
            line,
            reason,
        })
    }

    pub fn get(&self, label: &str) -> Option<(f64, f64)> {
        self.positions.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over `(label, (x, y))` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, (f64, f64))> {
        self.positions.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Line-level parse; errors are `(line_no, reason)`.
fn parse_rows(text: &str) -> std::result::Result<ChannelLayout, (usize, String)> {
    let mut lines = text.lines().enumerate();
    if lines.next().is_none() {
        return Err((1, "missing header line".to_string()));
    }

    let mut positions = HashMap::new();
    for (i, line) in lines {
        let line_no = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let [_index, label, x, y] = fields[..] else {
            return Err((line_no, format!("expected 4 fields, found {}", fields.len())));
        };
        let x: f64 = x
            .parse()
            .map_err(|_| (line_no, format!("invalid x coordinate {x:?}")))?;
        let y: f64 = y
            .parse()
            .map_err(|_| (line_no, format!("invalid y coordinate {y:?}")))?;
        positions.insert(label.trim_end_matches('.').to_string(), (x, y));
    }
    Ok(ChannelLayout { positions })
}

/// Default layout location relative to the working directory.
pub fn default_layout_path() -> PathBuf {
    PathBuf::from(crate::config::DEFAULT_LAYOUT_PATH)
}
