//! Source locations and the source-origin mapping.
//!
//! Every construct this crate classifies is identified by a [`SourceLocation`]:
//! a byte span in one original file together with its 1-indexed start/end
//! lines. Locations are minted through a [`SourceMap`] so that line numbers
//! always agree with the byte offsets they were derived from, even when the
//! parsed representation went through preprocessing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;
use std::sync::Arc;

/// Serialize `Arc<PathBuf>` as a plain `PathBuf` for JSON output.
fn serialize_arc_path<S>(path: &Arc<PathBuf>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    path.as_ref().serialize(serializer)
}

/// Deserialize a plain `PathBuf` into `Arc<PathBuf>`.
fn deserialize_arc_path<'de, D>(deserializer: D) -> Result<Arc<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    PathBuf::deserialize(deserializer).map(Arc::new)
}

/// A span in one original source file.
///
/// Offsets are byte offsets into the original file text, half-open
/// (`start..end`). Lines are 1-indexed. The file path is shared via `Arc`
/// because every statement, edge, and structure of a translation unit points
/// at the same file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceLocation {
    /// The file this span lies in.
    #[serde(
        serialize_with = "serialize_arc_path",
        deserialize_with = "deserialize_arc_path"
    )]
    pub file: Arc<PathBuf>,
    /// Starting byte offset (inclusive).
    pub start: usize,
    /// Ending byte offset (exclusive).
    pub end: usize,
    /// 1-indexed line of `start`.
    pub start_line: usize,
    /// 1-indexed line of the last byte of the span.
    pub end_line: usize,
}

impl SourceLocation {
    /// True iff `other` lies within this span: same file and the offset
    /// interval of `other` is a subset of this one.
    #[must_use]
    pub fn contains(&self, other: &SourceLocation) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }
}

// Identity is the file plus the byte interval; lines are derived data and a
// location stamped twice through the same SourceMap always carries the same
// lines.
impl PartialEq for SourceLocation {
    fn eq(&self, other: &Self) -> bool {
        self.file == other.file && self.start == other.start && self.end == other.end
    }
}

impl Eq for SourceLocation {}

impl std::hash::Hash for SourceLocation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.file.hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{} ({}..{})",
            self.file.display(),
            self.start_line,
            self.end_line,
            self.start,
            self.end
        )
    }
}

/// Maps byte offsets in one original file back to line numbers.
///
/// The external parser works with byte offsets; downstream analyses report in
/// file/line coordinates. The map records the byte index of the start of each
/// line and answers lookups by binary search.
#[derive(Debug, Clone)]
pub struct SourceMap {
    file: Arc<PathBuf>,
    /// Byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Builds a map for `file` by scanning `source` for newlines.
    /// Byte iteration suffices since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            file: Arc::new(file.into()),
            line_starts,
        }
    }

    /// The file this map was built for.
    #[must_use]
    pub fn file(&self) -> &Arc<PathBuf> {
        &self.file
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Stamps a location for the half-open byte span `start..end`.
    ///
    /// The end line is taken from the last byte of the span so that a span
    /// ending exactly on a newline does not spill onto the following line.
    #[must_use]
    pub fn location(&self, start: usize, end: usize) -> SourceLocation {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        SourceLocation {
            file: Arc::clone(&self.file),
            start,
            end,
            start_line: self.line_of(start),
            end_line: self.line_of(end.saturating_sub(1).max(start)),
        }
    }
}
