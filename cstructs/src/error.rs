//! Parse-failure classification at the library boundary.
//!
//! Parsing itself happens upstream; what this crate defines is the one
//! distinction the calling wrapper needs to act on when hand-off fails. A
//! plain failure is terminal for the file, while a failure that points at
//! unexpanded preprocessor input means the same file can be retried after
//! running it through the preprocessor.

use std::path::PathBuf;
use thiserror::Error;

/// Why a file never produced a translation unit.
#[derive(Debug, Error)]
pub enum ParseFailure {
    /// The external parser rejected the file outright.
    #[error("parsing failed for {}", file.display())]
    Failed {
        /// The file that was handed to the parser.
        file: PathBuf,
    },
    /// The parser choked on constructs that preprocessing would have removed.
    /// The caller should preprocess the file and retry.
    #[error("{} needs preprocessing before it can be parsed", file.display())]
    NeedsPreprocessing {
        /// The file that was handed to the parser.
        file: PathBuf,
    },
}

impl ParseFailure {
    /// True when retrying after preprocessing may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ParseFailure::NeedsPreprocessing { .. })
    }
}
