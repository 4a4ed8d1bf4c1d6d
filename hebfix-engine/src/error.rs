//! Per-file error types for the fix engine.
//!
//! Every variant here is recoverable at the file boundary: the pass records
//! the failure in the file's outcome and moves on to the next file. Nothing
//! in this module aborts a run.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    /// Reading or writing the file failed. fs-err embeds the path and the
    /// attempted operation in the message.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid UTF-8. The content is left untouched on disk.
    #[error("{path}: invalid utf-8 at byte {valid_up_to}")]
    Decode {
        path: Utf8PathBuf,
        valid_up_to: usize,
    },
}
