/// Errors surfaced by the history workflows.
///
/// Store failures never appear here: the history degrades and logs instead.
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the chunked base64 codec.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Encoded payload length {len} is not a multiple of 4")]
    InvalidLength { len: usize },

    #[error("Invalid base64 in chunk at offset {offset}: {source}")]
    InvalidBase64 {
        offset: usize,
        #[source]
        source: base64::DecodeError,
    },
}

/// Reasons a document could not be opened or re-opened.
#[derive(Error, Debug)]
pub enum OpenError {
    /// Reading a selected file's bytes failed.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A URL was requested but nothing usable was entered.
    #[error("No URL given")]
    EmptyUrl,

    /// No history entry has the requested id.
    #[error("No history entry with id '{id}'")]
    NotFound { id: String },

    /// The entry refers to a file whose bytes were not kept.
    #[error("'{label}' was not stored locally. Please re-select the file.")]
    SourceUnavailable { label: String },

    /// The entry carries a payload that does not decode.
    #[error("Stored content for '{label}' is corrupt: {source}")]
    CorruptInlineData {
        label: String,
        #[source]
        source: CodecError,
    },
}

impl OpenError {
    /// Message suitable for showing to the user.
    ///
    /// I/O details stay in the log; the user only learns that reading failed.
    pub fn user_message(&self) -> String {
        match self {
            Self::FileRead { path, .. } => format!(
                "Failed to read {}. See the log for details.",
                path.display()
            ),
            other => other.to_string(),
        }
    }
}
