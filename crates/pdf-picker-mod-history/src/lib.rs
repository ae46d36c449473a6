/// Recently opened documents, persisted through a key/value store.
///
/// `RecentDocumentHistory` keeps a bounded, most-recent-first list of
/// `DocumentReference`s and rewrites the whole list into the store after
/// every change. File entries may carry their bytes inline (chunked base64)
/// so they can be reopened without the original file.
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod history;

pub use config::{HistoryConfig, MAX_ENTRIES};
pub use document::{read_local_file, DocumentKind, DocumentReference, LoadedFile, ViewerSource};
pub use error::{CodecError, OpenError};
pub use history::RecentDocumentHistory;
