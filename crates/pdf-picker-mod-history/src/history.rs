/// Bounded most-recent-first history of opened documents.
///
/// The full list is loaded once at construction and rewritten as one JSON
/// array after every change (last writer wins). Store failures are logged
/// and otherwise ignored: the in-memory list stays authoritative for the
/// session even when nothing reaches the backing store.
use std::collections::HashSet;

use pdf_picker_store::KeyValueStore;

use crate::config::{HistoryConfig, MAX_ENTRIES};
use crate::document::{DocumentReference, LoadedFile, ViewerSource};
use crate::error::OpenError;

pub struct RecentDocumentHistory<S: KeyValueStore> {
    /// Newest first, never longer than `MAX_ENTRIES`.
    entries: Vec<DocumentReference>,
    store: S,
    config: HistoryConfig,
}

impl<S: KeyValueStore> std::fmt::Debug for RecentDocumentHistory<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentDocumentHistory")
            .field("len", &self.entries.len())
            .field("storage_key", &self.config.storage_key)
            .field("save_inline_content", &self.config.save_inline_content)
            .finish()
    }
}

impl<S: KeyValueStore> RecentDocumentHistory<S> {
    /// Creates the history and loads whatever the store holds.
    pub fn new(store: S, config: HistoryConfig) -> Self {
        let mut history = Self {
            entries: Vec::new(),
            store,
            config,
        };
        history.load();
        history
    }

    /// Replaces the in-memory list with the stored one.
    ///
    /// A missing key, a failing store, or a payload that does not parse all
    /// leave the history empty. Stored entries that break the entry
    /// invariants are dropped individually.
    pub fn load(&mut self) {
        self.entries.clear();

        let raw = match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored history under '{}'", self.config.storage_key);
                return;
            }
            Err(e) => {
                tracing::warn!("Could not load history: {e}");
                return;
            }
        };

        match serde_json::from_str::<Vec<DocumentReference>>(&raw) {
            Ok(stored) => {
                self.entries = sanitize(stored);
                tracing::debug!("Loaded {} history entries", self.entries.len());
            }
            Err(e) => {
                tracing::warn!("Discarding malformed history payload: {e}");
            }
        }
    }

    /// Puts `candidate` at the front and drops whatever falls past the cap.
    ///
    /// Entries are not merged by label or URL; opening the same document
    /// twice yields two entries. An existing entry with the same id is
    /// replaced so ids stay unique.
    pub fn add(&mut self, candidate: DocumentReference) -> &DocumentReference {
        self.entries.retain(|entry| entry.id() != candidate.id());
        self.entries.insert(0, candidate);
        self.entries.truncate(MAX_ENTRIES);
        self.persist();
        &self.entries[0]
    }

    /// Removes the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Looks up an entry by id.
    pub fn resolve(&self, id: &str) -> Option<&DocumentReference> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Forgets every entry, in memory and in the store.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(&self.config.storage_key) {
            tracing::warn!("Could not clear stored history: {e}");
        }
    }

    pub fn entries(&self) -> &[DocumentReference] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hands the store back, e.g. to reload it as a fresh session would.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Remembers a file that was just opened.
    ///
    /// The bytes are kept inline only when `save_inline_content` is on and
    /// the file fits under `max_inline_bytes`.
    pub fn record_file(&mut self, file: &LoadedFile) -> &DocumentReference {
        let keep = self.config.keeps_inline(file.bytes.len());
        if self.config.save_inline_content && !keep {
            tracing::warn!(
                "'{}' is {} bytes, over the inline limit; remembering it without content",
                file.label,
                file.bytes.len()
            );
        }
        let inline = keep.then_some(file.bytes.as_slice());
        let entry = DocumentReference::for_file(&file.label, inline);
        self.add(entry)
    }

    /// Remembers a URL that was just opened.
    ///
    /// # Errors
    ///
    /// Returns `OpenError::EmptyUrl` if `url` is blank.
    pub fn record_url(&mut self, url: &str) -> Result<&DocumentReference, OpenError> {
        let entry = DocumentReference::for_url(url)?;
        Ok(self.add(entry))
    }

    /// Turns a history entry back into something a viewer can show.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no entry has `id`.
    /// - `SourceUnavailable` for a file entry that did not keep its bytes.
    /// - `CorruptInlineData` if the kept bytes do not decode.
    pub fn reopen(&self, id: &str) -> Result<ViewerSource, OpenError> {
        let entry = self.resolve(id).ok_or_else(|| OpenError::NotFound {
            id: id.to_string(),
        })?;

        if let Some(url) = entry.url() {
            return Ok(ViewerSource::Url {
                label: entry.label().to_string(),
                url: url.to_string(),
            });
        }

        match entry.decode_inline(self.config.chunk_size) {
            Some(Ok(bytes)) => Ok(ViewerSource::Bytes {
                label: entry.label().to_string(),
                bytes,
            }),
            Some(Err(source)) => Err(OpenError::CorruptInlineData {
                label: entry.label().to_string(),
                source,
            }),
            None => {
                tracing::info!("'{}' has no stored content to reopen", entry.label());
                Err(OpenError::SourceUnavailable {
                    label: entry.label().to_string(),
                })
            }
        }
    }

    /// Writes the whole list under the storage key.
    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Could not serialize history: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.config.storage_key, &json) {
            tracing::warn!("Could not save history: {e}");
        }
    }
}

/// Drops entries that break the invariants and enforces the cap.
fn sanitize(stored: Vec<DocumentReference>) -> Vec<DocumentReference> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(stored.len().min(MAX_ENTRIES));
    for entry in stored {
        if !entry.is_well_formed() {
            tracing::warn!("Dropping invalid history entry '{}'", entry.label());
            continue;
        }
        if !seen.insert(entry.id().to_string()) {
            tracing::warn!("Dropping history entry with duplicate id '{}'", entry.id());
            continue;
        }
        entries.push(entry);
    }
    entries.truncate(MAX_ENTRIES);
    entries
}
