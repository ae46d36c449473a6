/// Document picker: opens documents in the viewer and keeps the history.
use std::path::Path;

use pdf_picker_mod_history::{
    read_local_file, DocumentReference, OpenError, RecentDocumentHistory, ViewerSource,
};
use pdf_picker_store::KeyValueStore;

use crate::viewer::DocumentViewer;

pub struct Picker<S: KeyValueStore, V: DocumentViewer> {
    history: RecentDocumentHistory<S>,
    viewer: V,
    /// Label of the document last handed to the viewer.
    current_label: Option<String>,
}

impl<S: KeyValueStore, V: DocumentViewer> std::fmt::Debug for Picker<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picker")
            .field("history", &self.history)
            .field("current_label", &self.current_label)
            .finish()
    }
}

impl<S: KeyValueStore, V: DocumentViewer> Picker<S, V> {
    pub fn new(history: RecentDocumentHistory<S>, viewer: V) -> Self {
        Self {
            history,
            viewer,
            current_label: None,
        }
    }

    pub fn history(&self) -> &RecentDocumentHistory<S> {
        &self.history
    }

    pub fn current_label(&self) -> Option<&str> {
        self.current_label.as_deref()
    }

    /// Reads a local file, shows it, and remembers it.
    ///
    /// # Errors
    ///
    /// Returns `OpenError::FileRead` if the file cannot be read. Nothing is
    /// recorded in that case.
    pub fn open_file(&mut self, path: &Path) -> Result<&DocumentReference, OpenError> {
        let file = read_local_file(path).inspect_err(|e| tracing::error!("{e}"))?;
        self.history.record_file(&file);
        // Recorded first so the bytes can move into the viewer source.
        self.display(ViewerSource::from(file));
        Ok(self.newest())
    }

    /// Shows a remote document and remembers its URL.
    ///
    /// # Errors
    ///
    /// Returns `OpenError::EmptyUrl` if `url` is blank.
    pub fn open_url(&mut self, url: &str) -> Result<&DocumentReference, OpenError> {
        let entry = self.history.record_url(url)?;
        let source = ViewerSource::Url {
            label: entry.label().to_string(),
            url: entry.url().unwrap_or_default().to_string(),
        };
        self.display(source);
        Ok(self.newest())
    }

    /// Shows a document from the history again.
    ///
    /// # Errors
    ///
    /// Passes through the history's reopen failures (`NotFound`,
    /// `SourceUnavailable`, `CorruptInlineData`).
    pub fn reopen(&mut self, id: &str) -> Result<(), OpenError> {
        let source = self.history.reopen(id)?;
        self.display(source);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.history.remove(id)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// The entry recorded last; `add` always puts it at the front.
    fn newest(&self) -> &DocumentReference {
        &self.history.entries()[0]
    }

    /// Hands `source` to the viewer. Viewer failures are logged only; the
    /// document still counts as opened.
    fn display(&mut self, source: ViewerSource) {
        if let Err(e) = self.viewer.show(&source) {
            tracing::error!("Viewer failed for '{}': {e:#}", source.label());
        }
        self.current_label = Some(source.label().to_string());
    }
}

/// One line per entry, for listing the history.
pub fn describe(entry: &DocumentReference) -> String {
    let kind = if entry.is_url() {
        "url"
    } else if entry.is_reopenable() {
        "file (stored)"
    } else {
        "file"
    };
    format!("{}  {:<13}  {}", entry.id(), kind, entry.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pdf_picker_mod_history::HistoryConfig;
    use pdf_picker_store::MemoryStore;

    /// Remembers everything it was asked to show.
    #[derive(Default)]
    struct RecordingViewer {
        shown: Vec<ViewerSource>,
        fail: bool,
    }

    impl DocumentViewer for RecordingViewer {
        fn show(&mut self, source: &ViewerSource) -> Result<()> {
            self.shown.push(source.clone());
            if self.fail {
                anyhow::bail!("viewer crashed");
            }
            Ok(())
        }
    }

    fn picker(config: HistoryConfig) -> Picker<MemoryStore, RecordingViewer> {
        Picker::new(
            RecentDocumentHistory::new(MemoryStore::new(), config),
            RecordingViewer::default(),
        )
    }

    fn write_pdf(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, bytes).expect("write");
        path
    }

    #[test]
    fn test_open_file_shows_and_records() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_pdf(dir.path(), "a.pdf", b"%PDF-a");
        let mut picker = picker(HistoryConfig::default());

        let entry = picker.open_file(&path).expect("open");
        assert_eq!(entry.label(), "a.pdf");
        assert!(entry.inline_data().is_none());

        assert_eq!(picker.current_label(), Some("a.pdf"));
        assert_eq!(
            picker.viewer.shown,
            vec![ViewerSource::Bytes {
                label: "a.pdf".to_string(),
                bytes: b"%PDF-a".to_vec(),
            }]
        );
        assert_eq!(picker.history().len(), 1);
    }

    #[test]
    fn test_open_file_with_inline_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_pdf(dir.path(), "kept.pdf", &[1, 2, 3, 4, 5]);
        let mut picker = picker(HistoryConfig::default().with_inline_content(true));

        let entry = picker.open_file(&path).expect("open");
        assert_eq!(entry.label(), "kept.pdf");
        assert_eq!(entry.inline_data(), Some("AQIDBAU="));

        assert_eq!(
            picker.viewer.shown,
            vec![ViewerSource::Bytes {
                label: "kept.pdf".to_string(),
                bytes: vec![1, 2, 3, 4, 5],
            }]
        );
    }

    #[test]
    fn test_open_missing_file_records_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut picker = picker(HistoryConfig::default());

        let err = picker
            .open_file(&dir.path().join("gone.pdf"))
            .expect_err("missing file");
        assert!(matches!(err, OpenError::FileRead { .. }));
        assert!(picker.history().is_empty());
        assert!(picker.viewer.shown.is_empty());
        assert!(picker.current_label().is_none());
    }

    #[test]
    fn test_open_url() {
        let mut picker = picker(HistoryConfig::default());
        let id = picker
            .open_url(" https://a/b.pdf ")
            .expect("open")
            .id()
            .to_string();

        assert_eq!(picker.current_label(), Some("https://a/b.pdf"));
        assert_eq!(
            picker.history().resolve(&id).and_then(|e| e.url()),
            Some("https://a/b.pdf")
        );
    }

    #[test]
    fn test_open_blank_url() {
        let mut picker = picker(HistoryConfig::default());
        assert!(matches!(picker.open_url(""), Err(OpenError::EmptyUrl)));
        assert!(picker.viewer.shown.is_empty());
        assert!(picker.history().is_empty());
    }

    #[test]
    fn test_open_url_returns_newest_entry() {
        let mut picker = picker(HistoryConfig::default());
        picker.open_url("https://a").expect("open");
        let id = picker.open_url("https://b").expect("open").id().to_string();

        assert_eq!(picker.history().entries()[0].id(), id);
        assert_eq!(picker.history().entries()[0].url(), Some("https://b"));
        assert_eq!(
            picker.viewer.shown[1],
            ViewerSource::Url {
                label: "https://b".to_string(),
                url: "https://b".to_string(),
            }
        );
    }

    #[test]
    fn test_reopen_stored_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_pdf(dir.path(), "keep.pdf", &[1, 2, 3, 4, 5]);
        let mut picker = picker(HistoryConfig::default().with_inline_content(true));

        let id = picker.open_file(&path).expect("open").id().to_string();
        std::fs::remove_file(&path).expect("remove original");

        picker.reopen(&id).expect("reopen");
        assert_eq!(picker.viewer.shown.len(), 2);
        assert_eq!(picker.viewer.shown[1], picker.viewer.shown[0]);
    }

    #[test]
    fn test_reopen_unstored_file_asks_to_reselect() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_pdf(dir.path(), "temp.pdf", b"%PDF");
        let mut picker = picker(HistoryConfig::default());

        let id = picker.open_file(&path).expect("open").id().to_string();
        let err = picker.reopen(&id).expect_err("not stored");
        assert!(matches!(err, OpenError::SourceUnavailable { .. }));
        assert_eq!(picker.viewer.shown.len(), 1);

        // Still usable afterwards.
        picker.open_url("https://a/b.pdf").expect("open url");
        assert_eq!(picker.history().len(), 2);
    }

    #[test]
    fn test_viewer_failure_still_records() {
        let mut picker = Picker::new(
            RecentDocumentHistory::new(MemoryStore::new(), HistoryConfig::default()),
            RecordingViewer {
                shown: Vec::new(),
                fail: true,
            },
        );
        picker.open_url("https://a/b.pdf").expect("open");
        assert_eq!(picker.history().len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut picker = picker(HistoryConfig::default());
        let id = picker.open_url("https://a").expect("open").id().to_string();
        picker.open_url("https://b").expect("open");

        assert!(picker.remove(&id));
        assert!(!picker.remove(&id));
        assert_eq!(picker.history().len(), 1);

        picker.clear();
        assert!(picker.history().is_empty());
    }

    #[test]
    fn test_describe() {
        let url = DocumentReference::for_url("https://a/b.pdf")
            .expect("url")
            .with_id("u1");
        assert_eq!(describe(&url), "u1  url            https://a/b.pdf");

        let stored = DocumentReference::for_file("s.pdf", Some(&[1])).with_id("f1");
        assert!(describe(&stored).contains("file (stored)"));

        let bare = DocumentReference::for_file("b.pdf", None).with_id("f2");
        assert!(describe(&bare).ends_with("b.pdf"));
    }
}
