/// The external viewer that actually displays documents.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pdf_picker_mod_history::ViewerSource;

/// Anything that can display a document source.
pub trait DocumentViewer {
    fn show(&mut self, source: &ViewerSource) -> Result<()>;
}

impl<V: DocumentViewer + ?Sized> DocumentViewer for Box<V> {
    fn show(&mut self, source: &ViewerSource) -> Result<()> {
        (**self).show(source)
    }
}

/// Opens documents with the platform's default application.
///
/// Bytes are written under `cache_dir` first, since the system viewer needs a
/// file. URLs go straight to the default browser. Files left in the cache by
/// earlier runs are deleted when the viewer is created.
#[derive(Debug)]
pub struct SystemViewer {
    cache_dir: PathBuf,
}

impl SystemViewer {
    pub fn new(cache_dir: PathBuf) -> Self {
        let viewer = Self { cache_dir };
        viewer.prune();
        viewer
    }

    /// Removes every file in the cache. Failures are logged and skipped.
    fn prune(&self) {
        let entries = match std::fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!(
                    "Failed to read viewer cache {}: {e}",
                    self.cache_dir.display()
                );
                return;
            }
        };

        let mut removed = 0usize;
        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!("Failed to remove {}: {e}", path.display()),
            }
        }
        if removed > 0 {
            tracing::debug!("Pruned {removed} files from the viewer cache");
        }
    }

    /// Writes `bytes` into the cache and returns the file path.
    fn materialize(&self, label: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.cache_dir).with_context(|| {
            format!(
                "Failed to create viewer cache: {}",
                self.cache_dir.display()
            )
        })?;
        let path = self.cache_dir.join(cache_file_name(label));
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl DocumentViewer for SystemViewer {
    fn show(&mut self, source: &ViewerSource) -> Result<()> {
        match source {
            ViewerSource::Bytes { label, bytes } => {
                let path = self.materialize(label, bytes)?;
                tracing::info!("Opening {} in the system viewer", path.display());
                opener::open(&path)
                    .with_context(|| format!("Failed to launch viewer for {}", path.display()))
            }
            ViewerSource::Url { url, .. } => {
                tracing::info!("Opening {url} in the browser");
                opener::open_browser(url).with_context(|| format!("Failed to open {url}"))
            }
        }
    }
}

/// Only logs what would be displayed (`--no-viewer`).
#[derive(Debug, Default)]
pub struct LogViewer;

impl DocumentViewer for LogViewer {
    fn show(&mut self, source: &ViewerSource) -> Result<()> {
        match source {
            ViewerSource::Bytes { label, bytes } => {
                tracing::info!("Loaded '{label}' ({} bytes)", bytes.len());
            }
            ViewerSource::Url { url, .. } => tracing::info!("Loaded {url}"),
        }
        Ok(())
    }
}

/// Turns a display label into a safe file name inside the cache.
fn cache_file_name(label: &str) -> String {
    let name: String = Path::new(label)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let name = name.trim_start_matches('.');

    if name.is_empty() {
        return "document.pdf".to_string();
    }
    if Path::new(name).extension().is_none() {
        return format!("{name}.pdf");
    }
    name.to_string()
}
