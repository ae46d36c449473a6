/// Configuration for the recent-documents history.
use crate::codec::DEFAULT_CHUNK_SIZE;

/// Maximum number of entries kept. Older entries are dropped, not archived.
pub const MAX_ENTRIES: usize = 20;

/// Store key holding the serialized history.
pub const DEFAULT_STORAGE_KEY: &str = "pdfPickerHistory";

#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Keep file contents inline so file entries can be reopened later.
    /// Off by default: payloads are a third larger than the file itself.
    pub save_inline_content: bool,
    /// Files larger than this are remembered without their content.
    pub max_inline_bytes: usize,
    /// Key the history is stored under.
    pub storage_key: String,
    /// Chunk size used when decoding inline payloads. Only affects
    /// throughput; the decoded bytes never depend on it.
    pub chunk_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            save_inline_content: false,
            max_inline_bytes: usize::MAX,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl HistoryConfig {
    pub fn with_inline_content(mut self, enabled: bool) -> Self {
        self.save_inline_content = enabled;
        self
    }

    pub fn with_max_inline_bytes(mut self, limit: usize) -> Self {
        self.max_inline_bytes = limit;
        self
    }

    /// Whether a file of `len` bytes should keep its content inline.
    pub fn keeps_inline(&self, len: usize) -> bool {
        self.save_inline_content && len <= self.max_inline_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HistoryConfig::default();
        assert!(!config.save_inline_content);
        assert_eq!(config.storage_key, "pdfPickerHistory");
        assert_eq!(config.chunk_size, 0x8000);
    }

    #[test]
    fn test_with_inline_content() {
        assert!(HistoryConfig::default().with_inline_content(true).save_inline_content);
    }

    #[test]
    fn test_keeps_inline() {
        let off = HistoryConfig::default();
        assert!(!off.keeps_inline(1));

        let on = HistoryConfig::default()
            .with_inline_content(true)
            .with_max_inline_bytes(10);
        assert!(on.keeps_inline(0));
        assert!(on.keeps_inline(10));
        assert!(!on.keeps_inline(11));
    }
}
