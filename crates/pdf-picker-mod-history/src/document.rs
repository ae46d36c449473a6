/// History entries and the sources handed to a viewer.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{CodecError, OpenError};

/// Generates a fresh entry id.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Where a remembered document comes from.
///
/// Serialized inline with the entry, tagged by `kind` (`"url"` or `"file"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DocumentKind {
    #[serde(rename = "url")]
    Url { url: String },
    /// A local file. `inline_data` holds its base64 bytes only when inline
    /// persistence was enabled when the entry was created.
    #[serde(rename = "file")]
    InlineFile {
        #[serde(
            rename = "inlineData",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        inline_data: Option<String>,
    },
}

/// One remembered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    id: String,
    label: String,
    #[serde(flatten)]
    kind: DocumentKind,
}

impl DocumentReference {
    /// Creates a URL entry labelled with the URL itself.
    ///
    /// # Errors
    ///
    /// Returns `OpenError::EmptyUrl` if `url` is blank after trimming.
    pub fn for_url(url: &str) -> Result<Self, OpenError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(OpenError::EmptyUrl);
        }
        Ok(Self {
            id: generate_id(),
            label: url.to_string(),
            kind: DocumentKind::Url {
                url: url.to_string(),
            },
        })
    }

    /// Creates a file entry. Pass `Some(bytes)` to keep the content inline.
    pub fn for_file(label: &str, inline: Option<&[u8]>) -> Self {
        Self {
            id: generate_id(),
            label: label.to_string(),
            kind: DocumentKind::InlineFile {
                inline_data: inline.map(codec::encode),
            },
        }
    }

    /// Replaces the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_url(&self) -> bool {
        matches!(self.kind, DocumentKind::Url { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            DocumentKind::Url { url } => Some(url),
            DocumentKind::InlineFile { .. } => None,
        }
    }

    /// The base64 payload, if this is a file entry that kept its content.
    pub fn inline_data(&self) -> Option<&str> {
        match &self.kind {
            DocumentKind::InlineFile { inline_data } => inline_data.as_deref(),
            DocumentKind::Url { .. } => None,
        }
    }

    /// Decodes the inline payload, if any.
    pub fn decode_inline(&self, chunk_size: usize) -> Option<Result<Vec<u8>, CodecError>> {
        self.inline_data()
            .map(|data| codec::decode_chunked(data, chunk_size))
    }

    /// Whether the entry can be handed to a viewer again without the user
    /// re-selecting anything.
    pub fn is_reopenable(&self) -> bool {
        match &self.kind {
            DocumentKind::Url { .. } => true,
            DocumentKind::InlineFile { inline_data } => inline_data.is_some(),
        }
    }

    /// Checks the invariants that deserialized data may violate.
    pub(crate) fn is_well_formed(&self) -> bool {
        if self.id.is_empty() {
            return false;
        }
        match &self.kind {
            DocumentKind::Url { url } => !url.trim().is_empty(),
            DocumentKind::InlineFile { .. } => true,
        }
    }
}

/// What the viewer is asked to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerSource {
    Bytes { label: String, bytes: Vec<u8> },
    Url { label: String, url: String },
}

impl ViewerSource {
    pub fn label(&self) -> &str {
        match self {
            Self::Bytes { label, .. } | Self::Url { label, .. } => label,
        }
    }
}

/// A file read into memory, ready to be shown and remembered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub label: String,
    pub bytes: Vec<u8>,
}

impl From<LoadedFile> for ViewerSource {
    fn from(file: LoadedFile) -> Self {
        Self::Bytes {
            label: file.label,
            bytes: file.bytes,
        }
    }
}

/// Reads `path` into memory. The label is the file name component.
///
/// # Errors
///
/// Returns `OpenError::FileRead` if the file cannot be read.
pub fn read_local_file(path: &Path) -> Result<LoadedFile, OpenError> {
    let bytes = std::fs::read(path).map_err(|source| OpenError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(LoadedFile { label, bytes })
}
