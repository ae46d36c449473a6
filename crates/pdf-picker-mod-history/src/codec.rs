/// Chunked base64 encoding for inline document payloads.
///
/// Payloads can be tens of megabytes, so both directions walk the input in
/// fixed-size chunks instead of converting it in one pass. Byte chunks are
/// aligned to a multiple of 3 and text chunks to the matching multiple of 4,
/// which keeps padding out of every chunk except the last. The result is the
/// canonical padded standard-alphabet encoding regardless of chunk size.
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::CodecError;

/// Input bytes processed per chunk when no explicit size is given.
pub const DEFAULT_CHUNK_SIZE: usize = 0x8000;

/// Rounds `chunk_size` down to a whole number of 3-byte groups.
///
/// At least one group, and few enough that the matching text chunk
/// (4 characters per group) still fits in a `usize`.
fn byte_chunk_len(chunk_size: usize) -> usize {
    (chunk_size / 3).clamp(1, usize::MAX / 4) * 3
}

/// Encodes `bytes` using [`DEFAULT_CHUNK_SIZE`].
pub fn encode(bytes: &[u8]) -> String {
    encode_chunked(bytes, DEFAULT_CHUNK_SIZE)
}

/// Decodes `text` using [`DEFAULT_CHUNK_SIZE`].
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    decode_chunked(text, DEFAULT_CHUNK_SIZE)
}

/// Encodes `bytes` to base64, `chunk_size` input bytes at a time.
pub fn encode_chunked(bytes: &[u8], chunk_size: usize) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(byte_chunk_len(chunk_size)) {
        STANDARD.encode_string(chunk, &mut out);
    }
    out
}

/// Decodes base64 `text`, walking it in chunks that correspond to
/// `chunk_size` decoded bytes.
///
/// # Errors
///
/// Returns `CodecError::InvalidLength` if the text is not a whole number of
/// 4-character groups, or `CodecError::InvalidBase64` with the chunk offset
/// if a chunk contains invalid characters or misplaced padding.
pub fn decode_chunked(text: &str, chunk_size: usize) -> Result<Vec<u8>, CodecError> {
    let input = text.as_bytes();
    if input.len() % 4 != 0 {
        return Err(CodecError::InvalidLength { len: input.len() });
    }

    let text_chunk = byte_chunk_len(chunk_size) / 3 * 4;
    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    for (index, chunk) in input.chunks(text_chunk).enumerate() {
        STANDARD
            .decode_vec(chunk, &mut out)
            .map_err(|source| CodecError::InvalidBase64 {
                offset: index * text_chunk,
                source,
            })?;
    }
    Ok(out)
}
