use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use super::{classify, ContentDescriptor, ContentKind};
use crate::error::{AssessorError, Result};

pub const DEFAULT_SNIFF_BYTES: usize = 1024;

/// Longest UTF-8 continuation after a lead byte.
const MAX_CONTINUATION: usize = 3;
/// Header length handed to `infer` for image signatures.
const IMAGE_HEADER_BYTES: usize = 64;

fn read_head(path: &Path, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(limit);
    File::open(path)?.take(limit as u64).read_to_end(&mut head)?;
    Ok(head)
}

/// Decide whether a file is binary by decoding its first `sniff_bytes` bytes
/// as UTF-8. Any decode or read failure counts as binary.
///
/// This is a heuristic: a binary file whose head happens to be valid UTF-8
/// is reported as text.
pub fn is_binary(path: &Path, sniff_bytes: usize) -> bool {
    let head = match read_head(path, sniff_bytes.saturating_add(MAX_CONTINUATION)) {
        Ok(head) => head,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read file as text, treating as binary");
            return true;
        }
    };
    let window = &head[..head.len().min(sniff_bytes)];

    match std::str::from_utf8(window) {
        Ok(_) => false,
        // A character cut by the sniff window is fine only if the file goes on.
        Err(e) if e.error_len().is_none() && head.len() > window.len() => false,
        Err(e) => {
            debug!(
                path = %path.display(),
                offset = e.valid_up_to(),
                "File is not valid UTF-8, treating as binary"
            );
            true
        }
    }
}

/// Check that a file's header carries a known image signature.
pub fn verify_image(path: &Path) -> Result<()> {
    let header = read_head(path, IMAGE_HEADER_BYTES)?;
    match infer::get(&header) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {
            debug!(path = %path.display(), mime = kind.mime_type(), "Image header verified");
            Ok(())
        }
        _ => {
            warn!(path = %path.display(), "Failed to decode image file");
            Err(AssessorError::InvalidInput(format!(
                "Could not decode image: {}",
                path.display()
            )))
        }
    }
}

/// Describe a file on disk: classified kind, byte size and extension. Image
/// files must carry a recognizable image header.
pub fn describe_file(path: &Path, sniff_bytes: usize) -> Result<ContentDescriptor> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(AssessorError::InvalidInput(format!(
            "not a regular file: {}",
            path.display()
        )));
    }
    if metadata.len() == 0 {
        return Err(AssessorError::InvalidInput("Input data is empty".to_string()));
    }

    let binary = is_binary(path, sniff_bytes);
    let kind = classify(path, binary);
    debug!(path = %path.display(), binary, kind = %kind, size = metadata.len(), "Classified file");
    if kind == ContentKind::Image {
        verify_image(path)?;
    }

    Ok(ContentDescriptor {
        kind,
        size_bytes: metadata.len(),
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase()),
    })
}

/// Describe pasted text. Its size is the UTF-8 byte length.
pub fn describe_text(text: &str) -> Result<ContentDescriptor> {
    if text.is_empty() {
        return Err(AssessorError::InvalidInput("Input data is empty".to_string()));
    }
    Ok(ContentDescriptor::new(ContentKind::Text, text.len() as u64))
}
