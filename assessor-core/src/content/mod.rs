pub mod classifier;
pub mod sniff;

pub use classifier::{classify, classify_extension};
pub use sniff::{describe_file, describe_text, is_binary, verify_image};

use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of content is being assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Code,
    Image,
    Audio,
    Video,
    Pdf,
    Archive,
    Unknown,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "Text",
            ContentKind::Code => "Code",
            ContentKind::Image => "Image",
            ContentKind::Audio => "Audio",
            ContentKind::Video => "Video",
            ContentKind::Pdf => "PDF",
            ContentKind::Archive => "Archive",
            ContentKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification and size of one input. Built per assessment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    pub kind: ContentKind,
    pub size_bytes: u64,
    pub extension: Option<String>,
}

impl ContentDescriptor {
    pub fn new(kind: ContentKind, size_bytes: u64) -> Self {
        Self {
            kind,
            size_bytes,
            extension: None,
        }
    }

    pub fn size_megabytes(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Word and character counts for pasted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }
}
