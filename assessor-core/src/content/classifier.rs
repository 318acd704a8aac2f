/// File-extension classification

use std::path::Path;

use super::ContentKind;

const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "cpp", "c", "java", "rb", "go", "rs", "ts", "php", "cs", "swift", "kt",
    "scala", "sh", "bat", "pl", "r", "jl", "lua", "sql", "html", "css", "json", "xml",
    "yaml", "yml", "md", "ipynb",
];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "mkv", "webm"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp", "ico"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "ogg", "flac", "m4a"];
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz"];

/// Classify a file by its extension. Whether the bytes are binary is decided
/// by the caller (see [`super::sniff::is_binary`]).
pub fn classify(path: &Path, is_binary: bool) -> ContentKind {
    let extension = path.extension().and_then(|e| e.to_str());
    classify_extension(extension, is_binary)
}

/// Classify an extension given without the leading dot, case-insensitively.
/// Text content is either code or plain text; binary content is matched
/// against the media and container tables.
pub fn classify_extension(extension: Option<&str>, is_binary: bool) -> ContentKind {
    let ext = extension
        .map(|e| e.trim_start_matches('.').to_lowercase())
        .unwrap_or_default();
    let ext = ext.as_str();

    if !is_binary {
        return if CODE_EXTENSIONS.contains(&ext) {
            ContentKind::Code
        } else {
            ContentKind::Text
        };
    }

    if VIDEO_EXTENSIONS.contains(&ext) {
        ContentKind::Video
    } else if IMAGE_EXTENSIONS.contains(&ext) {
        ContentKind::Image
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        ContentKind::Audio
    } else if ext == "pdf" {
        ContentKind::Pdf
    } else if ARCHIVE_EXTENSIONS.contains(&ext) {
        ContentKind::Archive
    } else {
        ContentKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_files() {
        assert_eq!(classify(Path::new("notes.txt"), false), ContentKind::Text);
        assert_eq!(classify(Path::new("README"), false), ContentKind::Text);
        assert_eq!(classify(Path::new("main.RS"), false), ContentKind::Code);
        assert_eq!(classify(Path::new("doc.md"), false), ContentKind::Code);
    }

    #[test]
    fn test_binary_files() {
        assert_eq!(classify(Path::new("clip.MKV"), true), ContentKind::Video);
        assert_eq!(classify(Path::new("photo.jpeg"), true), ContentKind::Image);
        assert_eq!(classify(Path::new("song.flac"), true), ContentKind::Audio);
        assert_eq!(classify(Path::new("paper.pdf"), true), ContentKind::Pdf);
        assert_eq!(classify(Path::new("bundle.7z"), true), ContentKind::Archive);
        assert_eq!(classify(Path::new("blob.bin"), true), ContentKind::Unknown);
        assert_eq!(classify(Path::new("noext"), true), ContentKind::Unknown);
    }

    #[test]
    fn test_binary_flag_decides_family() {
        // A media extension that decoded as text is still text.
        assert_eq!(classify(Path::new("fake.png"), false), ContentKind::Text);
        // A code extension that failed to decode is unknown binary.
        assert_eq!(classify(Path::new("weird.py"), true), ContentKind::Unknown);
    }

    #[test]
    fn test_extension_with_dot() {
        assert_eq!(classify_extension(Some(".Mp4"), true), ContentKind::Video);
        assert_eq!(classify_extension(None, false), ContentKind::Text);
    }
}
