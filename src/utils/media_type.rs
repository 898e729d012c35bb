/// Extensions rendered inline as images by the gallery.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Extensions rendered as playable video by the gallery.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "webm", "mkv", "m4v"];

/// How the gallery should render an entry. Presentational only; the
/// store itself never cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    File,
}

impl MediaKind {
    /// Classifies an entry the way the gallery does: the server-provided
    /// image flag wins, then the video extension set, then generic file.
    pub fn classify(file_name: &str, is_image: bool) -> Self {
        if is_image {
            MediaKind::Image
        } else if is_video(file_name) {
            MediaKind::Video
        } else {
            MediaKind::File
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::File => "file",
        }
    }
}

/// Lowercased extension after the last dot. A name without a dot has no
/// extension; a leading dot still counts ("`.png`" is a png).
fn extension(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx + 1..].to_ascii_lowercase())
}

pub fn is_image(file_name: &str) -> bool {
    extension(file_name)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_video(file_name: &str) -> bool {
    extension(file_name)
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

/// Best-effort MIME type from the filename extension. A browser supplies
/// `file.type` with the selection; the CLI has only the name.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = extension(file_name).unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "mkv" => "video/x-matroska",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Human-readable size, two decimals at most ("1.5 KB", "9.77 MB").
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    let exp = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extension_match_is_case_insensitive() {
        assert!(is_image("photo.PNG"));
        assert!(is_image("photo.jpeg"));
        assert!(is_image(".webp"));
        assert!(!is_image("video.mp4"));
        assert!(!is_image("png"));
        assert!(!is_image("archive.tar.gz"));
    }

    #[test]
    fn video_extension_match() {
        assert!(is_video("clip.mp4"));
        assert!(is_video("clip.MKV"));
        assert!(!is_video("photo.png"));
        assert!(!is_video("notes"));
    }

    #[test]
    fn classify_prefers_server_image_flag() {
        assert_eq!(MediaKind::classify("photo.png", true), MediaKind::Image);
        assert_eq!(MediaKind::classify("clip.mp4", false), MediaKind::Video);
        assert_eq!(MediaKind::classify("notes.pdf", false), MediaKind::File);
        // A lying flag still wins; classification is presentational.
        assert_eq!(MediaKind::classify("clip.mp4", true), MediaKind::Image);
    }

    #[test]
    fn content_type_falls_back_to_octet_stream() {
        assert_eq!(content_type_for("cat.png"), "image/png");
        assert_eq!(content_type_for("CLIP.MP4"), "video/mp4");
        assert_eq!(content_type_for("weird.xyz"), "application/octet-stream");
        assert_eq!(content_type_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn format_size_is_humane() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(10_000), "9.77 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
    }
}
