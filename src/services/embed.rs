use std::sync::OnceLock;

use regex::Regex;

/// Normalize a raw video link into an embeddable URL.
///
/// YouTube watch/share/embed forms collapse to `youtube.com/embed/{id}`,
/// Google Drive file links to `drive.google.com/file/d/{id}/preview`.
/// Anything else passes through unchanged; empty input stays empty.
pub(crate) fn embed_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    if let Some(captures) = youtube_re().captures(url) {
        return format!("https://www.youtube.com/embed/{}", &captures[1]);
    }
    if url.contains("youtube.com/embed/") {
        return url.to_string();
    }

    if let Some(captures) = drive_re().captures(url) {
        return format!("https://drive.google.com/file/d/{}/preview", &captures[1]);
    }

    url.to_string()
}

fn youtube_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
        )
        .expect("youtube url pattern")
    })
}

fn drive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"drive\.google\.com/file/d/([a-zA-Z0-9_-]+)").expect("drive url pattern")
    })
}
