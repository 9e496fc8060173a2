use serde::Serialize;

/// Which of a chapter's two video sources a selection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VideoKind {
    Topic,
    Recorded,
}

/// A viewer's request to open one chapter video inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VideoSelection {
    pub(crate) chapter_id: String,
    pub(crate) kind: VideoKind,
}

/// The video currently expanded inline on the course page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ActiveVideo {
    pub(crate) chapter_id: String,
    pub(crate) title: String,
    pub(crate) embed_url: String,
}

/// Inline player state with toggle semantics: selecting the video that is
/// already open closes it, selecting a different one replaces it. At most one
/// video is open at a time.
#[derive(Debug, Default)]
pub(crate) struct InlinePlayer {
    active: Option<ActiveVideo>,
}

impl InlinePlayer {
    pub(crate) fn select(&mut self, chapter_id: &str, title: &str, embed_url: &str) {
        if embed_url.is_empty() {
            return;
        }

        let same_video = self
            .active
            .as_ref()
            .is_some_and(|video| video.chapter_id == chapter_id && video.embed_url == embed_url);

        if same_video {
            self.active = None;
        } else {
            self.active = Some(ActiveVideo {
                chapter_id: chapter_id.to_string(),
                title: title.to_string(),
                embed_url: embed_url.to_string(),
            });
        }
    }

    pub(crate) fn into_active(self) -> Option<ActiveVideo> {
        self.active
    }
}
