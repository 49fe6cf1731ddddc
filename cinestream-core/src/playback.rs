//! Turning a playback URL into something the player can show.
use cinestream_state::Entry;

/// Extracts an embeddable video ID from a playback URL.
///
/// Tries, in order, a `v=` query parameter, a `youtu.be/<id>` path and an
/// `embed/<id>` path. The first pattern present wins, even if it yields nothing.
pub fn extract_video_id(url: &str) -> Option<String> {
    let id = if let Some((_, rest)) = url.split_once("v=") {
        rest.split('&').next()
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest.split('?').next()
    } else if let Some((_, rest)) = url.split_once("embed/") {
        rest.split('?').next()
    } else {
        None
    }?;
    (!id.is_empty()).then(|| id.to_string())
}

pub fn embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{video_id}?autoplay=1&rel=0&showinfo=0&iv_load_policy=3"
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSource {
    Embed(String),
    /// No ID could be extracted. The player stays in its loading state.
    Unavailable,
}
impl PlaybackSource {
    pub fn for_url(url: &str) -> Self {
        match extract_video_id(url) {
            Some(id) => PlaybackSource::Embed(embed_url(&id)),
            None => PlaybackSource::Unavailable,
        }
    }
}

/// What the player overlay shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub entry: Entry,
    pub source: PlaybackSource,
}
impl PlayerView {
    pub fn new(entry: Entry) -> Self {
        let source = PlaybackSource::for_url(&entry.playback_url);
        if source == PlaybackSource::Unavailable {
            tracing::warn!(
                "no video ID in playback URL for `{}`: {}",
                entry.title,
                entry.playback_url
            );
        }
        Self { entry, source }
    }
}

/// Opens `url` with the system's default handler without waiting for it.
pub fn launch_external(url: &str) -> std::io::Result<()> {
    tracing::info!("opening {url} externally");
    open::that_detached(url)
}
