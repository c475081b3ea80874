use super::decode;
use super::script;
use crate::driver::PageDriver;
use crate::error::InspectError;
use serde::{Deserialize, Serialize};

/// A `<track>` element declared in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackElement {
    pub kind: String,
    pub label: String,
    pub srclang: String,
    pub src: String,
}

impl Default for TrackElement {
    fn default() -> Self {
        Self {
            kind: "subtitles".to_string(),
            label: String::new(),
            srclang: String::new(),
            src: String::new(),
        }
    }
}

impl TrackElement {
    fn is_english(&self) -> bool {
        self.srclang.to_lowercase().contains("en")
            || self.label.to_lowercase().contains("english")
    }
}

/// List every `<track>` element, independent of the tracks the media
/// elements have already attached.
pub async fn enumerate_tracks<D: PageDriver + ?Sized>(
    driver: &mut D,
) -> Result<Vec<TrackElement>, InspectError> {
    let value = driver.evaluate(script::TRACK_ELEMENTS).await?;
    decode("track list", value)
}

/// URL of the English subtitle file, if the markup declares one.
///
/// Some players point `<track src>` at an HLS subtitle playlist; the WebVTT
/// file sits next to it under the same name. Only a trailing `.m3u8` is
/// rewritten; one elsewhere in the URL (a directory or query value) is kept.
pub fn preferred_subtitle_source(tracks: &[TrackElement]) -> Option<String> {
    let track = tracks
        .iter()
        .find(|t| !t.src.is_empty() && t.is_english())?;

    match track.src.strip_suffix(".m3u8") {
        Some(stem) => Some(format!("{}.vtt", stem)),
        None => Some(track.src.clone()),
    }
}
