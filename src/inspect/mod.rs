//! Video player inspection
//!
//! Everything here works on a snapshot of the DOM taken by one script
//! evaluation; classification and streaming detection run in Rust so they
//! can be exercised without a browser.

mod classify;
mod recommend;
pub mod script;
mod tracks;

pub use classify::{classify_player_type, detect_streaming_format};
pub use recommend::{Recommendation, recommend};
pub use tracks::{TrackElement, enumerate_tracks, preferred_subtitle_source};

use crate::driver::PageDriver;
use crate::error::InspectError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

/// `HTMLMediaElement.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(try_from = "u8", into = "u8")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadyState {
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

impl TryFrom<u8> for ReadyState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::HaveNothing),
            1 => Ok(Self::HaveMetadata),
            2 => Ok(Self::HaveCurrentData),
            3 => Ok(Self::HaveFutureData),
            4 => Ok(Self::HaveEnoughData),
            other => Err(format!("readyState out of range: {}", other)),
        }
    }
}

impl From<ReadyState> for u8 {
    fn from(state: ReadyState) -> Self {
        state as u8
    }
}

/// A text track attached to a video element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTrackDescriptor {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub mode: String,
    /// Cues currently loaded; 0 while the cue list is null.
    #[serde(default)]
    pub cues_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDescriptor {
    pub index: usize,
    /// Declared `src` attribute
    #[serde(default)]
    pub src: String,
    /// Source picked by the media element, which may come from a `<source>` child
    #[serde(default)]
    pub current_src: String,
    pub ready_state: ReadyState,
    #[serde(default)]
    pub text_tracks: Vec<TextTrackDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IframeDescriptor {
    pub index: usize,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub title: String,
}

/// Presence of known player-framework markers in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerMarkers {
    /// `.video-js`
    pub video_js_class: bool,
    /// `.jwplayer`
    pub jwplayer_class: bool,
    /// `[data-video-js]`
    pub video_js_attribute: bool,
}

/// Raw data returned by [`script::PLAYER_SNAPSHOT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub videos: Vec<VideoDescriptor>,
    pub iframes: Vec<IframeDescriptor>,
    pub markers: PlayerMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerType {
    #[strum(serialize = "Video.js")]
    VideoJs,
    #[serde(rename = "jwplayer")]
    #[strum(serialize = "JWPlayer")]
    JwPlayer,
    #[strum(serialize = "Video.js (attribute)")]
    VideoJsAttribute,
    #[serde(rename = "native-html5")]
    #[strum(serialize = "HTML5 Video (native)")]
    NativeHtml5,
    #[strum(serialize = "Unknown")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    pub videos: Vec<VideoDescriptor>,
    pub iframes: Vec<IframeDescriptor>,
    #[serde(rename = "hasHLS")]
    pub has_hls: bool,
    pub player_type: PlayerType,
}

impl InspectionResult {
    pub fn from_snapshot(snapshot: PlayerSnapshot) -> Self {
        let player_type = classify_player_type(&snapshot.markers, snapshot.videos.len());
        let has_hls = detect_streaming_format(&snapshot.videos);
        Self {
            videos: snapshot.videos,
            iframes: snapshot.iframes,
            has_hls,
            player_type,
        }
    }

    /// All text tracks across every video, in document order.
    pub fn text_tracks(&self) -> impl Iterator<Item = &TextTrackDescriptor> {
        self.videos.iter().flat_map(|v| v.text_tracks.iter())
    }
}

/// Decode a script result that is either a JSON string or an already
/// structured value.
pub fn decode<T: DeserializeOwned>(what: &'static str, value: Value) -> Result<T, InspectError> {
    match value {
        Value::String(text) => {
            serde_json::from_str(&text).map_err(|e| InspectError::malformed(what, e))
        }
        other => serde_json::from_value(other).map_err(|e| InspectError::malformed(what, e)),
    }
}

/// Evaluate [`script::PLAYER_SNAPSHOT`] and decode the video, iframe and marker data.
pub async fn enumerate_videos<D: PageDriver + ?Sized>(
    driver: &mut D,
) -> Result<PlayerSnapshot, InspectError> {
    let value = driver.evaluate(script::PLAYER_SNAPSHOT).await?;
    decode("player snapshot", value)
}

/// Snapshot the page and classify it.
pub async fn inspect<D: PageDriver + ?Sized>(
    driver: &mut D,
) -> Result<InspectionResult, InspectError> {
    let snapshot = enumerate_videos(driver).await?;
    Ok(InspectionResult::from_snapshot(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_video_without_tracks_has_empty_list() {
        let snapshot: PlayerSnapshot = decode(
            "player snapshot",
            json!({
                "videos": [{ "index": 0, "src": "", "currentSrc": "", "readyState": 0 }]
            }),
        )
        .unwrap();
        assert_eq!(snapshot.videos.len(), 1);
        assert!(snapshot.videos[0].text_tracks.is_empty());
        assert!(snapshot.iframes.is_empty());
        assert_eq!(snapshot.markers, PlayerMarkers::default());

        let result = InspectionResult::from_snapshot(snapshot);
        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["videos"][0]["textTracks"], json!([]));
    }

    #[test]
    fn test_decode_from_json_string() {
        let text = r#"{"videos":[{"index":0,"src":"https://cdn/video/playlist.m3u8","currentSrc":"https://cdn/video/playlist.m3u8","readyState":4,"textTracks":[{"kind":"subtitles","label":"English","language":"en","mode":"hidden","cuesCount":12}]}],"iframes":[{"index":0,"src":"https://player.example/embed","title":"Lesson"}],"markers":{"videoJsClass":false,"jwplayerClass":false,"videoJsAttribute":true}}"#;
        let snapshot: PlayerSnapshot =
            decode("player snapshot", Value::String(text.to_string())).unwrap();
        let result = InspectionResult::from_snapshot(snapshot);

        assert_eq!(result.player_type, PlayerType::VideoJsAttribute);
        assert!(result.has_hls);
        assert_eq!(result.videos[0].ready_state, ReadyState::HaveEnoughData);
        assert_eq!(result.videos[0].text_tracks[0].cues_count, 12);
        assert_eq!(result.iframes[0].title, "Lesson");
        assert_eq!(result.text_tracks().count(), 1);
    }

    #[test]
    fn test_out_of_range_ready_state_is_malformed() {
        let err = decode::<PlayerSnapshot>(
            "player snapshot",
            json!({ "videos": [{ "index": 0, "readyState": 9 }] }),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            InspectError::MalformedData { what: "player snapshot", .. }
        ));
    }

    #[test]
    fn test_garbage_string_is_malformed() {
        let err = decode::<PlayerSnapshot>("player snapshot", json!("not json")).unwrap_err();
        assert!(err.to_string().contains("malformed player snapshot"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(PlayerType::NativeHtml5.to_string(), "HTML5 Video (native)");
        assert_eq!(PlayerType::VideoJsAttribute.to_string(), "Video.js (attribute)");
        assert_eq!(
            serde_json::to_value(PlayerType::NativeHtml5).unwrap(),
            json!("native-html5")
        );
        assert_eq!(serde_json::to_value(PlayerType::JwPlayer).unwrap(), json!("jwplayer"));
        assert_eq!(ReadyState::HaveFutureData.to_string(), "HAVE_FUTURE_DATA");
        assert_eq!(serde_json::to_value(ReadyState::HaveMetadata).unwrap(), json!(1));
    }
}
