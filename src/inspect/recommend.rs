use super::InspectionResult;
use serde::Serialize;

/// Advice on how a subtitle overlay should read cues from this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    /// HLS source: cues attach asynchronously after the manifest is parsed.
    PollCues,
    /// Cues are already resident on a text track.
    UseCueChange,
    /// Tracks exist but no cues are loaded yet.
    AwaitTrackLoad,
}

impl Recommendation {
    pub fn headline(self) -> &'static str {
        match self {
            Self::PollCues => "Detected HLS video (.m3u8)",
            Self::UseCueChange => "Found pre-loaded cues",
            Self::AwaitTrackLoad => "No cues loaded yet",
        }
    }

    pub fn details(self) -> &'static [&'static str] {
        match self {
            Self::PollCues => &[
                "Need polling method for subtitle cues",
                "TextTrack cues may load asynchronously",
            ],
            Self::UseCueChange => &["Can use oncuechange event directly"],
            Self::AwaitTrackLoad => &[
                "Need to wait for cues to load",
                "Use polling or wait for 'load' event on TextTrack",
            ],
        }
    }
}

/// Apply the advisory rules. The streaming rule and the cue rule are
/// independent, so both can appear. The cue rule only applies once a video
/// has at least one text track attached.
pub fn recommend(result: &InspectionResult) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if result.has_hls {
        out.push(Recommendation::PollCues);
    }

    if result.text_tracks().next().is_some() {
        if result.text_tracks().any(|t| t.cues_count > 0) {
            out.push(Recommendation::UseCueChange);
        } else {
            out.push(Recommendation::AwaitTrackLoad);
        }
    }

    out
}
