//! Human-readable rendering of an inspection outcome.

use crate::inspect::{
    InspectionResult, Recommendation, TrackElement, preferred_subtitle_source, recommend,
};
use crate::session::Outcome;
use colored::Colorize;
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 60;
const VIDEO_SRC_WIDTH: usize = 100;
const IFRAME_SRC_WIDTH: usize = 80;

/// Everything printed after a successful inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(flatten)]
    pub result: InspectionResult,
    pub track_elements: Vec<TrackElement>,
    pub subtitle_source: Option<String>,
    pub recommendations: Vec<Recommendation>,
}

impl Report {
    pub fn new(result: InspectionResult, track_elements: Vec<TrackElement>) -> Self {
        let recommendations = recommend(&result);
        let subtitle_source = preferred_subtitle_source(&track_elements);
        Self {
            result,
            track_elements,
            subtitle_source,
            recommendations,
        }
    }
}

/// Cut `s` to at most `max` characters.
fn clip(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

fn or_na(s: &str) -> &str {
    if s.is_empty() { "N/A" } else { s }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(f)?;
    writeln!(f, "{}", rule)?;
    writeln!(f, "{}", title.bold())?;
    writeln!(f, "{}", rule)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.result;
        heading(f, "INSPECTION RESULTS")?;
        writeln!(f)?;
        writeln!(f, "Video Player Type: {}", result.player_type)?;
        writeln!(f, "Has HLS: {}", result.has_hls)?;
        writeln!(f, "Number of videos: {}", result.videos.len())?;
        writeln!(f, "Number of iframes: {}", result.iframes.len())?;

        if !result.videos.is_empty() {
            writeln!(f, "\n--- Video Elements ---")?;
            for v in &result.videos {
                writeln!(f, "\nVideo #{}:", v.index)?;
                writeln!(f, "  src: {}", or_na(clip(&v.src, VIDEO_SRC_WIDTH)))?;
                writeln!(f, "  currentSrc: {}", or_na(clip(&v.current_src, VIDEO_SRC_WIDTH)))?;
                writeln!(f, "  readyState: {} ({})", u8::from(v.ready_state), v.ready_state)?;
                writeln!(f, "  Text tracks: {}", v.text_tracks.len())?;
                for t in &v.text_tracks {
                    writeln!(
                        f,
                        "    - kind={}, label={}, lang={}, mode={}, cues={}",
                        t.kind,
                        or_na(&t.label),
                        or_na(&t.language),
                        t.mode,
                        t.cues_count
                    )?;
                }
            }
        }

        if !result.iframes.is_empty() {
            writeln!(f, "\n--- Iframe Elements ---")?;
            for iframe in &result.iframes {
                write!(f, "  Iframe #{}: src={}", iframe.index, clip(&iframe.src, IFRAME_SRC_WIDTH))?;
                if !iframe.title.is_empty() {
                    write!(f, ", title={}", iframe.title)?;
                }
                writeln!(f)?;
            }
        }

        if !self.track_elements.is_empty() {
            writeln!(f, "\n--- Track Elements ---")?;
            for t in &self.track_elements {
                writeln!(
                    f,
                    "  kind={}, label={}, srclang={}, src={}",
                    t.kind,
                    or_na(&t.label),
                    or_na(&t.srclang),
                    or_na(&t.src)
                )?;
            }
        }

        if let Some(source) = &self.subtitle_source {
            writeln!(f, "\nSubtitle source: {}", source)?;
        }

        heading(f, "RECOMMENDATION")?;
        for rec in &self.recommendations {
            writeln!(f, "\n{} {}", "✓".green(), rec.headline())?;
            for line in rec.details() {
                writeln!(f, "  → {}", line)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AuthRequired { url } => {
                heading(f, "PAGE REQUIRES LOGIN!")?;
                writeln!(f)?;
                writeln!(f, "This page requires authentication to access the video:")?;
                writeln!(f, "  {}", url)?;
                writeln!(f, "We cannot proceed without login credentials.")
            }
            Outcome::Inspected(report) => fmt::Display::fmt(report, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{
        IframeDescriptor, PlayerType, ReadyState, TextTrackDescriptor, VideoDescriptor,
    };

    fn sample() -> Report {
        let long_src = format!("https://cdn.example/{}.m3u8", "a".repeat(200));
        let result = InspectionResult {
            videos: vec![VideoDescriptor {
                index: 0,
                src: String::new(),
                current_src: long_src,
                ready_state: ReadyState::HaveEnoughData,
                text_tracks: vec![TextTrackDescriptor {
                    kind: "subtitles".to_string(),
                    label: String::new(),
                    language: "en".to_string(),
                    mode: "hidden".to_string(),
                    cues_count: 0,
                }],
            }],
            iframes: vec![IframeDescriptor {
                index: 0,
                src: "https://player.example/embed/1".to_string(),
                title: "Lesson video".to_string(),
            }],
            has_hls: true,
            player_type: PlayerType::NativeHtml5,
        };
        let tracks = vec![TrackElement {
            kind: "subtitles".to_string(),
            label: "English".to_string(),
            srclang: "en".to_string(),
            src: "https://cdn.example/subs/en.m3u8".to_string(),
        }];
        Report::new(result, tracks)
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        assert_eq!(clip("héllo", 2), "hé");
        assert_eq!(clip("short", 100), "short");
        assert_eq!(clip("", 3), "");
    }

    #[test]
    fn test_report_layout() {
        let text = sample().to_string();
        assert!(text.contains("INSPECTION RESULTS"));
        assert!(text.contains("Video Player Type: HTML5 Video (native)"));
        assert!(text.contains("Has HLS: true"));
        assert!(text.contains("Number of videos: 1"));
        assert!(text.contains("  src: N/A"));
        assert!(text.contains("  readyState: 4 (HAVE_ENOUGH_DATA)"));
        assert!(text.contains("    - kind=subtitles, label=N/A, lang=en, mode=hidden, cues=0"));
        assert!(text.contains("  Iframe #0: src=https://player.example/embed/1, title=Lesson video"));
        assert!(text.contains("srclang=en"));
        assert!(text.contains("Subtitle source: https://cdn.example/subs/en.vtt"));
        assert!(text.contains("Detected HLS video (.m3u8)"));
        assert!(text.contains("No cues loaded yet"));

        let current = text
            .lines()
            .find_map(|l| l.strip_prefix("  currentSrc: "))
            .unwrap();
        assert_eq!(current.chars().count(), 100);
    }

    #[test]
    fn test_auth_required_text() {
        let outcome = Outcome::AuthRequired {
            url: "https://learn.example/lesson".to_string(),
        };
        let text = outcome.to_string();
        assert!(text.contains("PAGE REQUIRES LOGIN!"));
        assert!(text.contains("https://learn.example/lesson"));
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(Outcome::Inspected(sample())).unwrap();
        assert_eq!(value["status"], "inspected");
        assert_eq!(value["playerType"], "native-html5");
        assert_eq!(value["hasHLS"], true);
        assert_eq!(value["videos"][0]["readyState"], 4);
        assert_eq!(value["recommendations"][0], "poll-cues");
        assert_eq!(value["subtitleSource"], "https://cdn.example/subs/en.vtt");

        let value = serde_json::to_value(Outcome::AuthRequired {
            url: "https://x".to_string(),
        })
        .unwrap();
        assert_eq!(value["status"], "auth-required");
    }
}
