use super::{PlayerMarkers, PlayerType, VideoDescriptor};

/// Manifest extension of HLS streams.
const HLS_MARKER: &str = ".m3u8";

/// Pick the player implementation. Markers are checked in a fixed order and
/// the first hit wins, since real pages often carry several at once:
/// `.video-js`, `.jwplayer`, `[data-video-js]`, then any plain `<video>`.
pub fn classify_player_type(markers: &PlayerMarkers, video_count: usize) -> PlayerType {
    if markers.video_js_class {
        PlayerType::VideoJs
    } else if markers.jwplayer_class {
        PlayerType::JwPlayer
    } else if markers.video_js_attribute {
        PlayerType::VideoJsAttribute
    } else if video_count > 0 {
        PlayerType::NativeHtml5
    } else {
        PlayerType::Unknown
    }
}

/// True when any declared or resolved video source points at an HLS manifest.
pub fn detect_streaming_format(videos: &[VideoDescriptor]) -> bool {
    videos
        .iter()
        .any(|v| v.src.contains(HLS_MARKER) || v.current_src.contains(HLS_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::ReadyState;

    fn video(src: &str, current_src: &str) -> VideoDescriptor {
        VideoDescriptor {
            index: 0,
            src: src.to_string(),
            current_src: current_src.to_string(),
            ready_state: ReadyState::HaveNothing,
            text_tracks: Vec::new(),
        }
    }

    fn markers(class: bool, jw: bool, attribute: bool) -> PlayerMarkers {
        PlayerMarkers {
            video_js_class: class,
            jwplayer_class: jw,
            video_js_attribute: attribute,
        }
    }

    #[test]
    fn test_nothing_found_is_unknown() {
        assert_eq!(
            classify_player_type(&PlayerMarkers::default(), 0),
            PlayerType::Unknown
        );
    }

    #[test]
    fn test_class_marker_beats_everything() {
        for (jw, attribute, videos) in [(false, false, 0), (true, true, 3), (false, true, 1)] {
            assert_eq!(
                classify_player_type(&markers(true, jw, attribute), videos),
                PlayerType::VideoJs
            );
        }
        assert_eq!(
            classify_player_type(&markers(false, true, true), 2),
            PlayerType::JwPlayer
        );
    }

    #[test]
    fn test_attribute_beats_native_video() {
        assert_eq!(
            classify_player_type(&markers(false, false, true), 1),
            PlayerType::VideoJsAttribute
        );
        assert_eq!(
            classify_player_type(&markers(false, false, true), 0),
            PlayerType::VideoJsAttribute
        );
    }

    #[test]
    fn test_plain_video_is_native() {
        assert_eq!(
            classify_player_type(&PlayerMarkers::default(), 1),
            PlayerType::NativeHtml5
        );
    }

    #[test]
    fn test_streaming_detection() {
        assert!(detect_streaming_format(&[video("https://cdn/video/playlist.m3u8", "")]));
        assert!(!detect_streaming_format(&[video("https://cdn/video/clip.mp4", "")]));
        assert!(!detect_streaming_format(&[]));
    }

    #[test]
    fn test_streaming_detection_uses_resolved_source() {
        let videos = [
            video("", "https://cdn/video/clip.mp4"),
            video("blob:https://learn.example/1", "https://cdn/hls/master.m3u8?token=x"),
        ];
        assert!(detect_streaming_format(&videos));
    }
}
