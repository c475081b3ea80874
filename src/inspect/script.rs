//! Scripts evaluated in the page.
//!
//! Data-returning scripts hand back a JSON string so the page decides the
//! exact shape and nothing depends on how the driver marshals objects.

/// True once the document has finished loading.
pub const DOCUMENT_READY: &str = "document.readyState === 'complete'";

/// True once a `<video>` or `<iframe>` is in the DOM.
pub const MEDIA_PRESENT: &str = "document.querySelector('video, iframe') !== null";

/// Snapshot of video elements, their text tracks, iframes and player markers.
///
/// Read-only: never starts playback and never touches `TextTrack.mode`.
pub const PLAYER_SNAPSHOT: &str = r#"
(() => {
    const snapshot = { videos: [], iframes: [], markers: {} };

    document.querySelectorAll('video').forEach((video, index) => {
        const textTracks = [];
        const tracks = video.textTracks || [];
        for (let j = 0; j < tracks.length; j++) {
            const track = tracks[j];
            textTracks.push({
                kind: track.kind,
                label: track.label,
                language: track.language,
                mode: track.mode,
                cuesCount: track.cues ? track.cues.length : 0
            });
        }
        snapshot.videos.push({
            index,
            src: video.src || '',
            currentSrc: video.currentSrc || '',
            readyState: video.readyState,
            textTracks
        });
    });

    document.querySelectorAll('iframe').forEach((iframe, index) => {
        snapshot.iframes.push({
            index,
            src: iframe.src || '',
            title: iframe.title || ''
        });
    });

    snapshot.markers = {
        videoJsClass: document.querySelector('.video-js') !== null,
        jwplayerClass: document.querySelector('.jwplayer') !== null,
        videoJsAttribute: document.querySelector('[data-video-js]') !== null
    };

    return JSON.stringify(snapshot);
})()
"#;

/// Standalone `<track>` declarations anywhere in the document.
pub const TRACK_ELEMENTS: &str = r#"
(() => {
    const tracks = [];
    document.querySelectorAll('track').forEach((t) => {
        tracks.push({
            kind: t.kind || '',
            label: t.label || '',
            srclang: t.srclang || '',
            src: t.src || ''
        });
    });
    return JSON.stringify(tracks);
})()
"#;
