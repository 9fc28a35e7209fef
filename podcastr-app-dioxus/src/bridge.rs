//! Webview audio element bridge.
//!
//! The player's media element is an `Audio` object living in the webview.
//! Commands are sent to it through a long-running `document::eval` script,
//! and the element's events come back over the same channel as
//! [`AudioReport`]s.

use dioxus::document::Eval;
use podcastr_core::{MediaEvent, MediaHandle};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

const LOG_TARGET: &str = "podcastr::bridge";

/// Script owning the webview `Audio` object.
///
/// Reports `play`, `pause`, `ended`, `timeupdate` and `loadedmetadata` events
/// with the element's position and duration, and applies commands sent from
/// Rust. A rejected `play()` (autoplay policy) is reported as a pause.
pub const AUDIO_BRIDGE_JS: &str = r#"
    const audio = new Audio();
    audio.preload = "metadata";

    const report = (kind) => dioxus.send({
        kind,
        position: Number.isFinite(audio.currentTime) ? audio.currentTime : 0,
        duration: Number.isFinite(audio.duration) ? audio.duration : null,
    });

    for (const kind of ["play", "pause", "ended", "timeupdate", "loadedmetadata"]) {
        audio.addEventListener(kind, () => report(kind));
    }

    while (true) {
        const command = await dioxus.recv();
        switch (command.kind) {
            case "load":
                audio.src = command.url;
                audio.autoplay = true;
                audio.load();
                break;
            case "unload":
                audio.pause();
                audio.removeAttribute("src");
                audio.load();
                break;
            case "play":
                audio.play().catch(() => report("pause"));
                break;
            case "pause":
                audio.pause();
                break;
            case "seek":
                audio.currentTime = command.position;
                break;
            case "looping":
                audio.loop = command.looping;
                break;
        }
    }
"#;

/// Commands understood by [`AUDIO_BRIDGE_JS`]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum AudioCommand<'a> {
    Load { url: &'a str },
    Unload,
    Play,
    Pause,
    Seek { position: f64 },
    Looping { looping: bool },
}

/// Event names reported by the audio element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ReportKind {
    #[serde(rename = "play")]
    Play,
    #[serde(rename = "pause")]
    Pause,
    #[serde(rename = "ended")]
    Ended,
    #[serde(rename = "timeupdate")]
    TimeUpdate,
    #[serde(rename = "loadedmetadata")]
    MetadataLoaded,
}

impl From<ReportKind> for MediaEvent {
    fn from(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Play => Self::Play,
            ReportKind::Pause => Self::Pause,
            ReportKind::Ended => Self::Ended,
            ReportKind::TimeUpdate => Self::TimeUpdate,
            ReportKind::MetadataLoaded => Self::MetadataLoaded,
        }
    }
}

/// One event from the audio element with its position at that moment
#[derive(Debug, Clone, Deserialize)]
pub struct AudioReport {
    pub kind: ReportKind,
    /// Seconds since the start of the source
    pub position: f64,
    /// Seconds, once metadata is known
    pub duration: Option<f64>,
}

fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or_default()
}

/// [`MediaHandle`] over the webview audio element
pub struct WebviewAudio {
    channel: Eval,
    position: Duration,
    duration: Option<Duration>,
}

impl WebviewAudio {
    /// Wrap the eval channel running [`AUDIO_BRIDGE_JS`]
    #[must_use]
    pub fn new(channel: Eval) -> Self {
        Self {
            channel,
            position: Duration::ZERO,
            duration: None,
        }
    }

    /// Record the position and duration carried by a report
    pub fn observe(&mut self, report: &AudioReport) {
        self.position = secs_to_duration(report.position);
        self.duration = report.duration.map(secs_to_duration);
    }

    fn send(&self, command: &AudioCommand<'_>) {
        if let Err(e) = self.channel.send(command) {
            warn!(target: LOG_TARGET, "Failed to send {:?} to audio element: {:?}", command, e);
        }
    }
}

impl MediaHandle for WebviewAudio {
    fn load(&mut self, url: &str) {
        self.position = Duration::ZERO;
        self.duration = None;
        self.send(&AudioCommand::Load { url });
    }

    fn unload(&mut self) {
        self.position = Duration::ZERO;
        self.duration = None;
        self.send(&AudioCommand::Unload);
    }

    fn play(&mut self) {
        self.send(&AudioCommand::Play);
    }

    fn pause(&mut self) {
        self.send(&AudioCommand::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
        self.send(&AudioCommand::Seek {
            position: position.as_secs_f64(),
        });
    }

    fn set_looping(&mut self, looping: bool) {
        self.send(&AudioCommand::Looping { looping });
    }

    fn current_position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}
