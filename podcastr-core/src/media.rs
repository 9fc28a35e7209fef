//! Media playback capability.
//!
//! [`MediaHandle`] abstracts a platform media element (an HTML audio element
//! in the desktop app). Commands are fire-and-forget: their outcome is
//! reported later as a [`MediaEvent`] handed to
//! [`PlayerView::handle_media_event`](crate::view::PlayerView::handle_media_event),
//! never from inside the command itself.

use std::time::Duration;

/// Events reported by the platform media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    /// Playback actually started
    Play,
    /// Playback actually paused (also reported when autoplay is blocked)
    Pause,
    /// The media reached its end without looping
    Ended,
    /// The playback position advanced
    TimeUpdate,
    /// Metadata (duration) of a newly loaded source is available
    MetadataLoaded,
}

/// Commands and queries on a live media element
pub trait MediaHandle {
    /// Replace the current source. The element starts playing once loaded if
    /// `play` was requested.
    fn load(&mut self, url: &str);

    /// Drop the current source
    fn unload(&mut self);

    /// Request playback to begin
    fn play(&mut self);

    /// Request playback to pause
    fn pause(&mut self);

    /// Move the playback position
    fn seek(&mut self, position: Duration);

    /// Restart automatically at the end instead of reporting `Ended`
    fn set_looping(&mut self, looping: bool);

    /// Last known playback position
    fn current_position(&self) -> Duration;

    /// Length of the loaded source, once metadata is known
    fn duration(&self) -> Option<Duration>;
}
