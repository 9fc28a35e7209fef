//! Player view: binds the playback store to a live media element.
//!
//! The view subscribes to the store when mounted. Store notifications are
//! queued in an inbox and applied on the next [`PlayerView::render`], which
//! reconciles the media element with the store (source, loop flag,
//! play/pause) and returns the [`PlayerViewModel`] to draw. Media events and
//! button presses come back in through [`PlayerView::handle_media_event`] and
//! the `press_*` methods.

use crate::media::{MediaEvent, MediaHandle};
use crate::store::{SharedStore, StoreEvent, SubscriptionId};
use crate::time::{format_time, DurationExt};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

const LOG_TARGET: &str = "podcastr::view";

/// What the view last commanded or observed on the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaState {
    Paused,
    Playing,
}

/// Icon shown on the central transport button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayButton {
    Play,
    Pause,
}

/// Availability and highlight of a single transport button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub enabled: bool,
    pub active: bool,
}

/// The five transport buttons, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransportControls {
    pub shuffle: ControlState,
    pub previous: ControlState,
    pub play_pause: ControlState,
    pub next: ControlState,
    pub repeat: ControlState,
}

/// Metadata of the episode being played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeCard {
    pub title: String,
    pub members: String,
    pub thumbnail: String,
}

/// Everything needed to draw the player for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerViewModel {
    /// `None` renders the "select a podcast" placeholder
    pub episode: Option<EpisodeCard>,
    pub progress_secs: u64,
    pub duration_secs: u64,
    pub progress_text: String,
    pub duration_text: String,
    pub slider_enabled: bool,
    pub play_button: PlayButton,
    pub controls: TransportControls,
}

/// Presentation logic for the player, generic over the media element
pub struct PlayerView<M: MediaHandle> {
    store: SharedStore,
    media: M,
    inbox: Rc<RefCell<Vec<StoreEvent>>>,
    subscription: Option<SubscriptionId>,
    media_state: MediaState,
    loaded_url: Option<String>,
    applied_looping: Option<bool>,
    progress: u64,
}

impl<M: MediaHandle> PlayerView<M> {
    /// Mount the view: subscribe to the store and bind the current episode
    pub fn mount(store: SharedStore, media: M) -> Self {
        let inbox = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&inbox);
        let subscription = store
            .borrow_mut()
            .subscribe(move |event, _| sink.borrow_mut().push(event.clone()));

        let mut view = Self {
            store,
            media,
            inbox,
            subscription: Some(subscription),
            media_state: MediaState::Paused,
            loaded_url: None,
            applied_looping: None,
            progress: 0,
        };
        view.reconcile();
        view
    }

    /// The store this view is bound to
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    #[must_use]
    pub const fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    #[must_use]
    pub const fn media_state(&self) -> MediaState {
        self.media_state
    }

    /// Elapsed seconds of the current episode
    #[must_use]
    pub const fn progress(&self) -> u64 {
        self.progress
    }

    /// Apply pending store changes to the media element and build the frame
    pub fn render(&mut self) -> PlayerViewModel {
        self.reconcile();
        self.view_model()
    }

    /// Bring the media element in line with the store
    fn reconcile(&mut self) {
        let pending: Vec<StoreEvent> = self.inbox.borrow_mut().drain(..).collect();
        let reselected = pending.iter().any(|event| {
            matches!(
                event,
                StoreEvent::QueueReplaced { .. } | StoreEvent::EpisodeChanged { .. }
            )
        });

        let (url, is_looping) = {
            let store = self.store.borrow();
            (store.current_episode().map(|e| e.url.clone()), store.is_looping())
        };

        match url {
            Some(url) if reselected || self.loaded_url.as_deref() != Some(url.as_str()) => {
                debug!(target: LOG_TARGET, "Loading {}", url);
                self.media.load(&url);
                self.loaded_url = Some(url);
                self.media_state = MediaState::Paused;
                self.progress = 0;
                // A freshly loaded episode autoplays
                self.store.borrow_mut().set_play_state(true);
                self.inbox.borrow_mut().clear();
            }
            Some(_) => {}
            None => {
                if self.loaded_url.take().is_some() {
                    debug!(target: LOG_TARGET, "Queue empty, unloading media");
                    self.media.unload();
                    self.media_state = MediaState::Paused;
                    self.progress = 0;
                }
            }
        }

        if self.applied_looping != Some(is_looping) {
            self.media.set_looping(is_looping);
            self.applied_looping = Some(is_looping);
        }

        if self.loaded_url.is_none() {
            return;
        }

        let is_playing = self.store.borrow().is_playing();
        match (is_playing, self.media_state) {
            (true, MediaState::Paused) => {
                trace!(target: LOG_TARGET, "Requesting playback");
                self.media.play();
                self.media_state = MediaState::Playing;
            }
            (false, MediaState::Playing) => {
                trace!(target: LOG_TARGET, "Requesting pause");
                self.media.pause();
                self.media_state = MediaState::Paused;
            }
            _ => {}
        }
    }

    /// React to an event reported by the media element
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if self.loaded_url.is_none() {
            trace!(target: LOG_TARGET, "Ignoring {:?} with no media loaded", event);
            return;
        }

        match event {
            MediaEvent::Play => {
                self.media_state = MediaState::Playing;
                self.store.borrow_mut().set_play_state(true);
            }
            MediaEvent::Pause => {
                self.media_state = MediaState::Paused;
                self.store.borrow_mut().set_play_state(false);
            }
            MediaEvent::Ended => {
                self.media_state = MediaState::Paused;
                let mut store = self.store.borrow_mut();
                if store.has_next() {
                    store.play_next();
                } else {
                    debug!(target: LOG_TARGET, "Playback ended with nothing queued");
                    store.clear_player_state();
                }
            }
            MediaEvent::TimeUpdate => {
                self.progress = self.media.current_position().whole_secs();
            }
            MediaEvent::MetadataLoaded => {
                self.media.seek(Duration::ZERO);
                self.progress = 0;
                if let Some(duration) = self.media.duration() {
                    debug!(target: LOG_TARGET, "Metadata loaded, duration {}s", duration.whole_secs());
                }
            }
        }
    }

    /// Move the playback position, clamped to the episode length.
    ///
    /// Does nothing while no episode is selected.
    pub fn seek(&mut self, secs: u64) {
        let Some(duration) = self.store.borrow().current_episode().map(|e| e.duration) else {
            return;
        };
        if self.loaded_url.is_none() {
            return;
        }

        let target = secs.min(duration);
        self.media.seek(Duration::from_secs(target));
        self.progress = target;
    }

    pub fn press_play_pause(&mut self) {
        if self.controls().play_pause.enabled {
            self.store.borrow_mut().toggle_play();
        }
    }

    pub fn press_next(&mut self) {
        if self.controls().next.enabled {
            self.store.borrow_mut().play_next();
        }
    }

    pub fn press_previous(&mut self) {
        if self.controls().previous.enabled {
            self.store.borrow_mut().play_previous();
        }
    }

    pub fn press_shuffle(&mut self) {
        if self.controls().shuffle.enabled {
            self.store.borrow_mut().toggle_shuffle();
        }
    }

    pub fn press_loop(&mut self) {
        if self.controls().repeat.enabled {
            self.store.borrow_mut().toggle_loop();
        }
    }

    /// Unsubscribe from the store and hand back the media element
    pub fn unmount(mut self) -> M
    where
        M: Default,
    {
        self.detach();
        std::mem::take(&mut self.media)
    }

    fn detach(&mut self) {
        if let Some(id) = self.subscription.take() {
            if let Ok(mut store) = self.store.try_borrow_mut() {
                store.unsubscribe(id);
            }
        }
    }

    fn controls(&self) -> TransportControls {
        let store = self.store.borrow();
        let has_episode = store.current_episode().is_some();

        TransportControls {
            shuffle: ControlState {
                enabled: has_episode && store.episode_list().len() != 1,
                active: store.is_shuffling(),
            },
            previous: ControlState {
                enabled: has_episode && store.has_previous(),
                active: false,
            },
            play_pause: ControlState {
                enabled: has_episode,
                active: store.is_playing(),
            },
            next: ControlState {
                enabled: has_episode && store.has_next(),
                active: false,
            },
            repeat: ControlState {
                enabled: has_episode,
                active: store.is_looping(),
            },
        }
    }

    fn view_model(&self) -> PlayerViewModel {
        let controls = self.controls();
        let store = self.store.borrow();
        let episode = store.current_episode();

        PlayerViewModel {
            episode: episode.map(|e| EpisodeCard {
                title: e.title.clone(),
                members: e.members.clone(),
                thumbnail: e.thumbnail.clone(),
            }),
            progress_secs: self.progress,
            duration_secs: episode.map_or(0, |e| e.duration),
            progress_text: format_time(self.progress),
            duration_text: episode
                .map_or_else(|| format_time(0), |e| e.duration_as_string.clone()),
            slider_enabled: episode.is_some(),
            play_button: if store.is_playing() {
                PlayButton::Pause
            } else {
                PlayButton::Play
            },
            controls,
        }
    }
}

impl<M: MediaHandle> Drop for PlayerView<M> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::Episode;
    use crate::store::PlaybackStore;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Command {
        Load(String),
        Unload,
        Play,
        Pause,
        Seek(u64),
        Looping(bool),
    }

    #[derive(Debug, Default)]
    struct FakeMedia {
        commands: Vec<Command>,
        position: Duration,
        duration: Option<Duration>,
    }

    impl FakeMedia {
        fn take(&mut self) -> Vec<Command> {
            std::mem::take(&mut self.commands)
        }
    }

    impl MediaHandle for FakeMedia {
        fn load(&mut self, url: &str) {
            self.commands.push(Command::Load(url.to_string()));
        }

        fn unload(&mut self) {
            self.commands.push(Command::Unload);
        }

        fn play(&mut self) {
            self.commands.push(Command::Play);
        }

        fn pause(&mut self) {
            self.commands.push(Command::Pause);
        }

        fn seek(&mut self, position: Duration) {
            self.position = position;
            self.commands.push(Command::Seek(position.as_secs()));
        }

        fn set_looping(&mut self, looping: bool) {
            self.commands.push(Command::Looping(looping));
        }

        fn current_position(&self) -> Duration {
            self.position
        }

        fn duration(&self) -> Option<Duration> {
            self.duration
        }
    }

    fn episode(name: &str) -> Episode {
        Episode::new(
            name,
            "Tiago, Diego e Richard",
            format!("https://example.com/{name}.jpg"),
            300,
            format!("https://example.com/{name}.m4a"),
        )
    }

    fn url(name: &str) -> String {
        format!("https://example.com/{name}.m4a")
    }

    fn mounted() -> (SharedStore, PlayerView<FakeMedia>) {
        let store = PlaybackStore::with_seed(3).shared();
        let mut view = PlayerView::mount(Rc::clone(&store), FakeMedia::default());
        view.media_mut().take();
        (store, view)
    }

    #[test]
    fn test_empty_store_renders_placeholder() {
        let (_store, mut view) = mounted();
        let model = view.render();

        assert!(model.episode.is_none());
        assert!(!model.slider_enabled);
        assert_eq!(model.progress_text, "00:00");
        assert_eq!(model.duration_text, "00:00");
        assert_eq!(model.controls, TransportControls {
            shuffle: ControlState::default(),
            previous: ControlState::default(),
            play_pause: ControlState::default(),
            next: ControlState::default(),
            repeat: ControlState::default(),
        });
        assert!(view.media_mut().take().is_empty());
    }

    #[test]
    fn test_mount_subscribes_and_drop_unsubscribes() {
        let store = PlaybackStore::new().shared();
        let view = PlayerView::mount(Rc::clone(&store), FakeMedia::default());
        assert_eq!(store.borrow().subscriber_count(), 1);

        drop(view);
        assert_eq!(store.borrow().subscriber_count(), 0);
    }

    #[test]
    fn test_unmount_returns_media() {
        let store = PlaybackStore::new().shared();
        store.borrow_mut().play(episode("a"));
        let view = PlayerView::mount(Rc::clone(&store), FakeMedia::default());

        let media = view.unmount();
        assert_eq!(
            media.commands,
            vec![Command::Load(url("a")), Command::Looping(false), Command::Play]
        );
        assert_eq!(store.borrow().subscriber_count(), 0);
    }

    #[test]
    fn test_play_loads_and_starts_media() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));

        let model = view.render();

        assert_eq!(
            view.media_mut().take(),
            vec![Command::Load(url("a")), Command::Play]
        );
        assert_eq!(view.media_state(), MediaState::Playing);
        assert_eq!(model.play_button, PlayButton::Pause);
        assert_eq!(model.episode.map(|e| e.title), Some("a".to_string()));
        assert_eq!(model.duration_text, "05:00");
    }

    #[test]
    fn test_toggle_play_issues_pause_then_play() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        view.render();
        view.media_mut().take();

        view.press_play_pause();
        let model = view.render();
        assert_eq!(view.media_mut().take(), vec![Command::Pause]);
        assert_eq!(model.play_button, PlayButton::Play);

        view.press_play_pause();
        view.render();
        assert_eq!(view.media_mut().take(), vec![Command::Play]);
    }

    #[test]
    fn test_rejected_autoplay_reconciles_store() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        view.render();
        view.media_mut().take();

        // The platform refused to start playback
        view.handle_media_event(MediaEvent::Pause);
        let model = view.render();

        assert!(!store.borrow().is_playing());
        assert_eq!(model.play_button, PlayButton::Play);
        assert!(view.media_mut().take().is_empty());
    }

    #[test]
    fn test_native_play_event_does_not_echo_command() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        view.render();
        view.handle_media_event(MediaEvent::Pause);
        view.render();
        view.media_mut().take();

        view.handle_media_event(MediaEvent::Play);
        view.render();

        assert!(store.borrow().is_playing());
        assert!(view.media_mut().take().is_empty());
    }

    #[test]
    fn test_ended_advances_queue() {
        let (store, mut view) = mounted();
        store
            .borrow_mut()
            .play_list(vec![episode("a"), episode("b")], 0)
            .unwrap();
        view.render();
        view.media_mut().take();

        view.handle_media_event(MediaEvent::Pause);
        view.handle_media_event(MediaEvent::Ended);
        let model = view.render();

        assert_eq!(store.borrow().current_episode_index(), 1);
        assert_eq!(
            view.media_mut().take(),
            vec![Command::Load(url("b")), Command::Play]
        );
        assert_eq!(model.play_button, PlayButton::Pause);
    }

    #[test]
    fn test_ended_without_next_clears_queue() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        view.render();
        view.media_mut().take();

        view.handle_media_event(MediaEvent::Ended);
        let model = view.render();

        assert!(store.borrow().episode_list().is_empty());
        assert_eq!(view.media_mut().take(), vec![Command::Unload]);
        assert!(model.episode.is_none());
        assert!(!model.controls.play_pause.enabled);
    }

    #[test]
    fn test_shuffle_reselecting_same_episode_reloads() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        store.borrow_mut().toggle_shuffle();
        view.render();
        view.media_mut().take();

        view.handle_media_event(MediaEvent::Ended);
        view.render();

        assert_eq!(store.borrow().current_episode_index(), 0);
        assert_eq!(
            view.media_mut().take(),
            vec![Command::Load(url("a")), Command::Play]
        );
    }

    #[test]
    fn test_progress_tracks_media_and_resets_on_metadata() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        view.render();

        view.media_mut().position = Duration::from_millis(65_400);
        view.handle_media_event(MediaEvent::TimeUpdate);
        let model = view.render();
        assert_eq!(model.progress_secs, 65);
        assert_eq!(model.progress_text, "01:05");

        view.media_mut().take();
        view.handle_media_event(MediaEvent::MetadataLoaded);
        assert_eq!(view.progress(), 0);
        assert_eq!(view.media_mut().take(), vec![Command::Seek(0)]);
    }

    #[test]
    fn test_seek_clamps_and_updates_progress() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        view.render();
        view.media_mut().take();

        view.seek(120);
        assert_eq!(view.progress(), 120);
        view.seek(10_000);
        assert_eq!(view.progress(), 300);

        assert_eq!(
            view.media_mut().take(),
            vec![Command::Seek(120), Command::Seek(300)]
        );
        // Seeking never touches the store
        assert!(store.borrow().is_playing());
    }

    #[test]
    fn test_seek_without_episode_is_noop() {
        let (_store, mut view) = mounted();
        view.seek(30);

        assert_eq!(view.progress(), 0);
        assert!(view.media_mut().take().is_empty());
    }

    #[test]
    fn test_loop_flag_is_mirrored() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        view.render();
        view.media_mut().take();

        view.press_loop();
        let model = view.render();

        assert_eq!(view.media_mut().take(), vec![Command::Looping(true)]);
        assert!(model.controls.repeat.active);
    }

    #[test]
    fn test_control_availability() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        let single = view.render().controls;
        assert!(!single.shuffle.enabled);
        assert!(!single.previous.enabled);
        assert!(!single.next.enabled);
        assert!(single.play_pause.enabled);
        assert!(single.repeat.enabled);

        store
            .borrow_mut()
            .play_list(vec![episode("a"), episode("b"), episode("c")], 1)
            .unwrap();
        let middle = view.render().controls;
        assert!(middle.shuffle.enabled);
        assert!(middle.previous.enabled);
        assert!(middle.next.enabled);
    }

    #[test]
    fn test_disabled_press_is_ignored() {
        let (store, mut view) = mounted();
        store.borrow_mut().play(episode("a"));
        view.render();

        view.press_shuffle();
        view.press_next();
        view.press_previous();

        let store = store.borrow();
        assert!(!store.is_shuffling());
        assert_eq!(store.current_episode_index(), 0);
    }

    #[test]
    fn test_next_and_previous_presses_navigate() {
        let (store, mut view) = mounted();
        store
            .borrow_mut()
            .play_list(vec![episode("a"), episode("b")], 0)
            .unwrap();
        view.render();
        view.media_mut().take();

        view.press_next();
        view.render();
        assert_eq!(store.borrow().current_episode_index(), 1);

        view.press_previous();
        view.render();
        assert_eq!(store.borrow().current_episode_index(), 0);

        assert_eq!(
            view.media_mut().take(),
            vec![
                Command::Load(url("b")),
                Command::Play,
                Command::Load(url("a")),
                Command::Play,
            ]
        );
    }

    #[test]
    fn test_paused_next_press_autoplays_new_episode() {
        let (store, mut view) = mounted();
        store
            .borrow_mut()
            .play_list(vec![episode("a"), episode("b")], 0)
            .unwrap();
        view.render();
        view.press_play_pause();
        view.render();
        view.media_mut().take();

        view.press_next();
        let model = view.render();

        assert!(store.borrow().is_playing());
        assert_eq!(model.play_button, PlayButton::Pause);
        assert_eq!(
            view.media_mut().take(),
            vec![Command::Load(url("b")), Command::Play]
        );
    }

    #[test]
    fn test_events_after_unload_are_ignored() {
        let (store, mut view) = mounted();
        view.handle_media_event(MediaEvent::Pause);
        view.handle_media_event(MediaEvent::Ended);

        assert!(!store.borrow().is_playing());
        assert!(store.borrow().episode_list().is_empty());
    }
}
