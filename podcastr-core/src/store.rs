//! Playback store: the queued episodes and their playback status.
//!
//! The store is the single source of truth the player view reads from. It is
//! created once when the application starts and handed to the views that need
//! it as a [`SharedStore`]. Every mutation notifies subscribed listeners
//! synchronously, after the new state is in place.

use crate::config::PlayerConfig;
use crate::episode::Episode;
use crate::error::{PodcastrError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

const LOG_TARGET: &str = "podcastr::store";

/// Store handle shared between the application and its views
pub type SharedStore = Rc<RefCell<PlaybackStore>>;

/// Change notifications emitted after each store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The whole queue was replaced by `play` or `play_list`
    QueueReplaced { len: usize, index: usize },
    /// `play_next`/`play_previous` selected the episode at `index`.
    ///
    /// Emitted even when a shuffle lands on the index that was already
    /// current, so the episode restarts.
    EpisodeChanged { index: usize },
    /// The play/pause flag changed
    PlayStateChanged { is_playing: bool },
    /// The loop flag changed
    LoopChanged { is_looping: bool },
    /// The shuffle flag changed
    ShuffleChanged { is_shuffling: bool },
    /// The queue was emptied
    QueueCleared,
}

/// Handle returned by [`PlaybackStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent, &PlaybackStore)>;

/// Episode queue, current position and playback toggles
pub struct PlaybackStore {
    episode_list: Vec<Episode>,
    current_episode_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    rng: StdRng,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl PlaybackStore {
    /// Create an empty, paused store
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a store whose shuffle picks are reproducible
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a store with the initial toggles taken from config
    #[must_use]
    pub fn from_config(config: &PlayerConfig) -> Self {
        let mut store = Self::new();
        store.is_looping = config.start_looping;
        store.is_shuffling = config.start_shuffling;
        store
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            episode_list: Vec::new(),
            current_episode_index: 0,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            rng,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Wrap the store for sharing with views
    #[must_use]
    pub fn shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    // ---- state ----

    /// Queued episodes in playback order
    #[must_use]
    pub fn episode_list(&self) -> &[Episode] {
        &self.episode_list
    }

    /// Index of the current episode (0 when the queue is empty)
    #[must_use]
    pub const fn current_episode_index(&self) -> usize {
        self.current_episode_index
    }

    /// The episode currently selected, if any
    #[must_use]
    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_episode_index)
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub const fn is_looping(&self) -> bool {
        self.is_looping
    }

    #[must_use]
    pub const fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// Whether `play_next` would select an episode.
    ///
    /// Always true while shuffling.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_episode_index + 1 < self.episode_list.len()
    }

    /// Whether `play_previous` would select an episode
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_episode_index >= 1
    }

    // ---- operations ----

    /// Replace the queue with a single episode and start playing it
    pub fn play(&mut self, episode: Episode) {
        debug!(target: LOG_TARGET, "Playing single episode: {}", episode.title);
        self.episode_list = vec![episode];
        self.current_episode_index = 0;
        self.is_playing = true;
        self.notify(&StoreEvent::QueueReplaced { len: 1, index: 0 });
    }

    /// Replace the queue with `list` and start playing at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PodcastrError::IndexOutOfRange`] if `index` does not address
    /// an episode of `list` (an empty list only accepts index 0). The store is
    /// left untouched in that case.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<()> {
        let len = list.len();
        let in_range = if list.is_empty() { index == 0 } else { index < len };
        if !in_range {
            return Err(PodcastrError::IndexOutOfRange { index, len });
        }

        debug!(target: LOG_TARGET, "Playing list of {} episode(s) from index {}", len, index);
        self.episode_list = list;
        self.current_episode_index = index;
        self.is_playing = true;
        self.notify(&StoreEvent::QueueReplaced { len, index });
        Ok(())
    }

    /// Advance the queue.
    ///
    /// While shuffling, any index of the queue may be picked, including the
    /// current one. Otherwise steps forward by one, or does nothing at the end
    /// of the queue.
    pub fn play_next(&mut self) {
        let len = self.episode_list.len();

        if self.is_shuffling {
            if len == 0 {
                return;
            }
            self.current_episode_index = self.rng.gen_range(0..len);
            debug!(target: LOG_TARGET, "Shuffled to index {}", self.current_episode_index);
        } else if self.has_next() {
            self.current_episode_index += 1;
            debug!(target: LOG_TARGET, "Advanced to index {}", self.current_episode_index);
        } else {
            return;
        }

        self.notify(&StoreEvent::EpisodeChanged {
            index: self.current_episode_index,
        });
    }

    /// Step back one episode, if there is one
    pub fn play_previous(&mut self) {
        if !self.has_previous() {
            return;
        }

        self.current_episode_index -= 1;
        debug!(target: LOG_TARGET, "Stepped back to index {}", self.current_episode_index);
        self.notify(&StoreEvent::EpisodeChanged {
            index: self.current_episode_index,
        });
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
        debug!(target: LOG_TARGET, "Toggled play: {}", self.is_playing);
        self.notify(&StoreEvent::PlayStateChanged {
            is_playing: self.is_playing,
        });
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
        debug!(target: LOG_TARGET, "Toggled loop: {}", self.is_looping);
        self.notify(&StoreEvent::LoopChanged {
            is_looping: self.is_looping,
        });
    }

    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
        debug!(target: LOG_TARGET, "Toggled shuffle: {}", self.is_shuffling);
        self.notify(&StoreEvent::ShuffleChanged {
            is_shuffling: self.is_shuffling,
        });
    }

    /// Set the play flag to what the media element actually reports.
    ///
    /// Listeners are only notified when the flag changes.
    pub fn set_play_state(&mut self, is_playing: bool) {
        if self.is_playing == is_playing {
            return;
        }

        self.is_playing = is_playing;
        debug!(target: LOG_TARGET, "Play state reconciled: {}", is_playing);
        self.notify(&StoreEvent::PlayStateChanged { is_playing });
    }

    /// Empty the queue. Toggles are left as they are.
    pub fn clear_player_state(&mut self) {
        debug!(target: LOG_TARGET, "Clearing queue of {} episode(s)", self.episode_list.len());
        self.episode_list.clear();
        self.current_episode_index = 0;
        self.notify(&StoreEvent::QueueCleared);
    }

    // ---- subscriptions ----

    /// Register a listener called after every mutation
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreEvent, &Self) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, event: &StoreEvent) {
        // Listeners borrow the store immutably, so they are moved out for the call
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(event, self);
        }
        self.listeners = listeners;
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlaybackStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackStore")
            .field("episode_list", &self.episode_list)
            .field("current_episode_index", &self.current_episode_index)
            .field("is_playing", &self.is_playing)
            .field("is_looping", &self.is_looping)
            .field("is_shuffling", &self.is_shuffling)
            .field("subscribers", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
