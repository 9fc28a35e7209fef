use crate::bridge::{AudioReport, WebviewAudio, AUDIO_BRIDGE_JS};
use dioxus::document::Eval;
use dioxus::prelude::*;
use podcastr_core::{Episode, PlaybackStore, PlayerConfig, PlayerView, PlayerViewModel};
use std::sync::Arc;
use tracing::{info, warn};

const LOG_TARGET: &str = "podcastr::state";

/// Episodes shown in the episode list, injected at launch
#[derive(Clone, Debug, Default)]
pub struct Catalog(pub Arc<Vec<Episode>>);

/// Handle to the player view shared by all components.
///
/// Every interaction goes through [`PlayerController::update`], which applies
/// the change, runs one draw cycle of the view and publishes the resulting
/// view model to the `model` signal.
#[derive(Clone, Copy)]
pub struct PlayerController {
    view: CopyValue<PlayerView<WebviewAudio>>,
    /// Last rendered frame of the player
    pub model: Signal<PlayerViewModel>,
    audio: Eval,
}

impl PlayerController {
    /// Create the playback store and mount the player view on the webview
    /// audio element. Must run inside a component.
    #[must_use]
    pub fn new(config: &PlayerConfig) -> Self {
        let audio = document::eval(AUDIO_BRIDGE_JS);
        let store = PlaybackStore::from_config(config).shared();
        let mut view = PlayerView::mount(store, WebviewAudio::new(audio));
        let model = Signal::new(view.render());

        Self {
            view: CopyValue::new(view),
            model,
            audio,
        }
    }

    /// Apply `change` to the view and publish the next frame
    pub fn update(mut self, change: impl FnOnce(&mut PlayerView<WebviewAudio>)) {
        let next = {
            let mut view = self.view.write();
            change(&mut *view);
            view.render()
        };

        if *self.model.peek() != next {
            self.model.set(next);
        }
    }

    /// Replace the queue with `episodes` and start at `index`
    pub fn play_list(self, episodes: Vec<Episode>, index: usize) {
        self.update(|view| {
            if let Err(e) = view.store().borrow_mut().play_list(episodes, index) {
                warn!(target: LOG_TARGET, "Ignoring play request: {}", e);
            }
        });
    }

    /// Forward audio element events to the view until the webview goes away
    pub async fn run_audio_bridge(self) {
        let mut audio = self.audio;
        info!(target: LOG_TARGET, "Audio bridge started");

        loop {
            match audio.recv::<AudioReport>().await {
                Ok(report) => self.update(|view| {
                    view.media_mut().observe(&report);
                    view.handle_media_event(report.kind.into());
                }),
                Err(e) => {
                    warn!(target: LOG_TARGET, "Audio bridge closed: {:?}", e);
                    break;
                }
            }
        }
    }
}
