use crate::components::{EpisodeList, Player};
use dioxus::prelude::*;
use podcastr_core::UiConfig;

/// Embedded stylesheet (compiled into the binary)
const PLAYER_CSS: &str = include_str!("../assets/player.css");

/// Root application component.
/// Renders the episode list next to the player panel.
#[component]
pub fn App() -> Element {
    let ui = use_context::<UiConfig>();

    rsx! {
        style { {PLAYER_CSS} }

        div {
            class: "app",

            EpisodeList {}

            Player {
                track_color: ui.track_color.clone(),
                rail_color: ui.rail_color.clone(),
            }
        }
    }
}
