use crate::state::{Catalog, PlayerController};
use dioxus::prelude::*;

/// All catalog episodes; clicking one queues the whole catalog from there.
#[component]
pub fn EpisodeList() -> Element {
    let Catalog(episodes) = use_context::<Catalog>();
    let controller = use_context::<PlayerController>();

    if episodes.is_empty() {
        return rsx! {
            section {
                class: "episode-list empty",
                h2 { "All episodes" }
                p { "No episodes yet. Point [catalog] episodes_path at a catalog file in the config." }
            }
        };
    }

    rsx! {
        section {
            class: "episode-list",
            h2 { "All episodes" }

            ul {
                for (index, episode) in episodes.iter().enumerate() {
                    {
                        let queue = episodes.clone();
                        rsx! {
                            li {
                                key: "{episode.id}-{index}",
                                img { src: "{episode.thumbnail}", alt: "" }
                                div {
                                    class: "episode-details",
                                    strong { "{episode.title}" }
                                    span { class: "members", "{episode.members}" }
                                    span { class: "duration", "{episode.duration_as_string}" }
                                }
                                button {
                                    r#type: "button",
                                    title: "Play episode",
                                    onclick: move |_| controller.play_list(queue.to_vec(), index),
                                    "\u{25B6}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
