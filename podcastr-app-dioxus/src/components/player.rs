use crate::state::PlayerController;
use dioxus::prelude::*;
use podcastr_core::{PlayButton, PlayerView};

/// Share of the episode already played, in whole percent
fn played_percent(progress_secs: u64, duration_secs: u64) -> u64 {
    if duration_secs == 0 {
        return 0;
    }
    progress_secs.min(duration_secs) * 100 / duration_secs
}

/// Player panel: current episode, progress slider and transport buttons.
#[component]
pub fn Player(
    /// Color of the played part of the slider (e.g., "#04d361")
    track_color: String,
    /// Color of the remaining part of the slider (e.g., "#9f75ff")
    rail_color: String,
) -> Element {
    let controller = use_context::<PlayerController>();
    let model = controller.model.read().clone();
    let controls = model.controls;

    let percent = played_percent(model.progress_secs, model.duration_secs);
    let slider_style = format!(
        "background: linear-gradient(to right, {track_color} {percent}%, {rail_color} {percent}%);"
    );

    let current = match &model.episode {
        Some(card) => rsx! {
            div {
                class: "current-episode",
                img { src: "{card.thumbnail}", alt: "" }
                strong { "{card.title}" }
                span { "{card.members}" }
            }
        },
        None => rsx! {
            div {
                class: "empty-player",
                strong { "Select a podcast to listen to" }
            }
        },
    };

    let play_label = match model.play_button {
        PlayButton::Play => "\u{25B6}",
        PlayButton::Pause => "\u{23F8}",
    };

    rsx! {
        div {
            class: "player-container",

            header {
                strong { "Playing now" }
            }

            {current}

            footer {
                class: if model.episode.is_none() { "empty" } else { "" },

                div {
                    class: "progress",
                    span { "{model.progress_text}" }
                    div {
                        class: "slider",
                        input {
                            r#type: "range",
                            min: "0",
                            max: "{model.duration_secs}",
                            step: "1",
                            value: "{model.progress_secs}",
                            style: "{slider_style}",
                            disabled: !model.slider_enabled,
                            oninput: move |evt: FormEvent| {
                                if let Ok(secs) = evt.value().parse::<u64>() {
                                    controller.update(|view| view.seek(secs));
                                }
                            },
                        }
                    }
                    span { "{model.duration_text}" }
                }

                div {
                    class: "buttons",
                    button {
                        r#type: "button",
                        title: "Shuffle",
                        class: if controls.shuffle.active { "active" } else { "" },
                        disabled: !controls.shuffle.enabled,
                        onclick: move |_| controller.update(PlayerView::press_shuffle),
                        "\u{21C4}"
                    }
                    button {
                        r#type: "button",
                        title: "Play previous",
                        disabled: !controls.previous.enabled,
                        onclick: move |_| controller.update(PlayerView::press_previous),
                        "\u{23EE}"
                    }
                    button {
                        r#type: "button",
                        title: "Play / pause",
                        class: "play-button",
                        disabled: !controls.play_pause.enabled,
                        onclick: move |_| controller.update(PlayerView::press_play_pause),
                        "{play_label}"
                    }
                    button {
                        r#type: "button",
                        title: "Play next",
                        disabled: !controls.next.enabled,
                        onclick: move |_| controller.update(PlayerView::press_next),
                        "\u{23ED}"
                    }
                    button {
                        r#type: "button",
                        title: "Repeat",
                        class: if controls.repeat.active { "active" } else { "" },
                        disabled: !controls.repeat.enabled,
                        onclick: move |_| controller.update(PlayerView::press_loop),
                        "\u{21BB}"
                    }
                }
            }
        }
    }
}
