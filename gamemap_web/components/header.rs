use dioxus::prelude::*;
use rust_i18n::t;

use crate::view_helpers::{GameOption, ViewerPage};

#[component]
pub fn Header(page: ViewerPage) -> Element {
    rsx! {
        header { class: "viewer-header",
            div { class: "brand", "{t!(\"viewer.title\")}" }

            GameSelect { games: page.games.clone(), has_game: page.has_game() }

            div { class: "header-actions",
                form { method: "post", action: "/games/form",
                    button { r#type: "submit", class: "btn-primary", id: "add-game-btn",
                        "{t!(\"viewer.add_game\")}"
                    }
                }
                form { method: "post", action: "/settings",
                    button {
                        r#type: "submit",
                        id: "settings-btn",
                        class: if page.settings_open { "btn-secondary active" } else { "btn-secondary" },
                        "{t!(\"viewer.settings\")}"
                    }
                }
                form { method: "post", action: "/info/open",
                    button { r#type: "submit", class: "btn-secondary", id: "info-modal-btn",
                        "{t!(\"viewer.info\")}"
                    }
                }
            }
        }

        if page.settings_open {
            SettingsPanel {
                sidebar_zoom: page.sidebar_zoom,
                zoom_levels: page.zoom_levels.clone()
            }
        }
    }
}

#[component]
fn GameSelect(games: Vec<GameOption>, has_game: bool) -> Element {
    rsx! {
        form { method: "post", action: "/games/select", class: "game-select",
            select { id: "game-select", name: "game_id", "data-autosubmit": "true",
                option { value: "", disabled: true, selected: !has_game,
                    "{t!(\"viewer.select_game\")}"
                }
                for game in games {
                    option { key: "{game.id}", value: "{game.id}", selected: game.selected,
                        "{game.name}"
                    }
                }
            }
            noscript {
                button { r#type: "submit", class: "btn-secondary", "{t!(\"viewer.load_game\")}" }
            }
        }
    }
}

/// Sidebar zoom selector and the delete-map action.
#[component]
fn SettingsPanel(sidebar_zoom: i8, zoom_levels: Vec<i8>) -> Element {
    let levels: Vec<(i8, String)> = zoom_levels
        .into_iter()
        .map(|level| {
            let label = t!("settings.zoom_level", level = level.to_string()).to_string();
            (level, label)
        })
        .collect();

    rsx! {
        section { id: "settings-section", class: "settings-panel",
            form { method: "post", action: "/settings/zoom",
                label { r#for: "sidebar-zoom-level", "{t!(\"settings.zoom\")}" }
                select { id: "sidebar-zoom-level", name: "zoom", "data-autosubmit": "true",
                    for (level, label) in levels {
                        option { key: "{level}", value: "{level}", selected: level == sidebar_zoom,
                            "{label}"
                        }
                    }
                }
                noscript {
                    button { r#type: "submit", class: "btn-secondary", "{t!(\"settings.save_zoom\")}" }
                }
            }
            form { method: "post", action: "/games/delete",
                button { r#type: "submit", id: "delete-map-btn", class: "btn-danger",
                    "{t!(\"settings.delete_map\")}"
                }
            }
        }
    }
}
