use dioxus::prelude::*;
use rust_i18n::t;

/// Container the browser map mounts into. The scene itself is fetched from
/// `/scene` by `map.js`; clicks with the modifier key post to `/markers/click`.
#[component]
pub fn MapView(has_game: bool) -> Element {
    let coords_label = t!("popup.coords", coords = "").to_string();

    rsx! {
        section { class: "map-container",
            div {
                id: "map",
                class: "map",
                "data-scene-url": "/scene",
                "data-has-game": "{has_game}",
                "data-label-coords": "{coords_label}",
                "data-label-edit": "{t!(\"popup.edit\")}",
                "data-label-delete": "{t!(\"popup.delete\")}",
            }

            if !has_game {
                p { class: "map-placeholder", "{t!(\"viewer.no_game\")}" }
            }

            form { id: "map-click-form", method: "post", action: "/markers/click", class: "hidden",
                input { r#type: "hidden", name: "lat" }
                input { r#type: "hidden", name: "lng" }
                input { r#type: "hidden", name: "modifier", value: "true" }
            }
        }
    }
}
