use dioxus::prelude::*;
use rust_i18n::t;

use gamemap_app::{
    events::{ConfirmPrompt, Notice},
    forms::{GameForm, MarkerForm, MarkerFormMode},
};
use gamemap_types::marker::MarkerKind;

use crate::view_helpers::backend_asset_url;

#[component]
fn Modal(id: String, title: String, children: Element) -> Element {
    rsx! {
        div { id: "{id}", class: "modal",
            div { class: "modal-content",
                h2 { class: "modal-title", "{title}" }
                {children}
            }
        }
    }
}

#[component]
pub fn GameFormModal(form: GameForm) -> Element {
    rsx! {
        Modal { id: "add-game-modal", title: t!("game_form.title").to_string(),
            form { id: "add-game-form", method: "post", action: "/games",
                label { r#for: "game-name", "{t!(\"game_form.name\")}" }
                input { r#type: "text", id: "game-name", name: "name", value: "{form.fields.name}" }

                label { r#for: "game-map-path", "{t!(\"game_form.map_path\")}" }
                input {
                    r#type: "text",
                    id: "game-map-path",
                    name: "map_path",
                    placeholder: "dungeon.png",
                    value: "{form.fields.map_path}"
                }

                div { class: "modal-actions",
                    button { r#type: "submit", class: "btn-primary", "{t!(\"game_form.submit\")}" }
                    button {
                        r#type: "submit",
                        id: "cancel-game-btn",
                        class: "btn-secondary",
                        "formaction": "/games/form/cancel",
                        "formnovalidate": "true",
                        "{t!(\"game_form.cancel\")}"
                    }
                }
            }
        }
    }
}

/// Add/edit marker form. The hidden `id` field decides between create and
/// update on submit.
#[component]
pub fn MarkerFormModal(form: MarkerForm, backend_url: String) -> Element {
    let title = match form.mode() {
        MarkerFormMode::Add => t!("marker_form.add_title"),
        MarkerFormMode::Edit => t!("marker_form.edit_title"),
    }
    .to_string();
    let id = form.fields.id.map(|id| id.to_string()).unwrap_or_default();
    let selected_kind = form.fields.kind;
    let preview = form
        .preview
        .as_ref()
        .map(|preview| (backend_asset_url(&backend_url, &preview.path), preview.file_name.clone()));

    rsx! {
        Modal { id: "add-marker-modal", title: title.clone(),
            form {
                id: "add-marker-form",
                method: "post",
                action: "/markers",
                enctype: "multipart/form-data",

                input { r#type: "hidden", name: "id", value: "{id}" }
                input { r#type: "hidden", name: "lat", value: "{form.fields.lat}" }
                input { r#type: "hidden", name: "lng", value: "{form.fields.lng}" }

                label { r#for: "marker-title", "{t!(\"marker_form.title\")}" }
                input { r#type: "text", id: "marker-title", name: "title", value: "{form.fields.title}" }

                label { r#for: "marker-type", "{t!(\"marker_form.type\")}" }
                select { id: "marker-type", name: "type",
                    for kind in MarkerKind::ALL {
                        option { key: "{kind}", value: "{kind}", selected: kind == selected_kind,
                            "{kind}"
                        }
                    }
                }

                label { r#for: "marker-game-coords", "{t!(\"marker_form.game_coords\")}" }
                input {
                    r#type: "text",
                    id: "marker-game-coords",
                    name: "game_coords",
                    value: "{form.fields.game_coords}"
                }

                label { r#for: "marker-note", "{t!(\"marker_form.note\")}" }
                textarea { id: "marker-note", name: "note", "{form.fields.note}" }

                label { r#for: "marker-image", "{t!(\"marker_form.image\")}" }
                input { r#type: "file", id: "marker-image", name: "image_file", accept: "image/*" }

                div { id: "current-image-preview",
                    if let Some((href, file_name)) = preview {
                        "{t!(\"marker_form.current_image\")} "
                        a { href: "{href}", target: "_blank", "{file_name}" }
                    }
                }

                div { class: "modal-actions",
                    button { r#type: "submit", class: "btn-primary", "{t!(\"marker_form.save\")}" }
                    button {
                        r#type: "submit",
                        id: "cancel-marker-btn",
                        class: "btn-secondary",
                        "formaction": "/markers/form/cancel",
                        "formenctype": "application/x-www-form-urlencoded",
                        "formnovalidate": "true",
                        "{t!(\"marker_form.cancel\")}"
                    }
                }
            }
        }
    }
}

/// Asks before a destructive action runs.
#[component]
pub fn ConfirmDialog(prompt: ConfirmPrompt) -> Element {
    rsx! {
        div { id: "confirm-modal", class: "modal",
            div { class: "modal-content",
                p { class: "confirm-message", "{prompt.message}" }
                div { class: "modal-actions",
                    form { method: "post", action: "/confirm",
                        button { r#type: "submit", class: "btn-danger", "{t!(\"confirm.ok\")}" }
                    }
                    form { method: "post", action: "/confirm/cancel",
                        button { r#type: "submit", class: "btn-secondary", "{t!(\"confirm.cancel\")}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn InfoModal() -> Element {
    rsx! {
        Modal { id: "info-modal", title: t!("info.title").to_string(),
            ul { class: "info-list",
                li { "{t!(\"info.add_marker\")}" }
                li { "{t!(\"info.edit_marker\")}" }
                li { "{t!(\"info.sidebar\")}" }
            }
            form { method: "post", action: "/info/close",
                button { r#type: "submit", id: "close-info-modal-btn", class: "btn-secondary",
                    "{t!(\"info.close\")}"
                }
            }
        }
    }
}

/// One-shot alerts; `map.js` also raises them as browser alerts.
#[component]
pub fn NoticeList(notices: Vec<Notice>) -> Element {
    if notices.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { id: "notices", class: "notices", role: "alert",
            for notice in notices {
                p { class: "notice", "data-notice": "{notice.message}", "{notice.message}" }
            }
        }
    }
}
