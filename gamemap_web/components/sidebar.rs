use dioxus::prelude::*;
use rust_i18n::t;

use gamemap_app::marker_store::{SidebarOptions, SidebarRow, SidebarView};

#[component]
pub fn Sidebar(options: SidebarOptions, view: SidebarView, has_game: bool) -> Element {
    rsx! {
        aside { class: "sidebar",
            h2 { class: "sidebar-heading", "{t!(\"sidebar.heading\")}" }

            form { id: "sidebar-controls", method: "post", action: "/sidebar",
                input {
                    r#type: "text",
                    id: "filter-text",
                    name: "filter_text",
                    placeholder: "{t!(\"sidebar.filter\")}",
                    value: "{options.filter_text}"
                }
                label {
                    input {
                        r#type: "checkbox",
                        id: "sort-alpha",
                        name: "sort_alpha",
                        value: "on",
                        checked: options.sort_alphabetically
                    }
                    "{t!(\"sidebar.sort_alpha\")}"
                }
                label {
                    input {
                        r#type: "checkbox",
                        id: "group-type",
                        name: "group_type",
                        value: "on",
                        checked: options.group_by_type
                    }
                    "{t!(\"sidebar.group_type\")}"
                }
                noscript {
                    button { r#type: "submit", class: "btn-secondary", "{t!(\"sidebar.apply\")}" }
                }
            }

            div { id: "marker-list",
                if has_game {
                    MarkerList { view: view.clone() }
                }
            }
        }
    }
}

/// Rows of the sidebar, also served on its own when the controls change.
#[component]
pub fn MarkerList(view: SidebarView) -> Element {
    if view.is_empty() {
        return rsx! {
            p { class: "marker-list-empty", "{t!(\"sidebar.empty\")}" }
        };
    }

    rsx! {
        for section in view.sections {
            if let Some(header) = section.header {
                div { class: "marker-group",
                    h4 { class: "group-header", "{header}" }
                    for row in section.rows {
                        MarkerRow { key: "{row.marker_id}", row: row.clone() }
                    }
                }
            } else {
                for row in section.rows {
                    MarkerRow { key: "{row.marker_id}", row: row.clone() }
                }
            }
        }
    }
}

#[component]
fn MarkerRow(row: SidebarRow) -> Element {
    rsx! {
        div { class: "marker-item", "data-marker-id": "{row.marker_id}",
            form { method: "post", action: "/markers/{row.marker_id}/focus", class: "marker-info",
                button { r#type: "submit", class: "marker-focus",
                    h3 { "{row.title}" }
                    p { "{row.excerpt}" }
                }
            }
            form { method: "post", action: "/markers/{row.marker_id}/edit",
                button { r#type: "submit", class: "btn-secondary edit-btn", "{t!(\"sidebar.edit\")}" }
            }
        }
    }
}
