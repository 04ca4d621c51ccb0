use dioxus::prelude::*;

use crate::{
    components::{
        ConfirmDialog, GameFormModal, Header, InfoModal, MapView, MarkerFormModal, NoticeList,
        Sidebar,
    },
    view_helpers::ViewerPage,
};

/// Whole viewer body: header, sidebar and map, plus whichever modal is open.
#[component]
pub fn ViewerLayout(page: ViewerPage) -> Element {
    rsx! {
        Header { page: page.clone() }
        main { class: "viewer",
            Sidebar {
                options: page.sidebar.clone(),
                view: page.sidebar_view.clone(),
                has_game: page.has_game()
            }
            MapView { has_game: page.has_game() }
        }

        NoticeList { notices: page.notices.clone() }

        if page.game_form.open {
            GameFormModal { form: page.game_form.clone() }
        }
        if page.marker_form.open {
            MarkerFormModal {
                form: page.marker_form.clone(),
                backend_url: page.backend_url.clone()
            }
        }
        if let Some(prompt) = &page.confirm {
            ConfirmDialog { prompt: prompt.clone() }
        }
        if page.info_open {
            InfoModal {}
        }
    }
}

/// Generate the complete HTML document with Leaflet and the map script
pub fn wrap_in_html(body_content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
{body}
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="/static/map.js" type="application/javascript"></script>
</body>
</html>"#,
        title = t!("viewer.title"),
        body = body_content
    )
}
