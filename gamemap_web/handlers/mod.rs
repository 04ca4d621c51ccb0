mod game_handler;
mod helpers;
mod marker_handler;
mod page_handler;
mod settings_handler;
mod sidebar_handler;

pub use game_handler::{
    SelectGameForm, cancel_confirmation, cancel_game_form, confirm, create_game, delete_game,
    open_game_form, select_game,
};
pub(crate) use helpers::*;
pub use marker_handler::{
    MapClickForm, cancel_marker_form, map_click, marker_action, save_marker,
};
pub use page_handler::{scene, viewer};
pub use settings_handler::{ZoomForm, close_info, open_info, set_sidebar_zoom, toggle_settings};
pub use sidebar_handler::{SidebarQuery, sidebar_rows, update_sidebar};
