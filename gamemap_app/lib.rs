pub mod config;
pub mod events;
pub mod forms;
pub mod gateway;
pub mod generation;
pub mod map_renderer;
pub mod marker_store;
pub mod session;
pub mod state;
pub mod test_utils;
