pub mod components;
pub mod handlers;
mod http;
mod view_helpers;

pub use http::*;
pub use view_helpers::{ViewerPage, backend_asset_url, browser_scene};

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");
