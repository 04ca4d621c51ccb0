pub mod header;
pub mod layout;
pub mod map;
pub mod modals;
pub mod sidebar;

pub use header::Header;
pub use layout::{ViewerLayout, wrap_in_html};
pub use map::MapView;
pub use modals::{ConfirmDialog, GameFormModal, InfoModal, MarkerFormModal, NoticeList};
pub use sidebar::{MarkerList, Sidebar};
