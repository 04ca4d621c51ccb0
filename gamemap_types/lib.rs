pub mod errors;
pub mod game;
pub mod geometry;
pub mod marker;

pub use errors::Result;
