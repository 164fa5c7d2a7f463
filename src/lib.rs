pub mod api;
pub mod config;
pub mod error_handling;
pub mod format;
pub mod interactive;
pub mod models;
pub mod render;
pub mod session;
pub mod theme;
pub mod ui;

pub use format::number_to_kilo;
pub use models::*;
