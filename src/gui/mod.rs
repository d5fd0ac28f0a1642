//! GUI module built on iced

pub mod app;
pub mod clipboard;
pub mod components;
pub mod theme;
pub mod views;

pub use app::TubefetchApp;
