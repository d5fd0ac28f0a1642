//! Application views

pub mod history_view;
pub mod main_view;
pub mod settings_view;

pub use history_view::history_view;
pub use main_view::main_view;
pub use settings_view::settings_view;
