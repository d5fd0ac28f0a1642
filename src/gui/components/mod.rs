//! Reusable GUI components

pub mod history_item;
pub mod progress_panel;
pub mod url_input;
pub mod video_card;

pub use history_item::history_item;
pub use progress_panel::progress_panel;
pub use url_input::url_input;
pub use video_card::video_card;
