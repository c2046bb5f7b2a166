pub mod console;
pub mod export;
pub mod format;
pub mod match_view;
pub mod menu;
pub mod standings_view;
pub mod team_view;

pub use console::Console;
pub use export::{render, ExportFormat};
