pub mod app;
pub mod editor;
pub mod input;
pub mod line_input;
pub mod list_view;
pub mod render;
pub mod theme;

pub use app::{TuiSettings, run};
