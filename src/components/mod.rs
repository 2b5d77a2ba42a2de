//! UI Components
//!
//! Leptos components for the three pages and their building blocks.

mod card_grid;
mod count_selector;
mod editor_page;
mod list_page;
mod note_list;
mod status_output;
mod viewer_page;

pub use card_grid::CardGrid;
pub use count_selector::CountSelector;
pub use editor_page::EditorPage;
pub use list_page::ListPage;
pub use note_list::NoteList;
pub use status_output::StatusOutput;
pub use viewer_page::ViewerPage;
