//! UI Components
//!
//! Components own presentation state only. They turn input into Actions
//! and the App applies those to the gallery and the services.

pub mod clip_details;
pub mod gallery;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod text;

pub use gallery::{draw_gallery_screen, GalleryComponent, GalleryRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
