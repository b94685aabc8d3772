//! Model layer - gallery state and the types it is built from
//!
//! - `Clip` - one generated clip, read-only here
//! - `Phase` - which of the display modes applies
//! - `GalleryState` - clip collection, navigation cursor and hover
//! - `ToastQueue` - transient notifications
//! - `ModalStack` - overlay management

pub mod clip;
pub mod gallery;
pub mod modal;
pub mod phase;
pub mod time;
pub mod toast;
