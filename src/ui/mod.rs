//! UI-facing building blocks: control handles, notifications, navigation and
//! the list cache with its renderer.

pub mod controls;
pub mod list;

pub use controls::{Location, Navigator, Notifier, PageId, TextInput, Toggle};
pub use list::{ListCache, ListDisplay, ListView};
