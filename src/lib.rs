//! Token text editing core
//!
//! A gap-buffer backed editing engine for text fields: limits and
//! validation on insert, a circular undo log, single selection, and a layout
//! cache that rebuilds lazily through a pluggable [`layout::TextLayout`].

pub mod config;
pub mod editable;
pub mod layout;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editable::{EditEvent, EditMsg, EditPipeline};
pub use layout::{FixedPitchLayout, TextLayout};
pub use update::update;
