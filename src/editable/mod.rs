//! Text editing core for single fields and small multi-line areas.
//!
//! # Architecture
//!
//! - [`TextBuffer`]: gap buffer holding the code units, with an optional
//!   password alias for display
//! - [`SelectionModel`]: at most one half-open selection `[start, end)`
//! - [`OperationLog`]: fixed-capacity ring of [`EditOperation`]s for undo/redo
//! - [`EditConstraints`]: character limit, password alias, size limits
//! - [`EditPipeline`]: the only path that mutates content; applies the
//!   constraints and validation, records undo steps, queues [`EditEvent`]s,
//!   and keeps the layout cache honest
//! - [`EditMsg`]: request messages for [`crate::update::update`]
//!
//! # Example
//!
//! ```
//! use token_textedit::editable::{EditEvent, EditPipeline};
//!
//! let mut pipeline: EditPipeline = EditPipeline::default();
//! pipeline.set_character_limit(Some(5));
//! pipeline.insert(0, "abcdefgh", true);
//!
//! assert_eq!(pipeline.text(), "abcde");
//! assert!(pipeline.take_events().contains(&EditEvent::TextFull));
//! ```

mod buffer;
mod constraints;
mod history;
mod messages;
mod pipeline;
mod selection;

// Re-export main types
pub use buffer::{TextBuffer, GAP_GROWTH};
pub use constraints::{EditConstraints, SizeLimit, Validator};
pub use history::{EditOperation, OperationLog, DEFAULT_MAX_EDIT_OPERATIONS, MIN_EDIT_OPERATIONS};
pub use messages::{EditEvent, EditMsg};
pub use pipeline::EditPipeline;
pub use selection::{Selection, SelectionModel};
