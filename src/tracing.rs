//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! buffer, selection, and undo state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=token_textedit::editable=trace` - module-level filtering
//! - `RUST_LOG=token_textedit::update=trace` - per-message state diffs
//!
//! # Log Files
//!
//! When a log directory is given, logs are also written to `textedit.log`
//! inside it with daily rotation. File logging uses debug level.

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::EditPipeline;
use crate::layout::TextLayout;

/// Initialize tracing subscriber with console and optional file logging
///
/// Console output respects RUST_LOG (default `warn`). Does nothing if a
/// global subscriber is already installed.
pub fn init(log_dir: Option<&Path>) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = log_dir.and_then(|dir| match std::fs::create_dir_all(dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(dir, "textedit.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    });

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of pipeline state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub len: usize,
    pub gap_position: usize,
    pub gap_size: usize,
    pub selection: Option<(usize, usize)>,
    pub undo_cursor: usize,
    pub insert_cursor: usize,
    pub layout_dirty: bool,
}

impl EditorSnapshot {
    pub fn from_pipeline<L: TextLayout>(pipeline: &EditPipeline<L>) -> Self {
        let buffer = pipeline.buffer();
        let history = pipeline.history();
        Self {
            len: buffer.len(),
            gap_position: buffer.gap_position(),
            gap_size: buffer.gap_size(),
            selection: pipeline.selection().map(|sel| (sel.start, sel.end)),
            undo_cursor: history.undo_cursor(),
            insert_cursor: history.insert_cursor(),
            layout_dirty: pipeline.is_layout_dirty(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &EditorSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.len != other.len {
            changes.push(format!("len: {} → {}", self.len, other.len));
        }
        if self.gap_position != other.gap_position || self.gap_size != other.gap_size {
            changes.push(format!(
                "gap: {}+{} → {}+{}",
                self.gap_position, self.gap_size, other.gap_position, other.gap_size
            ));
        }
        if self.selection != other.selection {
            let describe = |sel: Option<(usize, usize)>| match sel {
                Some((start, end)) => format!("[{}, {})", start, end),
                None => "none".to_string(),
            };
            changes.push(format!(
                "selection: {} → {}",
                describe(self.selection),
                describe(other.selection)
            ));
        }
        if self.undo_cursor != other.undo_cursor || self.insert_cursor != other.insert_cursor {
            changes.push(format!(
                "log: undo {} insert {} → undo {} insert {}",
                self.undo_cursor, self.insert_cursor, other.undo_cursor, other.insert_cursor
            ));
        }
        if self.layout_dirty != other.layout_dirty {
            let status = if other.layout_dirty { "dirty" } else { "clean" };
            changes.push(format!("layout {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
