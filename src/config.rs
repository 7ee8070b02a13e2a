//! Editor configuration persistence
//!
//! A YAML document describing how an [`EditPipeline`](crate::EditPipeline)
//! is set up: limits, password alias, undo depth, and text style. Every field
//! is optional; missing ones take the defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::editable::{EditConstraints, SizeLimit, DEFAULT_MAX_EDIT_OPERATIONS};
use crate::layout::{Alignment, TextStyle, PAGE_WIDTH_MAX};

/// Editing field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo ring capacity (n slots keep n - 1 undo steps)
    pub max_edit_operations: usize,
    pub character_limit: Option<usize>,
    /// Character displayed in place of every code unit (password fields)
    pub password_alias: Option<char>,
    pub limit_horizontal: bool,
    pub limit_vertical: bool,
    pub available_width: f32,
    pub visible_line_count: usize,
    pub font_size: f32,
    pub line_spacing: f32,
    pub tab_width: f32,
    pub alignment: Alignment,
    pub multiline: bool,
    pub line_wrap: bool,
    pub comb_text: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let style = TextStyle::default();
        Self {
            max_edit_operations: DEFAULT_MAX_EDIT_OPERATIONS,
            character_limit: None,
            password_alias: None,
            limit_horizontal: false,
            limit_vertical: false,
            available_width: PAGE_WIDTH_MAX,
            visible_line_count: style.visible_line_count,
            font_size: style.font_size,
            line_spacing: style.line_spacing,
            tab_width: style.tab_width,
            alignment: style.alignment,
            multiline: style.multiline,
            line_wrap: style.line_wrap,
            comb_text: false,
        }
    }
}

impl EditorConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse editor config")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize editor config")
    }

    /// Load config from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, or return defaults if missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = self.to_yaml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn constraints(&self) -> EditConstraints {
        EditConstraints {
            character_limit: self.character_limit,
            password_alias: self.password_alias,
            size_limit: SizeLimit {
                horizontal: self.limit_horizontal,
                vertical: self.limit_vertical,
            },
        }
    }

    /// Text style without comb cells; the pipeline derives those itself
    pub fn style(&self) -> TextStyle {
        TextStyle {
            font_size: self.font_size,
            line_spacing: self.line_spacing,
            tab_width: self.tab_width,
            alignment: self.alignment,
            multiline: self.multiline,
            line_wrap: self.line_wrap,
            available_width: self.available_width,
            visible_line_count: self.visible_line_count.max(1),
            comb_width: None,
        }
    }
}
