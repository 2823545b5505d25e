//! The `--customize` YAML file.
//!
//! ```yaml
//! block_start_string: "<%"
//! block_end_string: "%>"
//! variable_start_string: "<<"
//! variable_end_string: ">>"
//! trim_blocks: true
//! ```
//!
//! Every key is optional. Unset delimiters keep their Jinja defaults; unset
//! flags keep the engine defaults (trailing newline kept, no trimming).
//! Unknown keys are an error, so a typo never silently does nothing.

use std::path::Path;

use minijinja::syntax::SyntaxConfig;
use serde::Deserialize;

use crate::error::RenderError;

/// Engine tweaks read from a customization file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Customization {
    pub block_start_string: Option<String>,
    pub block_end_string: Option<String>,
    pub variable_start_string: Option<String>,
    pub variable_end_string: Option<String>,
    pub comment_start_string: Option<String>,
    pub comment_end_string: Option<String>,
    pub trim_blocks: Option<bool>,
    pub lstrip_blocks: Option<bool>,
    pub keep_trailing_newline: Option<bool>,
}

impl Customization {
    /// Read and parse a customization file.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let text = std::fs::read_to_string(path).map_err(|e| RenderError::customize(path, e))?;
        let customization = Self::from_yaml(&text).map_err(|e| RenderError::customize(path, e))?;
        customization
            .syntax()
            .map_err(|e| RenderError::customize(path, e))?;
        tracing::debug!(path = %path.display(), "loaded customization file");
        Ok(customization)
    }

    /// Parse customization YAML. An empty document means no changes.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    fn has_delimiters(&self) -> bool {
        [
            &self.block_start_string,
            &self.block_end_string,
            &self.variable_start_string,
            &self.variable_end_string,
            &self.comment_start_string,
            &self.comment_end_string,
        ]
        .iter()
        .any(|d| d.is_some())
    }

    /// The syntax these delimiters describe, or `None` for the defaults.
    pub(crate) fn syntax(&self) -> Result<Option<SyntaxConfig>, minijinja::Error> {
        if !self.has_delimiters() {
            return Ok(None);
        }
        let pick = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };
        SyntaxConfig::builder()
            .block_delimiters(
                pick(&self.block_start_string, "{%"),
                pick(&self.block_end_string, "%}"),
            )
            .variable_delimiters(
                pick(&self.variable_start_string, "{{"),
                pick(&self.variable_end_string, "}}"),
            )
            .comment_delimiters(
                pick(&self.comment_start_string, "{#"),
                pick(&self.comment_end_string, "#}"),
            )
            .build()
            .map(Some)
    }
}
