//! Analyzer settings.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Comment marker used by slicer metadata lines.
pub const COMMENT_MARKER: u8 = b';';

/// Options controlling how a G-code file is scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Treat lines with whitespace before the `;` as comments.
    ///
    /// Off by default: only lines whose first byte is `;` are inspected.
    pub allow_indented_comments: bool,
    /// Skip lines longer than this many bytes without inspecting them.
    pub max_line_bytes: Option<usize>,
}

impl AnalyzerSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_line_bytes == Some(0) {
            return Err(AnalysisError::InvalidSettings(
                "max_line_bytes must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Whether `line` (without its line terminator) should be inspected.
    pub(crate) fn is_comment_line(&self, line: &[u8]) -> bool {
        if let Some(max) = self.max_line_bytes {
            if line.len() > max {
                return false;
            }
        }
        if self.allow_indented_comments {
            line.iter()
                .find(|&&b| b != b' ' && b != b'\t')
                .is_some_and(|&b| b == COMMENT_MARKER)
        } else {
            line.first() == Some(&COMMENT_MARKER)
        }
    }
}
