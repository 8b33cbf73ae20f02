use serde::{Deserialize, Serialize};

use crate::inspector::{Dialect, MAX_DECLARATOR_NESTING};
use crate::io::output::OutputFormat;
use crate::translator::DEFAULT_MAX_POINTER_DEPTH;

/// What to do when an input file cannot be parsed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseFailurePolicy {
    /// Report a diagnostic, write an empty output and finish normally.
    #[default]
    Empty,
    /// Fail the run.
    Error,
}

/// Root configuration structure for cimport
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CimportConfig {
    /// Translation settings
    #[serde(default)]
    pub translate: Option<TranslateConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TranslateConfig {
    /// Force a dialect instead of guessing from the file extension
    #[serde(default)]
    pub dialect: Option<Dialect>,

    /// Pointer nesting beyond which a type is treated as unmappable
    #[serde(default)]
    pub max_pointer_depth: Option<usize>,

    #[serde(default)]
    pub on_parse_failure: Option<ParseFailurePolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl CimportConfig {
    pub fn dialect(&self) -> Option<Dialect> {
        self.translate.as_ref().and_then(|t| t.dialect)
    }

    pub fn max_pointer_depth(&self) -> usize {
        self.translate
            .as_ref()
            .and_then(|t| t.max_pointer_depth)
            .unwrap_or(DEFAULT_MAX_POINTER_DEPTH)
    }

    pub fn on_parse_failure(&self) -> ParseFailurePolicy {
        self.translate
            .as_ref()
            .and_then(|t| t.on_parse_failure)
            .unwrap_or_default()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    /// Check value ranges, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Some(depth) = self.translate.as_ref().and_then(|t| t.max_pointer_depth) {
            if depth == 0 {
                errors.push("translate.max_pointer_depth must be at least 1".to_string());
            }
            if depth > MAX_DECLARATOR_NESTING {
                errors.push(format!(
                    "translate.max_pointer_depth must be at most {MAX_DECLARATOR_NESTING}"
                ));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CimportConfig::default();
        assert_eq!(config.dialect(), None);
        assert_eq!(config.max_pointer_depth(), DEFAULT_MAX_POINTER_DEPTH);
        assert_eq!(config.on_parse_failure(), ParseFailurePolicy::Empty);
        assert_eq!(config.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_zero_depth_is_invalid() {
        let config = CimportConfig {
            translate: Some(TranslateConfig {
                max_pointer_depth: Some(0),
                ..Default::default()
            }),
            output: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_depth_beyond_declarator_nesting_is_invalid() {
        let config = CimportConfig {
            translate: Some(TranslateConfig {
                max_pointer_depth: Some(MAX_DECLARATOR_NESTING + 1),
                ..Default::default()
            }),
            output: None,
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at most"));
    }
}
