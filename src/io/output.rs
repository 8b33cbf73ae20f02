use crate::core::Result;
use crate::target::FunctionTypeNode;
use crate::io::writers::{JsonRenderer, TextRenderer};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Target-language extern declarations
    #[default]
    Text,
    /// One JSON object per signature
    Json,
}

impl OutputFormat {
    /// File extension used for batch output.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "m",
            OutputFormat::Json => "jsonl",
        }
    }
}

/// Turns one analyzed function node into one line of output text.
pub trait Renderer: Send + Sync {
    fn render(&self, node: &FunctionTypeNode) -> Result<String>;
}

pub fn create_renderer(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Text.extension(), "m");
        assert_eq!(OutputFormat::Json.extension(), "jsonl");
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            format: OutputFormat,
        }
        let holder: Holder = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(holder.format, OutputFormat::Json);
    }
}
