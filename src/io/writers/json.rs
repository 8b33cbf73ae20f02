use crate::core::Result;
use crate::io::output::Renderer;
use crate::target::FunctionTypeNode;
use serde_json;

/// Renders each node as a single-line JSON object (JSON Lines).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, node: &FunctionTypeNode) -> Result<String> {
        Ok(serde_json::to_string(node)?)
    }
}
