use crate::core::Result;
use crate::io::output::Renderer;
use crate::target::FunctionTypeNode;

/// Renders extern declarations such as `extern fun add(a: int, b: int) -> int`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, node: &FunctionTypeNode) -> Result<String> {
        let mut params: Vec<String> = node
            .annotated_parameters()
            .map(|(name, annotation)| format!("{name}: {annotation}"))
            .collect();
        if node.signature.is_variadic {
            params.push("...".to_string());
        }

        let keyword = if node.is_extern { "extern fun" } else { "fun" };
        Ok(format!(
            "{keyword} {}({}) -> {}",
            node.name(),
            params.join(", "),
            node.return_annotation
        ))
    }
}
