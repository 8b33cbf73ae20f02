pub mod json;
pub mod terminal;
pub mod text;

pub use json::JsonRenderer;
pub use terminal::TerminalWriter;
pub use text::TextRenderer;
