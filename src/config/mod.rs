// Core configuration types
mod core;
mod loader;

pub use self::core::{CimportConfig, OutputConfig, ParseFailurePolicy, TranslateConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Template written by `cimport init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# cimport configuration

[translate]
# Force "c" or "cpp"; by default the dialect follows the file extension.
# dialect = "c"
max_pointer_depth = 64
# "empty" writes an empty output file when a header cannot be parsed,
# "error" aborts instead.
on_parse_failure = "empty"

[output]
# "text" or "json"
format = "text"
"#;
