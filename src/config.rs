//! Export configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Options controlling how a scene is written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Embed image textures as base64 PNG data next to their path.
    pub inline_textures: bool,
    /// Directory used to resolve relative image paths when embedding.
    pub texture_root: Option<PathBuf>,
    /// Indent nested elements and column-align long attribute lists.
    pub format_xml: bool,
    /// Indent width, in `indent_char` units.
    pub tab_size: usize,
    /// Character repeated for each indent level.
    pub indent_char: char,
    /// Line terminator.
    pub newline: String,
    /// Keep author links into stripped output nodes, pointing at the reserved `output` node.
    pub connect_output: bool,
    /// Abort the export on the first object that fails instead of skipping it.
    pub strict: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            inline_textures: false,
            texture_root: None,
            format_xml: true,
            tab_size: 2,
            indent_char: ' ',
            newline: "\n".to_string(),
            connect_output: false,
            strict: false,
        }
    }
}

impl ExportOptions {
    /// Embed textures, resolving relative paths against `root` when given.
    pub fn with_inline_textures(mut self, root: Option<PathBuf>) -> Self {
        self.inline_textures = true;
        self.texture_root = root;
        self
    }

    /// Single-space separated output without indentation.
    pub fn compact(mut self) -> Self {
        self.format_xml = false;
        self
    }

    pub fn with_connect_output(mut self, connect_output: bool) -> Self {
        self.connect_output = connect_output;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The indentation prefix for one nesting level.
    pub fn indent(&self) -> String {
        if self.format_xml {
            std::iter::repeat(self.indent_char).take(self.tab_size).collect()
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_indent() {
        let options = ExportOptions::default();
        assert_eq!(options.indent(), "  ");
        assert!(!options.inline_textures);
        assert!(!options.connect_output);
    }

    #[test]
    fn test_compact_has_no_indent() {
        let options = ExportOptions::default().compact();
        assert_eq!(options.indent(), "");
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ExportOptions =
            serde_json::from_str(r#"{ "tab_size": 4, "indent_char": "\t" }"#).unwrap();
        assert_eq!(options.indent(), "\t\t\t\t");
        assert!(options.format_xml);
        assert_eq!(options.newline, "\n");
    }
}
