//! Line-oriented document buffer with indentation.

use crate::config::ExportOptions;
use crate::markup::Element;

/// Accumulates document text one line at a time.
///
/// Every line is prefixed with the indent for the current depth. Element trees
/// are written one element per line when `format_xml` is set, compactly on a
/// single line otherwise.
pub struct DocumentWriter<'a> {
    options: &'a ExportOptions,
    indent: String,
    depth: usize,
    out: String,
}

impl<'a> DocumentWriter<'a> {
    pub fn new(options: &'a ExportOptions) -> Self {
        Self {
            options,
            indent: options.indent(),
            depth: 0,
            out: String::new(),
        }
    }

    pub fn options(&self) -> &'a ExportOptions {
        self.options
    }

    /// An empty writer at the same depth, for output that may be discarded.
    pub fn child(&self) -> DocumentWriter<'a> {
        DocumentWriter {
            options: self.options,
            indent: self.indent.clone(),
            depth: self.depth,
            out: String::new(),
        }
    }

    /// Append the text of a child writer.
    pub fn append(&mut self, child: DocumentWriter<'_>) {
        self.out.push_str(&child.out);
    }

    pub fn push_indent(&mut self) {
        self.depth += 1;
    }

    pub fn pop_indent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(&self.indent);
        }
        self.out.push_str(text);
        self.out.push_str(&self.options.newline);
    }

    pub fn lines(&mut self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            self.line(&line);
        }
    }

    pub fn element(&mut self, element: &Element) {
        if self.options.format_xml {
            element.write_pretty(&mut self.out, &self.indent, self.depth, &self.options.newline);
        } else {
            self.line(&element.to_xml());
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}
