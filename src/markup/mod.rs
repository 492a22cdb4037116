//! Markup element tree and its text form.
//!
//! [`Element`] is the structural primitive handed between the shader
//! translator and the document writer. Attributes keep insertion order so the
//! serialized text is stable.

mod chunked;

pub use chunked::write_chunked_attribute;

use std::fmt::Write;

/// A tagged, attributed, nestable markup element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set an attribute, replacing an existing value for the same key in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Direct children with the given tag.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Compact single-line serialization.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    fn write_compact(&self, out: &mut String) {
        self.write_open(out);
        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_compact(out);
        }
        write!(out, "</{}>", self.tag).unwrap();
    }

    /// Multi-line serialization, one element per line, children indented one
    /// `indent` deeper than their parent.
    pub fn write_pretty(&self, out: &mut String, indent: &str, depth: usize, newline: &str) {
        let prefix = indent.repeat(depth);
        out.push_str(&prefix);
        self.write_open(out);
        if self.children.is_empty() {
            out.push_str(" />");
            out.push_str(newline);
            return;
        }
        out.push('>');
        out.push_str(newline);
        for child in &self.children {
            child.write_pretty(out, indent, depth + 1, newline);
        }
        write!(out, "{}</{}>{}", prefix, self.tag, newline).unwrap();
    }

    fn write_open(&self, out: &mut String) {
        write!(out, "<{}", self.tag).unwrap();
        for (key, value) in &self.attributes {
            write!(out, " {}=\"{}\"", key, escape(value)).unwrap();
        }
    }
}

/// Escape a string for use inside a double-quoted attribute value.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_element() {
        let el = Element::new("color").with_attr("name", "Color_ab").with_attr("value", "1 0 0");
        assert_eq!(el.to_xml(), r#"<color name="Color_ab" value="1 0 0" />"#);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut el = Element::new("image_texture").with_attr("name", "a").with_attr("src", "x.png");
        el.set("name", "b");
        assert_eq!(el.attributes.len(), 2);
        assert_eq!(el.attributes[0], ("name".to_string(), "b".to_string()));
        assert_eq!(el.get("src"), Some("x.png"));
        assert_eq!(el.get("inline"), None);
    }

    #[test]
    fn test_nested_compact() {
        let mut shader = Element::new("shader").with_attr("name", "Mat");
        shader.push(Element::new("diffuse_bsdf").with_attr("name", "Diffuse"));
        shader.push(Element::new("connect").with_attr("from", "a b").with_attr("to", "c d"));
        assert_eq!(
            shader.to_xml(),
            r#"<shader name="Mat"><diffuse_bsdf name="Diffuse" /><connect from="a b" to="c d" /></shader>"#
        );
        assert_eq!(shader.find_all("connect").count(), 1);
    }

    #[test]
    fn test_pretty_indents_children() {
        let mut shader = Element::new("shader").with_attr("name", "Mat");
        shader.push(Element::new("emission").with_attr("name", "E"));
        let mut out = String::new();
        shader.write_pretty(&mut out, "  ", 1, "\n");
        assert_eq!(
            out,
            "  <shader name=\"Mat\">\n    <emission name=\"E\" />\n  </shader>\n"
        );
    }

    #[test]
    fn test_escape_attribute_values() {
        let el = Element::new("shader").with_attr("name", "Rock & \"Roll\" <1>");
        assert_eq!(
            el.to_xml(),
            r#"<shader name="Rock &amp; &quot;Roll&quot; &lt;1&gt;" />"#
        );
    }
}
