//! Tagged element tree and its serializer.
//!
//! The tree is only an intermediate form for building request documents; it
//! is never parsed back.

use std::borrow::Cow;

use quick_xml::escape::{escape, unescape as decode};

/// Indentation unit per depth level.
const INDENT: &str = "  ";

/// Element content: a scalar or nested elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlContent {
    Text(String),
    Children(Vec<XmlNode>),
}

/// One element with optional attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    content: XmlContent,
}

impl XmlNode {
    /// Creates a scalar element, e.g. `<amount>1234</amount>`.
    pub fn text(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: XmlContent::Text(value.to_string()),
        }
    }

    /// Creates an element wrapping child elements.
    pub fn element(name: impl Into<String>, children: Vec<XmlNode>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: XmlContent::Children(children),
        }
    }

    /// Adds an attribute rendered inside the opening tag.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    fn open_tag(&self) -> String {
        let mut tag = format!("<{}", self.name);
        for (key, value) in &self.attributes {
            tag.push_str(&format!(" {}=\"{}\"", key, escape(value)));
        }
        tag.push('>');
        tag
    }

    fn close_tag(&self) -> String {
        format!("</{}>", self.name)
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let padding = INDENT.repeat(depth + 1);
        match &self.content {
            XmlContent::Text(value) => {
                out.push_str(&padding);
                out.push_str(&self.open_tag());
                out.push_str(&escape(value));
                out.push_str(&self.close_tag());
                out.push('\n');
            }
            XmlContent::Children(children) => {
                out.push_str(&padding);
                out.push_str(&self.open_tag());
                out.push('\n');
                for child in children {
                    child.write_to(out, depth + 1);
                }
                out.push_str(&padding);
                out.push_str(&self.close_tag());
                out.push('\n');
            }
        }
    }
}

/// Serializes nodes in order, one element or tag per line.
///
/// Depth 0 is indented by one unit, matching elements that sit directly under
/// the document root.
pub fn serialize(nodes: &[XmlNode], depth: usize) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_to(&mut out, depth);
    }
    out
}

/// Wraps blocks in an XML declaration and a single root element.
pub fn document(root: &str, blocks: &[XmlNode]) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\n<{root}>\n{}</{root}>",
        serialize(blocks, 0)
    )
}

/// Decodes entity and character references in a text value.
///
/// Text with an unknown or malformed reference is returned unchanged.
pub fn unescape(value: &str) -> Cow<'_, str> {
    decode(value).unwrap_or(Cow::Borrowed(value))
}
