//! Display tree
//!
//! A small element/text tree the renderer builds and a surface mounts.
//! Text nodes are always literal: serialization escapes them, and the
//! browser surface creates real text nodes, so task content can never be
//! read as markup.

use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Void elements never get a closing tag
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add `class` only when `on` is set
    pub fn class_if(self, on: bool, class: impl Into<String>) -> Self {
        if on {
            self.class(class)
        } else {
            self
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.push((name.into(), value.to_string()));
        self
    }

    /// Boolean attribute such as `checked`, present only when `on` is set
    pub fn flag(self, on: bool, name: impl Into<String>) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Every element in the subtree, depth first, that satisfies `pred`
    pub fn find_all<'a>(&'a self, pred: impl Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&pred, &mut found);
        found
    }

    fn walk<'a>(&'a self, pred: &impl Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Node::Element(e) = self {
            if pred(e) {
                found.push(e);
            }
            for child in &e.children {
                child.walk(pred, found);
            }
        }
    }

    /// Elements carrying `class`
    pub fn by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(|e| e.has_class(class))
    }

    /// Serialize to HTML with all text and attribute values escaped
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(e) => {
                let _ = write!(out, "<{}", e.tag);
                if !e.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape_html(&e.classes.join(" ")));
                }
                for (name, value) in &e.attrs {
                    if value.is_empty() {
                        let _ = write!(out, " {}", name);
                    } else {
                        let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }
}

impl Element {
    pub fn to_html(&self) -> String {
        Node::Element(self.clone()).to_html()
    }
}

/// Escape text so it is displayed literally inside HTML content or a
/// quoted attribute value
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain text"), "plain text");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_to_html() {
        let node: Node = Element::new("li")
            .class("todo-item")
            .class_if(true, "completed")
            .class_if(false, "hidden")
            .child(
                Element::new("input")
                    .attr("type", "checkbox")
                    .flag(true, "checked")
                    .attr("data-id", 7),
            )
            .child(Element::new("span").text("a < b"))
            .into();

        assert_eq!(
            node.to_html(),
            "<li class=\"todo-item completed\"><input type=\"checkbox\" checked data-id=\"7\">\
             <span>a &lt; b</span></li>"
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let html = Element::new("div").attr("title", "\"><script>").to_html();
        assert_eq!(html, "<div title=\"&quot;&gt;&lt;script&gt;\"></div>");
    }

    #[test]
    fn test_queries() {
        let node: Node = Element::new("ul")
            .children([
                Element::new("li").class("row").text("one"),
                Element::new("li").class("row").text("two"),
            ])
            .child(Element::new("p").text("!"))
            .into();

        assert_eq!(node.by_class("row").len(), 2);
        assert_eq!(node.text_content(), "onetwo!");
        assert_eq!(node.find_all(|e| e.tag == "p").len(), 1);
        assert!(node.as_element().is_some());
    }
}
