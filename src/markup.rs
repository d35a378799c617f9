use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::binding::Binding;

const VOID_TAGS: &[&str] = &["input"];

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A markup element: tag, ordered attributes, children, and the binding the
/// host wires to user events.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: IndexMap<&'static str, String>,
    pub children: Vec<Node>,
    pub binding: Option<Binding>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: IndexMap::new(),
            children: Vec::new(),
            binding: None,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    /// Set `class`, leaving the attribute out when there is nothing to apply.
    pub fn class(self, class: impl Into<String>) -> Self {
        let class = class.into();
        if class.is_empty() { self } else { self.attr("class", class) }
    }

    /// Boolean attribute such as `checked` or `selected`.
    pub fn flag(self, name: &'static str, enabled: bool) -> Self {
        if enabled { self.attr(name, "") } else { self }
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn bind(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|item| item == class))
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// This element and every descendant element, in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(current.children.iter().rev().filter_map(|node| match node {
                Node::Element(element) => Some(element),
                Node::Text(_) => None,
            }));
        }
        out
    }

    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|element| element.tag == tag)
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for node in &element.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag);
    for (name, value) in &element.attrs {
        if value.is_empty() && matches!(*name, "checked" | "selected") {
            let _ = write!(out, " {name}");
        } else {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
    }
    out.push('>');
    if VOID_TAGS.contains(&element.tag) {
        return;
    }
    for node in &element.children {
        match node {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element(child) => write_element(child, out),
        }
    }
    let _ = write!(out, "</{}>", element.tag);
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_markup_with_escaping() {
        let element = Element::new("div")
            .class("form-group")
            .child(Element::new("label").attr("for", "q").text("Q & A"))
            .child(
                Element::new("input")
                    .attr("name", "q")
                    .attr("value", "\"hi\"")
                    .flag("checked", true),
            );
        assert_eq!(
            element.to_html(),
            "<div class=\"form-group\"><label for=\"q\">Q &amp; A</label>\
             <input name=\"q\" value=\"&quot;hi&quot;\" checked></div>"
        );
    }

    #[test]
    fn empty_class_is_omitted() {
        let element = Element::new("div").class("");
        assert!(!element.has_attr("class"));
        assert_eq!(element.to_html(), "<div></div>");
    }

    #[test]
    fn finds_descendants_by_tag() {
        let element = Element::new("div")
            .child(Element::new("label").child(Element::new("input")))
            .child(Element::new("input"));
        assert_eq!(element.find_all("input").len(), 2);
        assert!(element.find_all("select").is_empty());
    }

    #[test]
    fn descendants_follow_document_order() {
        let element = Element::new("div")
            .child(
                Element::new("label")
                    .child(Element::new("input").attr("name", "first"))
                    .text("First"),
            )
            .child(Element::new("input").attr("name", "second"));
        let names = element
            .find_all("input")
            .iter()
            .filter_map(|input| input.get_attr("name"))
            .collect::<Vec<_>>();
        assert_eq!(names, ["first", "second"]);
        let tags = element
            .descendants()
            .iter()
            .map(|element| element.tag)
            .collect::<Vec<_>>();
        assert_eq!(tags, ["div", "label", "input", "input"]);
    }
}
