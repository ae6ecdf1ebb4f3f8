//! In-memory document model.
//!
//! A `Document` is an arena of `Element`s addressed by `ElementId`. Every
//! lookup returns an `Option` (or an empty list) so callers must handle the
//! element being absent from the page. Scroll requests are recorded in a
//! viewport history instead of moving anything on screen.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Elements that never carry content or a closing tag when serialized.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Handle to an element stored in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A single element node: tag, identity, classes, inline style, attributes and text.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    /// Create a detached element with the given tag name (stored lowercase).
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text_content(&self) -> &str {
        &self.text
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if it is not already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Replace the whole class list with the whitespace-separated names in `class_name`.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes.clear();
        for class in class_name.split_whitespace() {
            self.add_class(class);
        }
    }

    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        self.style.insert(property.to_string(), value.to_string());
    }

    /// Read an attribute. `id` and `class` are answered from the element's identity fields.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" => (!self.classes.is_empty()).then(|| self.class_name()),
            _ => self.attributes.get(name).cloned(),
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => self.set_class_name(value),
            _ => {
                self.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Where the page was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub hostname: String,
    /// Current fragment, including the leading `#`, or empty.
    pub hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// A recorded `scroll_into_view` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: ElementId,
    pub options: ScrollIntoViewOptions,
}

/// Parsed form of the selectors the page script uses.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Id(String),
    Class(String),
    Tag(String),
    TagWithAttr {
        tag: String,
        name: String,
        value: String,
    },
}

impl Selector {
    /// Parse `#id`, `.class`, `tag` or `tag[name="value"]`. Anything else yields `None`.
    fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return is_name(id).then(|| Selector::Id(id.to_string()));
        }
        if let Some(class) = selector.strip_prefix('.') {
            return is_name(class).then(|| Selector::Class(class.to_string()));
        }
        if let Some((tag, rest)) = selector.split_once('[') {
            let inner = rest.strip_suffix(']')?;
            let (name, value) = inner.split_once('=')?;
            let value = value
                .trim()
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| {
                    value
                        .trim()
                        .strip_prefix('\'')
                        .and_then(|v| v.strip_suffix('\''))
                })?;
            if !is_name(tag) || !is_name(name.trim()) {
                return None;
            }
            return Some(Selector::TagWithAttr {
                tag: tag.to_ascii_lowercase(),
                name: name.trim().to_string(),
                value: value.to_string(),
            });
        }
        is_name(selector).then(|| Selector::Tag(selector.to_ascii_lowercase()))
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id() == Some(id.as_str()),
            Selector::Class(class) => element.has_class(class),
            Selector::Tag(tag) => element.tag() == tag,
            Selector::TagWithAttr { tag, name, value } => {
                element.tag() == tag && element.attribute(name).as_deref() == Some(value.as_str())
            }
        }
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The page: element arena rooted at `<html>` with `<head>` and `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
    location: Location,
    scrolls: Vec<ScrollRequest>,
}

impl Document {
    /// Create an empty document served from `hostname`.
    pub fn new(hostname: &str) -> Self {
        let mut document = Self {
            elements: vec![Element::new("html")],
            root: ElementId(0),
            head: ElementId(0),
            body: ElementId(0),
            location: Location {
                hostname: hostname.to_string(),
                hash: String::new(),
            },
            scrolls: Vec::new(),
        };
        document.head = document.append(document.root, Element::new("head"));
        document.body = document.append(document.root, Element::new("body"));
        document
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn head(&self) -> ElementId {
        self.head
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn set_hash(&mut self, hash: &str) {
        self.location.hash = hash.to_string();
    }

    /// Store `element` as the last child of `parent` and return its handle.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        self.elements.push(element);
        if let Some(parent) = self.elements.get_mut(parent.0) {
            parent.children.push(id);
        }
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn parent_element(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?.parent()
    }

    /// Replace an element's content with plain text, detaching its children.
    pub fn set_text_content(&mut self, id: ElementId, text: &str) {
        let Some(element) = self.elements.get_mut(id.0) else {
            return;
        };
        element.text = text.to_string();
        let children = std::mem::take(&mut element.children);
        for child in children {
            if let Some(child) = self.elements.get_mut(child.0) {
                child.parent = None;
            }
        }
    }

    /// Elements reachable from the root, in document order.
    fn attached(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.elements.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(element) = self.element(id) {
                stack.extend(element.children.iter().rev().copied());
            }
        }
        order
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.query_selector_all(&format!("#{id}")).into_iter().next()
    }

    pub fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// All attached elements matching `selector`, in document order.
    /// Unsupported or malformed selectors match nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.attached()
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(|e| selector.matches(e)))
            .collect()
    }

    /// Content of `<meta name="...">`, if such a tag is present.
    pub fn meta_content(&self, name: &str) -> Option<String> {
        let id = self.query_selector(&format!("meta[name=\"{name}\"]"))?;
        Some(self.element(id)?.attribute("content").unwrap_or_default())
    }

    pub fn scroll_into_view(&mut self, target: ElementId, options: ScrollIntoViewOptions) {
        if self.element(target).is_some() {
            self.scrolls.push(ScrollRequest { target, options });
        }
    }

    pub fn scroll_history(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    /// Serialize an element and its subtree.
    pub fn outer_html(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.write_element(&mut out, id);
        out
    }

    /// Serialize only the content of an element.
    pub fn inner_html(&self, id: ElementId) -> String {
        let mut out = String::new();
        if let Some(element) = self.element(id) {
            self.write_content(&mut out, element);
        }
        out
    }

    fn write_element(&self, out: &mut String, id: ElementId) {
        let Some(element) = self.element(id) else {
            return;
        };
        out.push('<');
        out.push_str(&element.tag);
        if let Some(id) = &element.id {
            let _ = write!(out, " id=\"{}\"", encode_double_quoted_attribute(id));
        }
        if !element.classes.is_empty() {
            let class_name = element.class_name();
            let _ = write!(out, " class=\"{}\"", encode_double_quoted_attribute(&class_name));
        }
        for (name, value) in &element.attributes {
            let _ = write!(out, " {}=\"{}\"", name, encode_double_quoted_attribute(value));
        }
        if !element.style.is_empty() {
            let style = element
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", encode_double_quoted_attribute(&style));
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            return;
        }
        self.write_content(out, element);
        let _ = write!(out, "</{}>", element.tag);
    }

    fn write_content(&self, out: &mut String, element: &Element) {
        out.push_str(&encode_text(&element.text));
        for child in &element.children {
            self.write_element(out, *child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new("dev.example.com");
        let body = doc.body();
        let nav = doc.append(body, Element::new("nav"));
        let link = doc.append(
            nav,
            Element::new("a")
                .with_class("nav-link")
                .with_attr("href", "#overview"),
        );
        let section = doc.append(body, Element::new("section").with_id("overview"));
        (doc, link, section)
    }

    #[test]
    fn test_lookup_by_id_class_and_tag() {
        let (doc, link, section) = sample();
        assert_eq!(doc.get_element_by_id("overview"), Some(section));
        assert_eq!(doc.query_selector_all(".nav-link"), vec![link]);
        assert_eq!(doc.query_selector("section"), Some(section));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn test_malformed_selector_matches_nothing() {
        let (doc, _, _) = sample();
        assert!(doc.query_selector("#").is_none());
        assert!(doc.query_selector("").is_none());
        assert!(doc.query_selector("div > span").is_none());
        assert!(doc.query_selector("https://example.com").is_none());
    }

    #[test]
    fn test_meta_content() {
        let (mut doc, _, _) = sample();
        assert_eq!(doc.meta_content("environment"), None);
        let head = doc.head();
        doc.append(
            head,
            Element::new("meta")
                .with_attr("name", "environment")
                .with_attr("content", "stage"),
        );
        assert_eq!(doc.meta_content("environment").as_deref(), Some("stage"));
    }

    #[test]
    fn test_set_text_detaches_children() {
        let (mut doc, link, _) = sample();
        let nav = doc.parent_element(link).unwrap();
        doc.set_text_content(nav, "gone");
        assert!(doc.query_selector(".nav-link").is_none());
        assert_eq!(doc.parent_element(link), None);
    }

    #[test]
    fn test_class_list_operations() {
        let mut element = Element::new("a").with_class("nav-link");
        element.add_class("active");
        element.add_class("active");
        assert_eq!(element.class_name(), "nav-link active");
        element.remove_class("active");
        assert!(!element.has_class("active"));
        element.set_class_name("status-healthy  extra");
        assert_eq!(element.classes(), ["status-healthy", "extra"]);
    }

    #[test]
    fn test_outer_html_escapes_and_orders() {
        let mut doc = Document::new("localhost");
        let body = doc.body();
        let span = doc.append(body, Element::new("span").with_id("x").with_text("a < b & c"));
        doc.element_mut(span).unwrap().set_style("opacity", "0");
        let head = doc.head();
        doc.append(head, Element::new("meta").with_attr("name", "environment"));
        assert_eq!(
            doc.outer_html(span),
            r#"<span id="x" style="opacity: 0">a &lt; b &amp; c</span>"#
        );
        assert_eq!(doc.inner_html(head), r#"<meta name="environment">"#);
    }

    #[test]
    fn test_outer_html_escapes_quotes_in_attributes() {
        let mut doc = Document::new("localhost");
        let head = doc.head();
        let meta = doc.append(
            head,
            Element::new("meta")
                .with_attr("content", r#"qa" onload="x"#)
                .with_attr("name", "environment"),
        );
        let html = doc.outer_html(meta);
        assert!(html.starts_with(r#"<meta content="qa&quot; onload=&quot;x" "#), "{html}");
        assert!(!html.contains(r#"" onload=""#));
    }

    #[test]
    fn test_scroll_history_ignores_unknown_targets() {
        let (mut doc, _, section) = sample();
        let options = ScrollIntoViewOptions {
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        };
        doc.scroll_into_view(section, options);
        doc.scroll_into_view(ElementId(999), options);
        assert_eq!(
            doc.scroll_history(),
            &[ScrollRequest {
                target: section,
                options
            }]
        );
    }
}
