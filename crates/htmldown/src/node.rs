//! Tree model for parsed HTML documents.
//!
//! The emitter consumes this structure; any HTML parser can produce it.
//! A node is either an element (lowercase tag name, ordered attribute
//! map, owned children) or a text node holding raw character data.

use indexmap::IndexMap;

/// A node in the parsed HTML tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with a tag name, attributes, and ordered children.
    Element(Element),
    /// A text node holding raw character data, exactly as it appeared
    /// in the source (no pre-trimming).
    Text(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: IndexMap<String, String>,
    children: Vec<Node>,
}

impl Node {
    /// Create a new element node with no attributes.
    pub fn element(tag: &str) -> Self {
        Node::Element(Element {
            tag: tag.to_lowercase(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        })
    }

    /// Create a new element node with attributes.
    pub fn element_with_attrs(tag: &str, attrs: Vec<(&str, &str)>) -> Self {
        Node::Element(Element {
            tag: tag.to_lowercase(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect(),
            children: Vec::new(),
        })
    }

    /// Create a new text node.
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Check if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Append a child node. No-op on text nodes.
    pub fn add_child(&mut self, child: Node) {
        if let Node::Element(el) = self {
            el.children.push(child);
        }
    }

    /// Get all text content from this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.text_content(),
        }
    }
}

impl Element {
    /// The tag name (always lowercase).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value by name (case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Check if an attribute exists.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Child nodes, in document order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .map(Node::text_content)
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        if let Node::Element(el) = &node {
            assert_eq!(el.tag(), "div");
        }
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let node = Node::element_with_attrs(
            "a",
            vec![("HREF", "https://example.com"), ("title", "Example")],
        );
        let Node::Element(el) = &node else {
            panic!("expected element");
        };
        assert_eq!(el.attr("href"), Some("https://example.com"));
        assert_eq!(el.attr("title"), Some("Example"));
        assert_eq!(el.attr("class"), None);
        assert!(el.has_attr("href"));
    }

    #[test]
    fn test_children_in_order() {
        let mut parent = Node::element("div");
        parent.add_child(Node::text("Hello"));
        parent.add_child(Node::element("span"));
        parent.add_child(Node::text("World"));

        let Node::Element(el) = &parent else {
            panic!("expected element");
        };
        assert_eq!(el.children().count(), 3);
        assert_eq!(el.children().filter(|n| n.is_element()).count(), 1);
    }

    #[test]
    fn test_text_content() {
        let mut div = Node::element("div");
        div.add_child(Node::text("Hello "));
        let mut span = Node::element("span");
        span.add_child(Node::text("World"));
        div.add_child(span);

        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_add_child_to_text_is_noop() {
        let mut text = Node::text("plain");
        text.add_child(Node::element("b"));
        assert_eq!(text.text_content(), "plain");
    }
}
