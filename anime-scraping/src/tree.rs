//! A minimal view of a document tree, so that extraction works both on
//! parsed HTML and on trees built by hand.

use std::marker::PhantomData;

use ego_tree::{iter::Children, NodeRef};
use scraper::Node;

pub trait DocNode<'a>: Copy + 'a {
    type Children: Iterator<Item = Self>;

    /// Direct children in document order.
    fn children(self) -> Self::Children;
    /// Tag name if this is an element.
    fn element_name(self) -> Option<&'a str>;
    fn attr(self, name: &str) -> Option<&'a str>;
    /// Contents if this is a text node.
    fn text_node(self) -> Option<&'a str>;

    fn is_element(self) -> bool {
        self.element_name().is_some()
    }

    fn is_named(self, name: &str) -> bool {
        self.element_name() == Some(name)
    }

    fn element_id(self) -> Option<&'a str> {
        self.attr("id")
    }

    fn has_class(self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    fn is_whitespace_text(self) -> bool {
        self.text_node().is_some_and(|text| text.trim().is_empty())
    }

    /// Pre-order traversal, not including `self`.
    fn descendants(self) -> Descendants<'a, Self> {
        Descendants {
            stack: vec![self.children()],
            _phantom: PhantomData,
        }
    }

    fn find_descendant(self, pred: impl FnMut(&Self) -> bool) -> Option<Self> {
        self.descendants().find(pred)
    }

    fn find_child(self, pred: impl FnMut(&Self) -> bool) -> Option<Self> {
        self.children().find(pred)
    }

    /// Concatenation of every text node in the subtree.
    fn text_content(self) -> String {
        match self.text_node() {
            Some(text) => text.to_owned(),
            None => self.descendants().filter_map(|n| n.text_node()).collect(),
        }
    }
}

pub struct Descendants<'a, N: DocNode<'a>> {
    stack: Vec<N::Children>,
    _phantom: PhantomData<&'a ()>,
}

impl<'a, N: DocNode<'a>> Iterator for Descendants<'a, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<'a> DocNode<'a> for NodeRef<'a, Node> {
    type Children = Children<'a, Node>;

    fn children(self) -> Self::Children {
        NodeRef::children(&self)
    }

    fn element_name(self) -> Option<&'a str> {
        self.value().as_element().map(|e| e.name())
    }

    fn attr(self, name: &str) -> Option<&'a str> {
        self.value().as_element().and_then(|e| e.attr(name))
    }

    fn text_node(self) -> Option<&'a str> {
        self.value().as_text().map(|text| &**text)
    }
}

/// Hand-built tree, mostly for exercising the parsers without HTML.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SyntheticNode {
    Element {
        name: String,
        attrs: Vec<(String, String)>,
        children: Vec<SyntheticNode>,
    },
    Text(String),
}

impl SyntheticNode {
    pub fn element(name: impl Into<String>, children: Vec<SyntheticNode>) -> Self {
        Self::Element {
            name: name.into(),
            attrs: vec![],
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// No-op on text nodes.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((key.into(), value.into()));
        }
        self
    }
}

impl<'a> DocNode<'a> for &'a SyntheticNode {
    type Children = std::slice::Iter<'a, SyntheticNode>;

    fn children(self) -> Self::Children {
        match self {
            SyntheticNode::Element { children, .. } => children.iter(),
            SyntheticNode::Text(_) => {
                let empty: &'a [SyntheticNode] = &[];
                empty.iter()
            }
        }
    }

    fn element_name(self) -> Option<&'a str> {
        match self {
            SyntheticNode::Element { name, .. } => Some(name.as_str()),
            SyntheticNode::Text(_) => None,
        }
    }

    fn attr(self, name: &str) -> Option<&'a str> {
        match self {
            SyntheticNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            SyntheticNode::Text(_) => None,
        }
    }

    fn text_node(self) -> Option<&'a str> {
        match self {
            SyntheticNode::Text(text) => Some(text.as_str()),
            SyntheticNode::Element { .. } => None,
        }
    }
}
