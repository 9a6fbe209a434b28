//! View tree: elements, text, and the queries used to inspect them.
//!
//! A [`Node`] is either an [`Element`] with children or a run of text.
//! Elements carry a markup [`Tag`], utility classes, an optional inline
//! style, plain attributes, an optional list `key`, and an optional semantic
//! [`Role`]. Roles name the parts of the dashboard (tiles, bars, photos) so
//! callers can locate them without matching on class strings.
//!
//! The tree is serializable so the server can hand it to clients as JSON.

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;

use serde::{Deserialize, Serialize};

/// Markup tag of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Div,
    H1,
    H2,
    P,
    Span,
    Img,
}

impl Tag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::P => "p",
            Self::Span => "span",
            Self::Img => "img",
        }
    }

    /// Void elements have no children and no closing tag.
    #[must_use]
    pub fn is_void(self) -> bool {
        matches!(self, Self::Img)
    }
}

/// Semantic part of the dashboard an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Card,
    Header,
    Title,
    Banner,
    TileRow,
    MetricTile,
    TileLabel,
    TileDelta,
    TileValue,
    AnalysisRow,
    WastedFoodsPanel,
    WasteBar,
    BarFill,
    LossReasonsPanel,
    Chart,
    PhotoStream,
    Photo,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Header => "header",
            Self::Title => "title",
            Self::Banner => "banner",
            Self::TileRow => "tile-row",
            Self::MetricTile => "metric-tile",
            Self::TileLabel => "tile-label",
            Self::TileDelta => "tile-delta",
            Self::TileValue => "tile-value",
            Self::AnalysisRow => "analysis-row",
            Self::WastedFoodsPanel => "wasted-foods-panel",
            Self::WasteBar => "waste-bar",
            Self::BarFill => "bar-fill",
            Self::LossReasonsPanel => "loss-reasons-panel",
            Self::Chart => "chart",
            Self::PhotoStream => "photo-stream",
            Self::Photo => "photo",
        }
    }
}

/// One node of the view tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text { text: String },
}

/// An element with its presentation attributes and children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: Tag,
    /// Space-separated utility classes, as written into `class`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class: String,
    /// Inline CSS declarations. Rendered on `div` elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Remaining attributes in insertion order. Images render `src` and `alt`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    /// Identity of the element within a repeated list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

// =============================================================================
// BUILDERS
// =============================================================================

impl Element {
    #[must_use]
    pub fn new(tag: Tag) -> Self {
        Self { tag, class: String::new(), style: None, attrs: Vec::new(), key: None, role: None, children: Vec::new() }
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    #[must_use]
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_owned(), value.into()));
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.child(Node::text(text))
    }

    /// Value of a plain attribute, if present.
    #[must_use]
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    #[must_use]
    pub fn text(text: &str) -> Self {
        Node::Text { text: text.to_owned() }
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text { .. } => None,
        }
    }
}

// =============================================================================
// QUERIES
// =============================================================================

impl Node {
    /// All nodes in document order, starting with `self`.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Node::Element(el) = node {
                stack.extend(el.children.iter().rev());
            }
        }
        out
    }

    /// Concatenated text of this node and everything beneath it.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in self.descendants() {
            if let Node::Text { text } = node {
                out.push_str(text);
            }
        }
        out
    }

    /// Elements carrying `role`, in document order.
    #[must_use]
    pub fn elements_with_role(&self, role: Role) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter_map(Node::as_element)
            .filter(|el| el.role == Some(role))
            .collect()
    }

    #[must_use]
    pub fn count_role(&self, role: Role) -> usize {
        self.elements_with_role(role).len()
    }

    /// First element whose own text children read exactly `text`.
    #[must_use]
    pub fn find_text(&self, text: &str) -> Option<&Element> {
        self.descendants()
            .into_iter()
            .filter_map(Node::as_element)
            .find(|el| own_text(el).trim() == text)
    }
}

fn own_text(el: &Element) -> String {
    el.children
        .iter()
        .filter_map(|child| match child {
            Node::Text { text } => Some(text.as_str()),
            Node::Element(_) => None,
        })
        .collect()
}
