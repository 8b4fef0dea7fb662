//! Virtual DOM for rendering state.
//!
//! A [`View`] renders state into a tree of [`Node`]s. Elements carry the
//! actions that user events on them dispatch, so the tree is both what the
//! user sees and the only way the user can talk to the reducer.
//!
//! ```
//! use todo_widget_core::view::{Element, Node};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Action {
//!     Clicked,
//! }
//!
//! let tree: Node<Action> = Element::new("button")
//!     .attr("type", "submit")
//!     .text("Add #1")
//!     .on_click(Action::Clicked)
//!     .into();
//!
//! assert_eq!(tree.to_html(), r#"<button type="submit">Add #1</button>"#);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Maps the new value of a form control to an action
pub type InputHandler<A> = Arc<dyn Fn(String) -> A + Send + Sync>;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Renders state into a node tree
pub trait View {
    /// The state this view reads
    type State;

    /// The action type dispatched by the rendered elements
    type Action;

    /// Render the state
    ///
    /// Must be deterministic: the same state always renders the same tree.
    fn render(&self, state: &Self::State) -> Node<Self::Action>;
}

/// A node in the rendered tree
pub enum Node<A> {
    /// An element with attributes, children and event handlers
    Element(Element<A>),
    /// A text node
    Text(String),
}

impl<A> Node<A> {
    /// Create a text node
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the element if this node is one
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element<A>> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all of its descendants
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(value) => out.push_str(value),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            },
        }
    }

    /// All elements in the tree, in document order
    #[must_use]
    pub fn elements(&self) -> Vec<&Element<A>> {
        let mut out = Vec::new();
        self.collect_elements(&mut out);
        out
    }

    fn collect_elements<'a>(&'a self, out: &mut Vec<&'a Element<A>>) {
        if let Self::Element(element) = self {
            out.push(element);
            for child in &element.children {
                child.collect_elements(out);
            }
        }
    }

    /// First element with the given `id` attribute
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<&Element<A>> {
        self.elements()
            .into_iter()
            .find(|element| element.attribute("id") == Some(id))
    }

    /// Serialize the tree to HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(value) => out.push_str(&escape(value)),
            Self::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            },
        }
    }
}

impl<A> From<Element<A>> for Node<A> {
    fn from(element: Element<A>) -> Self {
        Self::Element(element)
    }
}

impl<A: Clone> Clone for Node<A> {
    fn clone(&self) -> Self {
        match self {
            Self::Element(element) => Self::Element(element.clone()),
            Self::Text(value) => Self::Text(value.clone()),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Node<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => element.fmt(f),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
        }
    }
}

/// An element of the rendered tree
pub struct Element<A> {
    tag: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Node<A>>,
    on_click: Option<A>,
    on_input: Option<InputHandler<A>>,
}

impl<A> Element<A> {
    /// Create an element with the given tag name
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            on_click: None,
            on_input: None,
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set a boolean attribute (present with an empty value) when `on` is true
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>, on: bool) -> Self {
        if on {
            self.attributes.insert(name.into(), String::new());
        }
        self
    }

    /// Append a child node
    #[must_use]
    pub fn child(mut self, child: impl Into<Node<A>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append child nodes
    #[must_use]
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node<A>>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child
    #[must_use]
    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.children.push(Node::Text(value.into()));
        self
    }

    /// Dispatch `action` when this element is clicked
    #[must_use]
    pub fn on_click(mut self, action: A) -> Self {
        self.on_click = Some(action);
        self
    }

    /// Dispatch `handler(value)` whenever this control's value changes
    #[must_use]
    pub fn on_input<F>(mut self, handler: F) -> Self
    where
        F: Fn(String) -> A + Send + Sync + 'static,
    {
        self.on_input = Some(Arc::new(handler));
        self
    }

    /// Tag name
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value, if set
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the element carries the `disabled` flag
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.attributes.contains_key("disabled")
    }

    /// Child nodes
    #[must_use]
    pub fn child_nodes(&self) -> &[Node<A>] {
        &self.children
    }

    /// Text of the direct text children only
    #[must_use]
    pub fn own_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(value) => Some(value.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Concatenated text of all descendants
    #[must_use]
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// The action a click dispatches, if any
    #[must_use]
    pub const fn click_action(&self) -> Option<&A> {
        self.on_click.as_ref()
    }

    /// The action a change to `value` dispatches, if this is an input
    #[must_use]
    pub fn input_action(&self, value: String) -> Option<A> {
        self.on_input.as_ref().map(|handler| handler(value))
    }
}

impl<A: Clone> Clone for Element<A> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            children: self.children.clone(),
            on_click: self.on_click.clone(),
            on_input: self.on_input.clone(),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Element<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("children", &self.children)
            .field("on_click", &self.on_click)
            .field("on_input", &self.on_input.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
