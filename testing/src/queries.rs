//! Queries over a rendered tree, the way a user finds things on a page.
//!
//! `get_*` queries require exactly one match, `query_all_*` return every
//! match. Text is compared after collapsing whitespace, and text queries look
//! at an element's own text nodes so a wrapper never matches its children's
//! text.

use thiserror::Error;
use todo_widget_core::view::{Element, Node};

/// Errors returned by `get_*` queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Nothing matched
    #[error("Unable to find an element {query}")]
    NotFound {
        /// Human-readable description of the query
        query: String,
    },

    /// More than one element matched a query that expects exactly one
    #[error("Found {count} elements {query}")]
    Multiple {
        /// Human-readable description of the query
        query: String,
        /// Number of matches
        count: usize,
    },
}

/// Collapse runs of whitespace and trim the ends
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn single<'a, A>(query: String, matches: Vec<&'a Element<A>>) -> Result<&'a Element<A>, QueryError> {
    match matches.as_slice() {
        [] => Err(QueryError::NotFound { query }),
        [only] => Ok(*only),
        _ => Err(QueryError::Multiple {
            query,
            count: matches.len(),
        }),
    }
}

/// First element with the given tag, in document order
#[must_use]
pub fn query_selector<'a, A>(root: &'a Node<A>, tag: &str) -> Option<&'a Element<A>> {
    root.elements().into_iter().find(|element| element.tag() == tag)
}

/// Every element with the given tag, in document order
#[must_use]
pub fn query_selector_all<'a, A>(root: &'a Node<A>, tag: &str) -> Vec<&'a Element<A>> {
    root.elements()
        .into_iter()
        .filter(|element| element.tag() == tag)
        .collect()
}

/// Every element whose own text equals `text`
#[must_use]
pub fn query_all_by_text<'a, A>(root: &'a Node<A>, text: &str) -> Vec<&'a Element<A>> {
    let wanted = normalize(text);
    root.elements()
        .into_iter()
        .filter(|element| normalize(&element.own_text()) == wanted)
        .collect()
}

/// The single element whose own text equals `text`
///
/// # Errors
///
/// [`QueryError::NotFound`] or [`QueryError::Multiple`].
pub fn get_by_text<'a, A>(root: &'a Node<A>, text: &str) -> Result<&'a Element<A>, QueryError> {
    single(format!("with the text: {text}"), query_all_by_text(root, text))
}

/// Every form control labelled `label`
///
/// A control is labelled by a `label` element whose text matches, either
/// through the label's `for` attribute or by being nested inside it, or by
/// its own `aria-label` attribute.
#[must_use]
pub fn query_all_by_label_text<'a, A>(root: &'a Node<A>, label: &str) -> Vec<&'a Element<A>> {
    let wanted = normalize(label);
    let mut controls: Vec<&Element<A>> = Vec::new();

    for element in root.elements() {
        if element.tag() == "label" && normalize(&element.text_content()) == wanted {
            let control = match element.attribute("for") {
                Some(id) => root.element_by_id(id),
                None => element
                    .child_nodes()
                    .iter()
                    .flat_map(Node::elements)
                    .find(|candidate| is_labelable(candidate)),
            };
            if let Some(control) = control {
                controls.push(control);
            }
        } else if element.attribute("aria-label").is_some_and(|value| normalize(value) == wanted) {
            controls.push(element);
        }
    }

    controls
}

/// The single form control labelled `label`
///
/// # Errors
///
/// [`QueryError::NotFound`] or [`QueryError::Multiple`].
pub fn get_by_label_text<'a, A>(root: &'a Node<A>, label: &str) -> Result<&'a Element<A>, QueryError> {
    single(format!("by label with the text: {label}"), query_all_by_label_text(root, label))
}

/// Every element with the given role, optionally filtered by accessible name
///
/// The accessible name used here is the element's normalized text content.
#[must_use]
pub fn query_all_by_role<'a, A>(root: &'a Node<A>, role: &str, name: Option<&str>) -> Vec<&'a Element<A>> {
    let wanted = name.map(normalize);
    root.elements()
        .into_iter()
        .filter(|element| role_of(element) == Some(role))
        .filter(|element| {
            wanted
                .as_ref()
                .is_none_or(|wanted| normalize(&element.text_content()) == *wanted)
        })
        .collect()
}

/// The single element with the given role (and accessible name, if given)
///
/// # Errors
///
/// [`QueryError::NotFound`] or [`QueryError::Multiple`].
pub fn get_by_role<'a, A>(
    root: &'a Node<A>,
    role: &str,
    name: Option<&str>,
) -> Result<&'a Element<A>, QueryError> {
    let query = match name {
        Some(name) => format!("with the role \"{role}\" and name \"{name}\""),
        None => format!("with the role \"{role}\""),
    };
    single(query, query_all_by_role(root, role, name))
}

/// Explicit `role` attribute, or the implicit role of the tag
#[must_use]
pub fn role_of<A>(element: &Element<A>) -> Option<&str> {
    if let Some(role) = element.attribute("role") {
        return Some(role);
    }
    match element.tag() {
        "button" => Some("button"),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some("heading"),
        "ul" | "ol" => Some("list"),
        "li" => Some("listitem"),
        "form" => Some("form"),
        "textarea" => Some("textbox"),
        "input" => match element.attribute("type").unwrap_or("text") {
            "text" | "search" | "email" | "url" | "tel" => Some("textbox"),
            "checkbox" => Some("checkbox"),
            "submit" | "button" | "reset" => Some("button"),
            _ => None,
        },
        _ => None,
    }
}

fn is_labelable<A>(element: &Element<A>) -> bool {
    matches!(element.tag(), "input" | "textarea" | "select" | "button")
}
