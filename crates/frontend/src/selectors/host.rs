//! The seam between the selector logic and the document it drives.
//!
//! Methods take `&self`: like the DOM itself, a host is a shared handle and
//! mutation goes through it. The browser implementation lives in
//! `crate::web::dom`; tests use an in-memory document.

use super::error::SelectorError;

/// How the host builds the synthetic `change` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStrategy {
    /// `new Event("change")`
    Constructor,
    /// `document.createEvent("Event")` followed by `initEvent("change", false, true)`
    Legacy,
}

/// Click handler registered on a rendered value node.
pub type ClickHandler<E> = Box<dyn FnMut(&E)>;

pub trait DomHost {
    type Node: Clone + PartialEq + std::fmt::Debug + 'static;
    type Event: Clone + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Element children of `node`, in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// First descendant of `node` carrying the class token `class`.
    fn first_with_class(&self, node: &Self::Node, class: &str) -> Option<Self::Node>;

    fn class_name(&self, node: &Self::Node) -> String;

    fn set_class_name(&self, node: &Self::Node, value: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Parse `html` and insert the result immediately before `node`.
    fn insert_html_before(&self, node: &Self::Node, html: &str) -> Result<(), SelectorError>;

    fn hide(&self, node: &Self::Node);

    fn set_value(&self, node: &Self::Node, value: &str);

    fn on_click(
        &self,
        node: &Self::Node,
        handler: ClickHandler<Self::Event>,
    ) -> Result<(), SelectorError>;

    /// Probed once at construction.
    fn event_strategy(&self) -> EventStrategy;

    fn dispatch_change(
        &self,
        node: &Self::Node,
        strategy: EventStrategy,
    ) -> Result<(), SelectorError>;

    /// Current query string including the leading `?`, or empty.
    fn location_search(&self) -> String;

    fn supports_history(&self) -> bool;

    /// Replace the query string without navigating.
    fn replace_search(&self, search: &str) -> Result<(), SelectorError>;
}
