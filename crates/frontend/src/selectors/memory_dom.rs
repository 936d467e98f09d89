//! In-memory document for exercising the selectors without a browser.
//!
//! Inserted markup is parsed with quick-xml, so templates used in tests must
//! be well-formed XML fragments. Dispatched events and URL writes are recorded
//! for assertions.

use super::error::SelectorError;
use super::host::{ClickHandler, DomHost, EventStrategy};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub target: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub target: NodeId,
    pub strategy: EventStrategy,
}

#[derive(Debug, Default)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    value: String,
    hidden: bool,
}

type SharedHandler = Rc<RefCell<ClickHandler<ClickEvent>>>;

struct Inner {
    nodes: Vec<Element>,
    search: String,
    history_supported: bool,
    strategy: EventStrategy,
    dispatched: Vec<Dispatched>,
    url_writes: Vec<String>,
    listeners: HashMap<NodeId, Vec<SharedHandler>>,
}

#[derive(Clone)]
pub struct MemoryDom {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryDom {
    /// A body holding a single `<select id="{control_id}">`.
    pub fn with_control(control_id: &str) -> Self {
        let body = Element {
            tag: "body".into(),
            ..Default::default()
        };
        let select = Element {
            tag: "select".into(),
            attributes: vec![("id".into(), control_id.into())],
            parent: Some(NodeId(0)),
            ..Default::default()
        };
        let mut nodes = vec![body, select];
        nodes[0].children.push(NodeId(1));
        Self {
            inner: Rc::new(RefCell::new(Inner {
                nodes,
                search: String::new(),
                history_supported: true,
                strategy: EventStrategy::Constructor,
                dispatched: Vec::new(),
                url_writes: Vec::new(),
                listeners: HashMap::new(),
            })),
        }
    }

    pub fn with_search(self, search: &str) -> Self {
        self.inner.borrow_mut().search = search.to_string();
        self
    }

    pub fn without_history(self) -> Self {
        self.inner.borrow_mut().history_supported = false;
        self
    }

    pub fn with_legacy_events(self) -> Self {
        self.inner.borrow_mut().strategy = EventStrategy::Legacy;
        self
    }

    /// Run the click handlers registered on `node`.
    pub fn click(&self, node: NodeId) {
        let handlers = self
            .inner
            .borrow()
            .listeners
            .get(&node)
            .cloned()
            .unwrap_or_default();
        let event = ClickEvent { target: node };
        for handler in handlers {
            let mut handler = handler.borrow_mut();
            (&mut *handler)(&event);
        }
    }

    pub fn value(&self, node: NodeId) -> String {
        self.inner.borrow().nodes[node.0].value.clone()
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.inner.borrow().nodes[node.0].hidden
    }

    pub fn dispatched(&self) -> Vec<Dispatched> {
        self.inner.borrow().dispatched.clone()
    }

    pub fn url_writes(&self) -> Vec<String> {
        self.inner.borrow().url_writes.clone()
    }

    /// Ids of the body's children, in order.
    pub fn body_child_ids(&self) -> Vec<Option<String>> {
        let inner = self.inner.borrow();
        inner.nodes[0]
            .children
            .iter()
            .map(|child| attribute_of(&inner.nodes[child.0], "id"))
            .collect()
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.inner.borrow().nodes[node.0].tag.clone()
    }

    fn parse_fragment(&self, html: &str) -> Result<Vec<NodeId>, SelectorError> {
        let mut reader = Reader::from_str(html);
        reader.config_mut().trim_text(true);

        let mut inner = self.inner.borrow_mut();
        let mut roots = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let id = push_element(&mut inner, &start, stack.last().copied(), &mut roots)?;
                    stack.push(id);
                }
                Ok(Event::Empty(start)) => {
                    push_element(&mut inner, &start, stack.last().copied(), &mut roots)?;
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => return Err(SelectorError::Dom(err.to_string())),
            }
        }
        Ok(roots)
    }
}

fn push_element(
    inner: &mut Inner,
    start: &BytesStart<'_>,
    parent: Option<NodeId>,
    roots: &mut Vec<NodeId>,
) -> Result<NodeId, SelectorError> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SelectorError::Dom(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| SelectorError::Dom(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    let id = NodeId(inner.nodes.len());
    inner.nodes.push(Element {
        tag: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attributes,
        parent,
        ..Default::default()
    });
    match parent {
        Some(parent) => inner.nodes[parent.0].children.push(id),
        None => roots.push(id),
    }
    Ok(id)
}

fn attribute_of(element: &Element, name: &str) -> Option<String> {
    element
        .attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

fn descendants(inner: &Inner, node: NodeId, out: &mut Vec<NodeId>) {
    for child in &inner.nodes[node.0].children {
        out.push(*child);
        descendants(inner, *child, out);
    }
}

impl DomHost for MemoryDom {
    type Node = NodeId;
    type Event = ClickEvent;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let inner = self.inner.borrow();
        let mut all = Vec::new();
        descendants(&inner, NodeId(0), &mut all);
        all.into_iter()
            .find(|node| attribute_of(&inner.nodes[node.0], "id").as_deref() == Some(id))
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.inner.borrow().nodes[node.0].children.clone()
    }

    fn first_with_class(&self, node: &NodeId, class: &str) -> Option<NodeId> {
        let inner = self.inner.borrow();
        let mut all = Vec::new();
        descendants(&inner, *node, &mut all);
        all.into_iter().find(|candidate| {
            attribute_of(&inner.nodes[candidate.0], "class")
                .is_some_and(|c| c.split_whitespace().any(|t| t == class))
        })
    }

    fn class_name(&self, node: &NodeId) -> String {
        attribute_of(&self.inner.borrow().nodes[node.0], "class").unwrap_or_default()
    }

    fn set_class_name(&self, node: &NodeId, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let attributes = &mut inner.nodes[node.0].attributes;
        match attributes.iter_mut().find(|(key, _)| key == "class") {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push(("class".into(), value.to_string())),
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        attribute_of(&self.inner.borrow().nodes[node.0], name)
    }

    fn insert_html_before(&self, node: &NodeId, html: &str) -> Result<(), SelectorError> {
        let roots = self.parse_fragment(html)?;
        let mut inner = self.inner.borrow_mut();
        let parent = inner.nodes[node.0]
            .parent
            .ok_or_else(|| SelectorError::Dom("cannot insert before the root".into()))?;
        for root in &roots {
            inner.nodes[root.0].parent = Some(parent);
        }
        let siblings = &mut inner.nodes[parent.0].children;
        let position = siblings
            .iter()
            .position(|sibling| sibling == node)
            .unwrap_or(siblings.len());
        for (offset, root) in roots.into_iter().enumerate() {
            siblings.insert(position + offset, root);
        }
        Ok(())
    }

    fn hide(&self, node: &NodeId) {
        self.inner.borrow_mut().nodes[node.0].hidden = true;
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.inner.borrow_mut().nodes[node.0].value = value.to_string();
    }

    fn on_click(
        &self,
        node: &NodeId,
        handler: ClickHandler<ClickEvent>,
    ) -> Result<(), SelectorError> {
        self.inner
            .borrow_mut()
            .listeners
            .entry(*node)
            .or_default()
            .push(Rc::new(RefCell::new(handler)));
        Ok(())
    }

    fn event_strategy(&self) -> EventStrategy {
        self.inner.borrow().strategy
    }

    fn dispatch_change(&self, node: &NodeId, strategy: EventStrategy) -> Result<(), SelectorError> {
        self.inner.borrow_mut().dispatched.push(Dispatched {
            target: *node,
            strategy,
        });
        Ok(())
    }

    fn location_search(&self) -> String {
        self.inner.borrow().search.clone()
    }

    fn supports_history(&self) -> bool {
        self.inner.borrow().history_supported
    }

    fn replace_search(&self, search: &str) -> Result<(), SelectorError> {
        let mut inner = self.inner.borrow_mut();
        inner.search = search.to_string();
        inner.url_writes.push(search.to_string());
        Ok(())
    }
}
