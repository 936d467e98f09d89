//! `DomHost` over the live browser document.

use crate::selectors::host::{ClickHandler, DomHost, EventStrategy};
use crate::selectors::SelectorError;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement, Window};

fn js_error(context: &str, err: JsValue) -> SelectorError {
    SelectorError::Dom(format!("{}: {:?}", context, err))
}

/// Обработчики кликов, зарегистрированные селекторами.
/// Снимаются с узлов, когда уходит последний клон `BrowserDom`.
#[derive(Default)]
struct Listeners {
    registered: RefCell<Vec<(Element, Closure<dyn FnMut(Event)>)>>,
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (node, closure) in self.registered.borrow_mut().drain(..) {
            if let Err(err) =
                node.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            {
                log::debug!("failed to remove click listener: {:?}", err);
            }
        }
    }
}

#[derive(Clone)]
pub struct BrowserDom {
    window: Window,
    document: Document,
    listeners: Rc<Listeners>,
}

impl BrowserDom {
    pub fn new() -> Result<Self, SelectorError> {
        let window =
            web_sys::window().ok_or_else(|| SelectorError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| SelectorError::Dom("no document".to_string()))?;
        Ok(Self {
            window,
            document,
            listeners: Rc::new(Listeners::default()),
        })
    }
}

impl DomHost for BrowserDom {
    type Node = Element;
    type Event = Event;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn first_with_class(&self, node: &Element, class: &str) -> Option<Element> {
        node.get_elements_by_class_name(class).item(0)
    }

    fn class_name(&self, node: &Element) -> String {
        node.class_name()
    }

    fn set_class_name(&self, node: &Element, value: &str) {
        node.set_class_name(value);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn insert_html_before(&self, node: &Element, html: &str) -> Result<(), SelectorError> {
        node.insert_adjacent_html("beforebegin", html)
            .map_err(|e| js_error("insertAdjacentHTML", e))
    }

    fn hide(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = el.style().set_property("display", "none") {
                log::warn!("failed to hide native control: {:?}", err);
            }
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Err(err) = node.set_attribute("value", value) {
            log::warn!("failed to set control value: {:?}", err);
        }
    }

    fn on_click(&self, node: &Element, mut handler: ClickHandler<Event>) -> Result<(), SelectorError> {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&event));
        node.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("addEventListener", e))?;
        self.listeners
            .registered
            .borrow_mut()
            .push((node.clone(), closure));
        Ok(())
    }

    /// `new Event(..)` throws where the constructor is unsupported.
    fn event_strategy(&self) -> EventStrategy {
        match Event::new("change") {
            Ok(_) => EventStrategy::Constructor,
            Err(_) => EventStrategy::Legacy,
        }
    }

    fn dispatch_change(&self, node: &Element, strategy: EventStrategy) -> Result<(), SelectorError> {
        let event = match strategy {
            EventStrategy::Constructor => {
                Event::new("change").map_err(|e| js_error("new Event", e))?
            }
            EventStrategy::Legacy => {
                let event = self
                    .document
                    .create_event("Event")
                    .map_err(|e| js_error("createEvent", e))?;
                event.init_event_with_bubbles_and_cancelable("change", false, true);
                event
            }
        };
        node.dispatch_event(&event)
            .map(|_| ())
            .map_err(|e| js_error("dispatchEvent", e))
    }

    fn location_search(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn supports_history(&self) -> bool {
        self.window
            .history()
            .ok()
            .and_then(|history| js_sys::Reflect::get(&history, &JsValue::from_str("replaceState")).ok())
            .is_some_and(|replace| replace.is_function())
    }

    fn replace_search(&self, search: &str) -> Result<(), SelectorError> {
        let location = self.window.location();
        let url = format!(
            "{}{}{}",
            location.pathname().unwrap_or_default(),
            search,
            location.hash().unwrap_or_default()
        );
        self.window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)))
            .map_err(|e| js_error("history.replaceState", e))
    }
}
