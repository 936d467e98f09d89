//! The selector group controller.
//!
//! Owns every option selector for one product, keeps the hidden native
//! control in sync with the resolved variant, and decides the initial
//! selection (deep link, first available variant, or first values).

use super::config::SelectorConfig;
use super::error::SelectorError;
use super::history::HistoryState;
use super::host::{DomHost, EventStrategy};
use super::query::variant_param;
use super::single::{Selection, SingleOptionSelector, VALUE_ATTRIBUTE};
use super::template::{SelectorTemplate, DEFAULT_TEMPLATE};
use contracts::domain::a001_product::{Product, Variant, VariantId};
use contracts::domain::common::AggregateId;
use std::cell::RefCell;
use std::rc::Rc;

/// Invoked after every resolution with the matching variant (`None` when the
/// selected values match no variant), the selector that was clicked and the
/// click event. Both are `None` for programmatic selections.
///
/// Runs from [`OptionSelectors::notify`] with the controller released, so it
/// may read the selectors or select another variant.
pub type SelectionCallback<E> =
    Box<dyn FnMut(Option<&Variant>, Option<&SingleOptionSelector>, Option<&E>)>;

/// One resolution waiting for the callback.
struct Notice<E> {
    variant: Option<Variant>,
    selector: Option<SingleOptionSelector>,
    event: Option<E>,
}

pub struct OptionSelectors<H: DomHost> {
    host: H,
    elem: H::Node,
    template: SelectorTemplate,
    product: Product,
    // taken out while `notify` runs it
    callback: Option<SelectionCallback<H::Event>>,
    pending: Vec<Notice<H::Event>>,
    history: Option<HistoryState>,
    selectors: Vec<SingleOptionSelector>,
    event_strategy: EventStrategy,
    current: Option<VariantId>,
}

impl<H: DomHost + 'static> OptionSelectors<H> {
    /// Build the selectors, wire click handling and apply the initial
    /// selection.
    pub fn mount(
        host: H,
        config: SelectorConfig,
        callback: SelectionCallback<H::Event>,
    ) -> Result<Rc<RefCell<Self>>, SelectorError> {
        let controller = Rc::new(RefCell::new(Self::build(host, config, callback)?));
        Self::attach_listeners(&controller)?;
        controller.borrow_mut().select_initial();
        Self::notify(&controller);
        Ok(controller)
    }

    /// Hand queued resolutions to the callback, in order, with the controller
    /// unborrowed. Resolutions the callback itself causes are delivered by the
    /// same call; a nested `notify` leaves them queued.
    pub fn notify(controller: &Rc<RefCell<Self>>) {
        loop {
            let (mut callback, notices) = match controller.try_borrow_mut() {
                Ok(mut this) => {
                    if this.pending.is_empty() {
                        return;
                    }
                    let Some(callback) = this.callback.take() else {
                        return;
                    };
                    (callback, std::mem::take(&mut this.pending))
                }
                Err(_) => return,
            };
            for notice in &notices {
                callback(
                    notice.variant.as_ref(),
                    notice.selector.as_ref(),
                    notice.event.as_ref(),
                );
            }
            controller.borrow_mut().callback = Some(callback);
        }
    }

    fn attach_listeners(controller: &Rc<RefCell<Self>>) -> Result<(), SelectorError> {
        let this = controller.borrow();
        for selector in &this.selectors {
            for node in selector.value_nodes(&this.host) {
                let weak = Rc::downgrade(controller);
                let option_id = selector.id().to_string();
                let target = node.clone();
                this.host.on_click(
                    &node,
                    Box::new(move |event: &H::Event| {
                        let Some(controller) = weak.upgrade() else {
                            return;
                        };
                        let handled = match controller.try_borrow_mut() {
                            Ok(mut this) => {
                                this.on_value_click(&option_id, &target, Some(event));
                                true
                            }
                            Err(_) => {
                                log::warn!("click on {} ignored: selectors are busy", option_id);
                                false
                            }
                        };
                        if handled {
                            Self::notify(&controller);
                        }
                    }),
                )?;
            }
        }
        Ok(())
    }
}

impl<H: DomHost> OptionSelectors<H> {
    /// Hide the native control and render one selector per product option.
    /// No click handling and no initial selection; see [`OptionSelectors::mount`].
    fn build(
        host: H,
        config: SelectorConfig,
        callback: SelectionCallback<H::Event>,
    ) -> Result<Self, SelectorError> {
        let elem = host
            .element_by_id(&config.element)
            .ok_or_else(|| SelectorError::ElementNotFound(config.element.clone()))?;
        let template =
            SelectorTemplate::new(config.template.as_deref().unwrap_or(DEFAULT_TEMPLATE))?;
        let history = config.enable_history.then(|| HistoryState::new(&host));
        let event_strategy = host.event_strategy();

        let mut this = Self {
            host,
            elem,
            template,
            product: config.product,
            callback: Some(callback),
            pending: Vec::new(),
            history,
            selectors: Vec::new(),
            event_strategy,
            current: None,
        };

        this.host.hide(&this.elem);
        this.build_selectors(&config.selected_class)?;
        log::debug!(
            "built {} option selectors for product {}",
            this.selectors.len(),
            this.product.id
        );
        Ok(this)
    }

    fn build_selectors(&mut self, selected_class: &str) -> Result<(), SelectorError> {
        for (index, option) in self.product.options.iter().enumerate() {
            let selector = SingleOptionSelector::new(
                index,
                option.name.clone(),
                option.values.clone(),
                self.product.id,
                selected_class,
            );
            let html = selector.build_selector(&self.template)?;
            self.host.insert_html_before(&self.elem, &html)?;
            if selector.element(&self.host).is_none() {
                return Err(SelectorError::SelectorMissing(selector.dom_id()));
            }
            self.selectors.push(selector);
        }
        Ok(())
    }

    /// Deep link when the URL names a known variant, default selection otherwise.
    pub fn select_initial(&mut self) {
        if let Some(raw) = variant_param(&self.host.location_search()) {
            match VariantId::from_string(&raw) {
                Ok(id) if self.select_variant(id) => return,
                _ => log::warn!("ignoring unknown variant `{}` from URL", raw),
            }
        }
        self.select_default();
    }

    /// First available variant, or the first value of every selector when
    /// nothing is available.
    pub fn select_default(&mut self) {
        if let Some(id) = self.product.first_available().map(|v| v.id) {
            self.select_variant(id);
            return;
        }
        for selector in &self.selectors {
            selector.clear_selection(&self.host);
            selector.make_selection(&self.host, Selection::ByIndex(0));
        }
        self.update_selectors(None, None);
    }

    /// Mark the values of variant `id` in every selector and resolve.
    /// Returns `false`, touching nothing, when the product has no such variant.
    /// The callback hears about the result at the next [`OptionSelectors::notify`].
    pub fn select_variant(&mut self, id: VariantId) -> bool {
        let Some(variant) = self.product.variant_by_id(id) else {
            return false;
        };

        for (selector, wanted) in self.selectors.iter().zip(&variant.options) {
            selector.clear_selection(&self.host);
            // no early exit: if markup repeats a value the last node wins
            for node in selector.value_nodes(&self.host) {
                if self.host.attribute(&node, VALUE_ATTRIBUTE).as_deref() == Some(wanted.as_str()) {
                    selector.clear_selection(&self.host);
                    selector.make_selection(&self.host, Selection::ByNode(node));
                }
            }
        }

        self.update_selectors(None, None);
        true
    }

    /// Click on a rendered value of selector `option_id`.
    pub fn on_value_click(
        &mut self,
        option_id: &str,
        node: &H::Node,
        event: Option<&H::Event>,
    ) -> Option<VariantId> {
        let index = self.selectors.iter().position(|s| s.id() == option_id)?;
        let selector = &self.selectors[index];
        selector.clear_selection(&self.host);
        selector.make_selection(&self.host, Selection::ByNode(node.clone()));
        self.update_selectors(Some(index), event)
    }

    /// Resolve the selected values, queue the result for the callback, and
    /// push a found variant into the native control, its `change` listeners
    /// and history.
    pub fn update_selectors(
        &mut self,
        selector: Option<usize>,
        event: Option<&H::Event>,
    ) -> Option<VariantId> {
        let values: Vec<String> = self
            .selectors
            .iter()
            .filter_map(|s| s.selected_value(&self.host))
            .collect();
        let variant = self.product.variant_for(&values);
        self.pending.push(Notice {
            variant: variant.cloned(),
            selector: selector.and_then(|index| self.selectors.get(index)).cloned(),
            event: event.cloned(),
        });

        let Some(variant) = variant else {
            log::debug!("no variant for {:?}", values);
            return None;
        };

        self.host.set_value(&self.elem, &variant.id.to_string());
        if let Err(err) = self.host.dispatch_change(&self.elem, self.event_strategy) {
            log::warn!("failed to dispatch change for variant {}: {}", variant.id, err);
        }
        if let Some(history) = &self.history {
            history.on_selection(&self.host, variant);
        }

        log::debug!("selected variant {} ({:?})", variant.id, values);
        self.current = Some(variant.id);
        self.current
    }

    /// Currently marked value of every selector that has one, in option order.
    pub fn selected_values(&self) -> Vec<String> {
        self.selectors
            .iter()
            .filter_map(|s| s.selected_value(&self.host))
            .collect()
    }

    /// Last variant pushed into the native control.
    pub fn current_variant(&self) -> Option<&Variant> {
        self.current.and_then(|id| self.product.variant_by_id(id))
    }

    pub fn selector(&self, option_id: &str) -> Option<&SingleOptionSelector> {
        self.selectors.iter().find(|s| s.id() == option_id)
    }

    pub fn selectors(&self) -> &[SingleOptionSelector] {
        &self.selectors
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn history_enabled(&self) -> bool {
        self.history.is_some()
    }
}
