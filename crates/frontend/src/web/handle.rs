//! Конструктор для страниц, подключающих виджет напрямую из JS.
//!
//! Колбэк вызывается, когда селекторы уже освобождены, поэтому из него можно
//! обращаться к `selectedValues()`, `currentVariant()` и `selectVariant()`.
//!
//! ```js
//! import init, { OptionSelectors } from "./option_selectors.js";
//! await init();
//! const selectors = new OptionSelectors({
//!   element: "product-select",
//!   product: productJson,
//!   selectedClass: "selected",
//!   enableHistory: true,
//! }, (variant, optionId, event) => { ... });
//! ```

use super::dom::BrowserDom;
use crate::selectors::{
    OptionSelectors, SelectionCallback, SelectorConfig, SelectorError, SingleOptionSelector,
};
use contracts::domain::a001_product::{Variant, VariantId};
use contracts::domain::common::AggregateId;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Держит смонтированные селекторы и их обработчики кликов
#[wasm_bindgen(js_name = OptionSelectors)]
pub struct OptionSelectorsHandle {
    inner: Rc<RefCell<OptionSelectors<BrowserDom>>>,
}

#[wasm_bindgen(js_class = OptionSelectors)]
impl OptionSelectorsHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        callback: Option<js_sys::Function>,
    ) -> Result<OptionSelectorsHandle, JsError> {
        let config: SelectorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| SelectorError::Config(e.to_string()))?;
        let inner = OptionSelectors::mount(BrowserDom::new()?, config, js_callback(callback))?;
        Ok(Self { inner })
    }

    /// Выбрать значения варианта по id, как при переходе по ссылке.
    /// `false` для неизвестного id и пока селекторы заняты (например, из
    /// обработчика `change`).
    #[wasm_bindgen(js_name = selectVariant)]
    pub fn select_variant(&self, id: &str) -> bool {
        let Ok(id) = VariantId::from_string(id) else {
            return false;
        };
        let found = match self.inner.try_borrow_mut() {
            Ok(mut selectors) => selectors.select_variant(id),
            Err(_) => {
                log::warn!("selectVariant({}) ignored: selectors are busy", id);
                return false;
            }
        };
        OptionSelectors::notify(&self.inner);
        found
    }

    #[wasm_bindgen(js_name = selectedValues)]
    pub fn selected_values(&self) -> Vec<String> {
        match self.inner.try_borrow() {
            Ok(selectors) => selectors.selected_values(),
            Err(_) => {
                log::warn!("selectedValues() unavailable: selectors are busy");
                Vec::new()
            }
        }
    }

    /// Вариант, последним записанный в исходный контрол, или `undefined`
    #[wasm_bindgen(js_name = currentVariant)]
    pub fn current_variant(&self) -> JsValue {
        let Ok(selectors) = self.inner.try_borrow() else {
            log::warn!("currentVariant() unavailable: selectors are busy");
            return JsValue::UNDEFINED;
        };
        selectors
            .current_variant()
            .and_then(|variant| serde_wasm_bindgen::to_value(variant).ok())
            .unwrap_or(JsValue::UNDEFINED)
    }
}

/// JS-функция как колбэк выбора: `(variant | null, optionId | null, event | null)`
fn js_callback(callback: Option<js_sys::Function>) -> SelectionCallback<web_sys::Event> {
    Box::new(
        move |variant: Option<&Variant>,
              selector: Option<&SingleOptionSelector>,
              event: Option<&web_sys::Event>| {
            let Some(callback) = &callback else {
                return;
            };
            let variant = variant
                .and_then(|v| serde_wasm_bindgen::to_value(v).ok())
                .unwrap_or(JsValue::NULL);
            let option_id = selector
                .map(|s| JsValue::from_str(s.id()))
                .unwrap_or(JsValue::NULL);
            let event = event
                .map(|e| JsValue::from(e.clone()))
                .unwrap_or(JsValue::NULL);
            if let Err(err) = callback.call3(&JsValue::NULL, &variant, &option_id, &event) {
                log::error!("selection callback threw: {:?}", err);
            }
        },
    )
}
