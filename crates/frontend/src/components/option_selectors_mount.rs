use crate::selectors::{OptionSelectors, SelectionCallback, SelectorConfig, SingleOptionSelector};
use crate::web::BrowserDom;
use contracts::domain::a001_product::{Product, Variant};
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

type Mounted = Rc<RefCell<Option<Rc<RefCell<OptionSelectors<BrowserDom>>>>>>;

/// Исходный `<select>` вариантов с кастомными селекторами опций поверх него
#[component]
pub fn OptionSelectorsMount(
    /// Товар, варианты которого заполняют исходный контрол
    product: Product,
    /// Класс выбранного значения
    #[prop(optional, into)]
    selected_class: Option<String>,
    /// Исходник шаблона селектора (встроенная разметка, если не задан)
    #[prop(optional, into)]
    template: Option<String>,
    /// Отражать выбранный вариант в `?variant=`
    #[prop(optional)]
    enable_history: bool,
    /// Обработчик выбора, `None` для несуществующих комбинаций
    #[prop(optional)]
    on_variant: Option<Callback<Option<Variant>>>,
) -> impl IntoView {
    let select_id = format!("product-select-{}", product.id);
    let options = product
        .variants()
        .iter()
        .map(|variant| {
            let value = variant.id.to_string();
            let title = variant.title.clone();
            view! { <option value=value>{title}</option> }
        })
        .collect_view();

    // монтируется, когда <select> уже в документе; живет столько же, сколько эффект
    let mounted: Mounted = Rc::default();
    let element = select_id.clone();
    Effect::new(move |_| {
        if mounted.borrow().is_some() {
            return;
        }

        let mut config =
            SelectorConfig::new(element.clone(), product.clone()).with_history(enable_history);
        if let Some(class) = selected_class.clone() {
            config = config.with_selected_class(class);
        }
        if let Some(source) = template.clone() {
            config = config.with_template(source);
        }

        let callback: SelectionCallback<web_sys::Event> = Box::new(
            move |variant: Option<&Variant>,
                  _selector: Option<&SingleOptionSelector>,
                  _event: Option<&web_sys::Event>| {
                if let Some(handler) = on_variant {
                    handler.run(variant.cloned());
                }
            },
        );

        match BrowserDom::new().and_then(|host| OptionSelectors::mount(host, config, callback)) {
            Ok(selectors) => *mounted.borrow_mut() = Some(selectors),
            Err(err) => log::error!("failed to mount option selectors: {}", err),
        }
    });

    view! {
        <div class="product-form__variants">
            <select id=select_id name="id" class="product-form__select">
                {options}
            </select>
        </div>
    }
}
