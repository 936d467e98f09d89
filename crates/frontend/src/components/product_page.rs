use super::OptionSelectorsMount;
use crate::shared::number_format::format_money;
use contracts::domain::a001_product::{Product, Variant};
use leptos::prelude::*;

const SAMPLE_PRODUCT: &str = r#"{
    "id": 7001,
    "title": "Linen Shirt",
    "handle": "linen-shirt",
    "options": ["Size", "Color"],
    "variants": [
        {"id": 101, "title": "S / Sand", "options": ["S", "Sand"], "available": false, "price": 4900},
        {"id": 102, "title": "S / Navy", "options": ["S", "Navy"], "available": true, "price": 4900},
        {"id": 103, "title": "M / Sand", "options": ["M", "Sand"], "available": true, "price": 5200},
        {"id": 104, "title": "L / Navy", "options": ["L", "Navy"], "available": true, "price": 5200}
    ]
}"#;

fn price_label(variant: Option<&Variant>) -> String {
    match variant {
        Some(variant) => variant.price.map(format_money).unwrap_or_default(),
        None => "Unavailable".to_string(),
    }
}

/// Демо-страница товара: цена и кнопка покупки следуют за выбранным вариантом
#[component]
pub fn ProductPage() -> impl IntoView {
    let product = match Product::from_json(SAMPLE_PRODUCT) {
        Ok(product) => product,
        Err(err) => {
            log::error!("failed to parse sample product: {}", err);
            return view! { <p class="product__error">"Product data is invalid"</p> }.into_any();
        }
    };

    let (variant, set_variant) = signal(product.first_available().cloned());
    let title = product.title.clone();
    let can_buy = move || variant.with(|v| v.as_ref().is_some_and(|v| v.available));

    view! {
        <section class="product">
            <h1 class="product__title">{title}</h1>
            <p class="product__price">{move || variant.with(|v| price_label(v.as_ref()))}</p>
            <OptionSelectorsMount
                product=product
                enable_history=true
                on_variant=Callback::new(move |v: Option<Variant>| set_variant.set(v))
            />
            <button class="product__buy" disabled=move || !can_buy()>
                "Add to cart"
            </button>
        </section>
    }
    .into_any()
}
