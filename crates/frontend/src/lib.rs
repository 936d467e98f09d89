pub mod components;
pub mod selectors;
pub mod shared;
pub mod web;

use wasm_bindgen::prelude::wasm_bindgen;

pub use selectors::{OptionSelectors, SelectorConfig, SelectorError};
pub use web::OptionSelectorsHandle;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

/// Монтирует демо-страницу товара в `<body>`
#[wasm_bindgen(js_name = mountDemo)]
pub fn mount_demo() {
    leptos::mount::mount_to_body(components::ProductPage);
}
