pub mod option_selectors_mount;
pub mod product_page;

pub use option_selectors_mount::OptionSelectorsMount;
pub use product_page::ProductPage;
