//! Browser bindings: the live-document host and the JS entry point.

pub mod dom;
pub mod handle;

pub use dom::BrowserDom;
pub use handle::OptionSelectorsHandle;
