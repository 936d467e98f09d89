//! Custom option selectors replacing a native variant `<select>`.

pub mod config;
pub mod error;
pub mod group;
pub mod history;
pub mod host;
pub mod query;
pub mod single;
pub mod template;

#[cfg(test)]
pub(crate) mod memory_dom;

pub use config::SelectorConfig;
pub use error::SelectorError;
pub use group::{OptionSelectors, SelectionCallback};
pub use host::{DomHost, EventStrategy};
pub use single::{Selection, SingleOptionSelector};
