pub mod aggregate;

pub use aggregate::{Product, ProductId, ProductOption, Variant, VariantId};
