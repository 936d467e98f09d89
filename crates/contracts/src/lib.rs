//! Storefront data contracts shared by the option selector widget.

pub mod domain;
