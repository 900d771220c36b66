//! Element trees for template-driven user interfaces.
//!
//! An [`domain::ElementNode`] carries an identity, a content type, text, CSS
//! classes, ad-hoc attributes and exclusively owned children kept in an
//! explicit display order. Rendering engines consume it through the
//! [`domain::Element`] contract.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use domain::{
    Attributes, Children, Class, Element, ElementBuilder, ElementDocument, ElementNode, Identity,
    Text,
};
