//! Domain layer: the element tree and its builders
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod attributes;
pub mod builder;
pub mod capabilities;
pub mod children;
pub mod content_type;
pub mod element;
pub mod error;
pub mod identity;

pub use attributes::AttributeMap;
pub use builder::{ElementBuilder, ElementDocument};
pub use capabilities::{Attributes, Children, Class, Element, Identity, Text};
pub use children::OrderedChildren;
pub use element::{strip_whitespace, ElementNode};
pub use error::{DomainError, DomainResult};
pub use identity::{IdGenerator, RandomIdGenerator, SequentialIdGenerator, DEFAULT_ID_RANGE};
