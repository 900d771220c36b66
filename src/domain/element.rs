//! The element node: one UI element and its exclusively owned subtree.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::attributes::AttributeMap;
use crate::domain::capabilities::{Attributes, Children, Class, Element, Identity, Text};
use crate::domain::children::OrderedChildren;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::identity::{IdGenerator, RandomIdGenerator};

/// A labeled UI element consumed by templates.
///
/// Text, id and class are kept apart from the attribute map because they are
/// the fields templates reach for most.
#[derive(Debug, Clone, Default)]
pub struct ElementNode {
    id: String,
    content_type: String,
    text: String,
    class: String,
    attrs: AttributeMap,
    children: OrderedChildren<ElementNode>,
}

impl ElementNode {
    pub fn new(
        content_type: impl Into<String>,
        id: impl Into<String>,
        class: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content_type: content_type.into(),
            text: text.into(),
            class: class.into(),
            ..Self::default()
        }
    }

    /// Anonymous element; it receives an identity when attached to a parent.
    pub fn with_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            ..Self::default()
        }
    }

    /// Attach `child`, drawing a missing identity from `ids`.
    ///
    /// A child whose identity is already taken replaces the existing one at
    /// its display position.
    #[instrument(level = "trace", skip(self, child, ids), fields(parent = %self.id))]
    pub fn add_child_with<G>(&mut self, mut child: ElementNode, ids: &mut G) -> &mut Self
    where
        G: IdGenerator + ?Sized,
    {
        if child.id.is_empty() {
            child.id = ids.generate(&child.content_type);
            debug!("generated identity {}", child.id);
        }
        self.children.insert(child.id.clone(), child);
        self
    }

    /// Detach and return the direct child with identity `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, id: &str) -> Option<ElementNode> {
        self.children.remove(id)
    }

    /// Mutable direct child lookup.
    ///
    /// Changing the returned child's identity desynchronises the parent's
    /// lookup; use [`ElementNode::remove_child`] and re-add instead.
    pub fn get_child_by_id_mut(&mut self, id: &str) -> Option<&mut ElementNode> {
        self.children.get_mut(id)
    }

    /// Mutable variant of [`Children::search_children_by_id`], same visiting order.
    pub fn search_children_by_id_mut(&mut self, id: &str) -> Option<&mut ElementNode> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter_ordered_mut()
            .find_map(|child| child.search_children_by_id_mut(id))
    }

    /// Identities of the direct children in display order.
    pub fn child_order(&self) -> Vec<&str> {
        self.children.order()
    }

    pub fn add_attribute_map(&mut self, attrs: &AttributeMap) -> &mut Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn attribute_map(&self) -> &AttributeMap {
        &self.attrs
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Recursively verify the child collection invariants of the subtree.
    pub fn check_invariants(&self) -> DomainResult<()> {
        self.children.check_invariants().map_err(|e| match e {
            DomainError::Invariant { message } => DomainError::Invariant {
                message: format!("{self}: {message}"),
            },
            other => other,
        })?;
        self.children.iter().try_for_each(ElementNode::check_invariants)
    }
}

impl fmt::Display for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.content_type, self.id)
    }
}

impl Identity for ElementNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = id.into();
        self
    }
}

impl Text for ElementNode {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }
}

impl Class for ElementNode {
    fn class(&self) -> &str {
        &self.class
    }

    fn add_css_class(&mut self, class_name: &str) -> &mut Self {
        let mut tokens: Vec<&str> = self.class.split_whitespace().collect();
        for token in class_name.split_whitespace() {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        self.class = tokens.join(" ");
        self
    }

    fn remove_css_class(&mut self, class_name: &str) -> &mut Self {
        let doomed: Vec<&str> = class_name.split_whitespace().collect();
        self.class = self
            .class
            .split_whitespace()
            .filter(|token| !doomed.contains(token))
            .join(" ");
        self
    }
}

impl Attributes for ElementNode {
    fn attributes(&self) -> String {
        self.attrs.to_fragment()
    }

    fn get_attribute(&self, key: &str) -> &str {
        self.attrs.get(key)
    }

    fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attrs.insert(key, value);
        self
    }

    fn remove_attribute(&mut self, key: &str) -> &mut Self {
        self.attrs.remove(key);
        self
    }
}

impl Children for ElementNode {
    fn children(&self) -> Vec<&Self> {
        self.children.iter().collect()
    }

    fn children_by_order(&self) -> Vec<&Self> {
        self.children.iter_ordered().collect()
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn add_child(&mut self, child: Self) -> &mut Self {
        self.add_child_with(child, &mut RandomIdGenerator::default())
    }

    fn set_child_order(&mut self, this_id: &str, before_id: &str) -> &mut Self {
        self.children.move_before(this_id, before_id);
        self
    }

    fn get_child_by_id(&self, id: &str) -> Option<&Self> {
        self.children.get(id)
    }
}

impl Element for ElementNode {
    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn set_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.content_type = content_type.into();
        self
    }
}

/// Trim newlines and tabs from both ends; exposed to templates.
pub fn strip_whitespace(s: &str) -> &str {
    s.trim_matches(|c| c == '\n' || c == '\t')
}
