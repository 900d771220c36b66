//! Capability contracts an element must satisfy to be rendered.
//!
//! A renderer walks any `E: Element` through these read accessors; mutating
//! methods return `&mut Self` for chaining.

/// Element identity (`id` attribute in rendered markup).
pub trait Identity {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: impl Into<String>) -> &mut Self;
}

/// Text payload, typically a label.
pub trait Text {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: impl Into<String>) -> &mut Self;
}

/// Space-joined CSS class tokens.
pub trait Class {
    fn class(&self) -> &str;
    /// Append each whitespace-separated token of `class_name` not already present.
    fn add_css_class(&mut self, class_name: &str) -> &mut Self;
    /// Remove every occurrence of each token of `class_name`.
    fn remove_css_class(&mut self, class_name: &str) -> &mut Self;
}

/// Ad-hoc tag attributes.
pub trait Attributes {
    /// Serialized `key="value"` fragment.
    fn attributes(&self) -> String;
    /// Attribute value, `""` when absent.
    fn get_attribute(&self, key: &str) -> &str;
    /// Insert or overwrite.
    fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self;
    /// No-op when absent.
    fn remove_attribute(&mut self, key: &str) -> &mut Self;
}

/// Exclusively owned children with an explicit display order.
pub trait Children: Identity + Sized {
    /// Direct children in storage order; callers must not rely on it.
    fn children(&self) -> Vec<&Self>;
    /// Direct children in display order.
    fn children_by_order(&self) -> Vec<&Self>;
    fn child_count(&self) -> usize;
    /// Attach `child`, generating an identity when it has none.
    fn add_child(&mut self, child: Self) -> &mut Self;
    /// Move `this_id` immediately before `before_id`; ignored if either is missing.
    fn set_child_order(&mut self, this_id: &str, before_id: &str) -> &mut Self;
    /// Direct child lookup.
    fn get_child_by_id(&self, id: &str) -> Option<&Self>;

    fn add_children<I>(&mut self, children: I) -> &mut Self
    where
        I: IntoIterator<Item = Self>,
    {
        for child in children {
            self.add_child(child);
        }
        self
    }

    /// Depth-first, pre-order search of the subtree rooted at self.
    ///
    /// Self is checked before its children, siblings in display order.
    fn search_children_by_id(&self, id: &str) -> Option<&Self> {
        if self.id() == id {
            return Some(self);
        }
        self.children_by_order()
            .into_iter()
            .find_map(|child| child.search_children_by_id(id))
    }
}

/// The full contract consumed by the rendering engine.
pub trait Element: Identity + Text + Class + Attributes + Children {
    fn content_type(&self) -> &str;
    fn set_content_type(&mut self, content_type: impl Into<String>) -> &mut Self;

    /// Direct children of `content_type`, in display order.
    fn get_content_by_type(&self, content_type: &str) -> Vec<&Self> {
        self.children_by_order()
            .into_iter()
            .filter(|child| child.content_type() == content_type)
            .collect()
    }
}
