//! Builds element trees from JSON element documents.
//!
//! ```json
//! {"text":"A", "id":"button1", "type":"button", "class":"btn-primary",
//!  "attributes":{"href":"/"}, "children":[ ... ]}
//! ```

use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::domain::attributes::AttributeMap;
use crate::domain::capabilities::{Children, Class, Element, Identity, Text};
use crate::domain::element::ElementNode;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::identity::{IdGenerator, RandomIdGenerator};

/// Wire shape of one element. Every field is optional; `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub element_type: String,
    #[serde(rename = "class", deserialize_with = "null_as_default")]
    pub class_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: AttributeMap,
    #[serde(deserialize_with = "null_as_default")]
    pub children: Vec<ElementDocument>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ElementDocument {
    /// Snapshot of `element` and its subtree, children in display order.
    pub fn from_element(element: &ElementNode) -> Self {
        Self {
            text: element.text().to_string(),
            id: element.id().to_string(),
            element_type: element.content_type().to_string(),
            class_name: element.class().to_string(),
            attributes: element.attribute_map().clone(),
            children: element
                .children_by_order()
                .into_iter()
                .map(Self::from_element)
                .collect(),
        }
    }

    pub fn to_json(&self) -> DomainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Turns element documents into [`ElementNode`] trees.
///
/// Children are attached in document order, which becomes their display
/// order; anonymous children get identities from the builder's generator.
pub struct ElementBuilder {
    ids: Box<dyn IdGenerator>,
}

impl Default for ElementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementBuilder {
    pub fn new() -> Self {
        Self::with_id_generator(RandomIdGenerator::default())
    }

    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self { ids: Box::new(ids) }
    }

    #[instrument(level = "debug", skip(self, json))]
    pub fn build_from_json_str(&mut self, json: &str) -> DomainResult<ElementNode> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            warn!("rejected element document: {}", e);
            DomainError::from(e)
        })?;
        self.build_from_value(value)
    }

    #[instrument(level = "debug", skip(self, reader))]
    pub fn build_from_reader<R: Read>(&mut self, reader: R) -> DomainResult<ElementNode> {
        let value: Value = serde_json::from_reader(reader).map_err(|e| {
            warn!("rejected element document: {}", e);
            DomainError::from(e)
        })?;
        self.build_from_value(value)
    }

    /// The whole document is validated before any node is created.
    #[instrument(level = "debug", skip(self, value))]
    pub fn build_from_value(&mut self, value: Value) -> DomainResult<ElementNode> {
        ensure_element_shape(&value, "$")?;
        let document: ElementDocument = serde_json::from_value(value)?;
        Ok(self.build(document))
    }

    pub fn build(&mut self, document: ElementDocument) -> ElementNode {
        let ElementDocument {
            text,
            id,
            element_type,
            class_name,
            attributes,
            children,
        } = document;

        let mut node = ElementNode::new(element_type, id, class_name, text);
        node.add_attribute_map(&attributes);
        for child in children {
            let child = self.build(child);
            node.add_child_with(child, &mut self.ids);
        }
        node
    }
}

/// Documents and their children must be JSON objects; serde would otherwise
/// accept a positional array for a struct.
fn ensure_element_shape(value: &Value, path: &str) -> DomainResult<()> {
    let Some(object) = value.as_object() else {
        return Err(DomainError::InvalidDocument {
            message: format!("{path}: expected an object"),
        });
    };
    if let Some(Value::Array(children)) = object.get("children") {
        for (n, child) in children.iter().enumerate() {
            ensure_element_shape(child, &format!("{path}.children[{n}]"))?;
        }
    }
    Ok(())
}
