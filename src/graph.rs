//! The portal's JSON-LD document as a flat list of nodes.
//!
//! No graph traversal happens here: nodes reference each other by `@id`
//! strings and the extractor matches those with plain string predicates.

use serde_json::{Map, Value};

use crate::error::{KeepersError, Result};
use crate::vocabulary::{properties, types, GRAPH};

const VALUE_KEY: &str = "@value";

/// Node types the extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// `http://schema.org/ArchiveOrganization`
    ArchiveOrganization,
    /// `http://schema.org/ArchiveComponent`
    ArchiveComponent,
    /// Any other or missing `@type`.
    Untyped,
}

/// Shape of a field value as far as the extractor cares.
///
/// JSON-LD value objects (`{"@value": "..."}`) count as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A single string.
    Text(&'a str),
    /// A list whose string members are kept; the flag is set if any member
    /// was not a string.
    List(Vec<&'a str>, bool),
    /// Anything else (number, object, null, ...).
    Unexpected,
}

/// One entity of the graph: a mapping from field name to JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    fields: Map<String, Value>,
}

impl Node {
    /// Wrap a JSON object as a node.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Node { fields }
    }

    /// Classify the node by its `@type`.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self.str_field(properties::TYPE) {
            Some(types::ARCHIVE_ORGANIZATION) => NodeType::ArchiveOrganization,
            Some(types::ARCHIVE_COMPONENT) => NodeType::ArchiveComponent,
            _ => NodeType::Untyped,
        }
    }

    /// The node's `@id`, if it is a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.str_field(properties::ID)
    }

    /// Raw value of a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Value of a field if it is a string.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Value of a field if it is a string, or `default`.
    #[must_use]
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.str_field(key).unwrap_or(default)
    }

    /// Classify the shape of a field value.
    #[must_use]
    pub fn field_value(&self, key: &str) -> Option<FieldValue<'_>> {
        self.fields.get(key).map(classify)
    }

    /// Iterate over `(name, value)` pairs in document order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn classify(value: &Value) -> FieldValue<'_> {
    if let Some(text) = as_text(value) {
        return FieldValue::Text(text);
    }
    match value {
        Value::Array(items) => {
            let strings: Vec<&str> = items.iter().filter_map(as_text).collect();
            let mixed = strings.len() != items.len();
            FieldValue::List(strings, mixed)
        },
        _ => FieldValue::Unexpected,
    }
}

/// A plain string or the string of a JSON-LD value object.
fn as_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj.get(VALUE_KEY).and_then(Value::as_str),
        _ => None,
    }
}

/// A parsed portal response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    nodes: Vec<Node>,
    mentions_keepers: bool,
}

impl Document {
    /// Build a document from an already parsed JSON value.
    ///
    /// Graph members that are not JSON objects are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`KeepersError::MissingGraph`] if the value has no `@graph` array.
    pub fn from_value(value: &Value) -> Result<Self> {
        let graph = value
            .get(GRAPH)
            .and_then(Value::as_array)
            .ok_or(KeepersError::MissingGraph)?;

        let nodes = graph
            .iter()
            .filter_map(Value::as_object)
            .map(|obj| Node::new(obj.clone()))
            .collect();

        Ok(Document {
            nodes,
            mentions_keepers: value.to_string().to_lowercase().contains("keepers"),
        })
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or has no `@graph` array.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Nodes in document order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the string "keepers" occurs anywhere in the document,
    /// ignoring case.
    #[must_use]
    pub fn mentions_keepers(&self) -> bool {
        self.mentions_keepers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_graph() {
        let err = Document::from_value(&json!({"@context": {}})).unwrap_err();
        assert!(matches!(err, KeepersError::MissingGraph));

        let err = Document::from_value(&json!({"@graph": "nope"})).unwrap_err();
        assert!(matches!(err, KeepersError::MissingGraph));
    }

    #[test]
    fn test_node_types() {
        let doc = Document::from_value(&json!({"@graph": [
            {"@type": "http://schema.org/ArchiveOrganization"},
            {"@type": "http://schema.org/ArchiveComponent"},
            {"@type": "http://schema.org/Periodical"},
            {"@id": "resource/ISSN/0378-5955"},
            42
        ]}))
        .unwrap();

        let kinds: Vec<NodeType> = doc.nodes().iter().map(Node::node_type).collect();
        assert_eq!(
            kinds,
            vec![
                NodeType::ArchiveOrganization,
                NodeType::ArchiveComponent,
                NodeType::Untyped,
                NodeType::Untyped
            ]
        );
        assert_eq!(doc.nodes()[3].id(), Some("resource/ISSN/0378-5955"));
    }

    #[test]
    fn test_mentions_keepers_is_case_insensitive() {
        let doc = Document::from_value(&json!({"@graph": [
            {"@id": "http://issn.org/organization/KEEPERS#CLOCKSS"}
        ]}))
        .unwrap();
        assert!(doc.mentions_keepers());

        let doc = Document::from_value(&json!({"@graph": []})).unwrap();
        assert!(!doc.mentions_keepers());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_field_value_shapes() {
        let doc = Document::from_value(&json!({"@graph": [
            {"a": "x", "b": ["y", "z"], "c": ["y", 1], "d": 5,
             "f": {"@value": "v", "@language": "en"}, "g": ["y", {"@value": "w"}],
             "h": {"@id": "resource/ISSN/1111-1111"}}
        ]}))
        .unwrap();
        let node = &doc.nodes()[0];

        assert_eq!(node.field_value("a"), Some(FieldValue::Text("x")));
        assert_eq!(
            node.field_value("b"),
            Some(FieldValue::List(vec!["y", "z"], false))
        );
        assert_eq!(node.field_value("c"), Some(FieldValue::List(vec!["y"], true)));
        assert_eq!(node.field_value("d"), Some(FieldValue::Unexpected));
        assert_eq!(node.field_value("e"), None);
        assert_eq!(node.field_value("f"), Some(FieldValue::Text("v")));
        assert_eq!(
            node.field_value("g"),
            Some(FieldValue::List(vec!["y", "w"], false))
        );
        assert_eq!(node.field_value("h"), Some(FieldValue::Unexpected));
    }
}
