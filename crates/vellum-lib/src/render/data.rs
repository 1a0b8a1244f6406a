//! Data access used by the renderer.

use vellum_core::Value;

/// Read-only view of the payload a template is rendered with.
///
/// The module level is read map-style ([`get_item`](Self::get_item)); nested
/// records and list elements are read attribute-style
/// ([`get_attr`](Self::get_attr)). For JSON-like data both lookups are the
/// same object member access.
pub trait RenderData {
    /// Map-style lookup (`data["key"]`).
    fn get_item(&self, key: &str) -> Option<&Self>;

    /// Attribute-style lookup (`data.attr`).
    fn get_attr(&self, name: &str) -> Option<&Self> {
        self.get_item(name)
    }

    /// Elements in order, or `None` when the value is not a sequence.
    fn elements(&self) -> Option<Box<dyn Iterator<Item = &Self> + '_>>;

    fn is_null(&self) -> bool;

    /// Copy of the value, used for pass-through leaves.
    fn to_value(&self) -> Value;

    /// Short type name for error messages.
    fn type_name(&self) -> &'static str;
}

impl RenderData for serde_json::Value {
    fn get_item(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn elements(&self) -> Option<Box<dyn Iterator<Item = &Self> + '_>> {
        Some(Box::new(self.as_array()?.iter()))
    }

    fn is_null(&self) -> bool {
        serde_json::Value::is_null(self)
    }

    fn to_value(&self) -> Value {
        Value::from(self)
    }

    fn type_name(&self) -> &'static str {
        match self {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}

impl RenderData for Value {
    fn get_item(&self, key: &str) -> Option<&Self> {
        self.get(key)
    }

    fn elements(&self) -> Option<Box<dyn Iterator<Item = &Self> + '_>> {
        Some(Box::new(self.as_array()?.iter()))
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn type_name(&self) -> &'static str {
        Value::type_name(self)
    }
}
