//! JSON Schema conversion for tool input shapes.
//!
//! Both provider families describe tool parameters with JSON Schema; only the
//! envelope around it differs. These functions walk an [`InputShape`] and
//! emit the shared schema part.
//!
//! Shape → JSON Schema type mapping:
//! - `String` → `"string"`
//! - `Number` → `"number"`
//! - `Integer` → `"integer"`
//! - `Boolean` → `"boolean"`
//! - `Array(T)` → `"array"` with `items` (recursive)
//! - `Enum(values)` → `"string"` with `enum`
//! - `Object` → `"object"` with `properties` and `required`
//! - `Other(_)` → `"string"` (not validated; the model sees a plain string)

use lisa_domain::{InputShape, ObjectShape};
use serde_json::{Map, Value, json};

/// JSON Schema for a tool's argument object.
pub fn object_schema(shape: &ObjectShape) -> Value {
    let mut properties = Map::new();
    for field in &shape.fields {
        let mut prop = match shape_schema(&field.shape) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Some(description) = &field.description {
            prop.insert("description".to_string(), json!(description));
        }
        properties.insert(field.name.clone(), Value::Object(prop));
    }

    // Required names in declaration order, for stable output
    let required: Vec<&str> = shape
        .fields
        .iter()
        .filter(|f| shape.is_required(&f.name))
        .map(|f| f.name.as_str())
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// JSON Schema for a single shape.
pub fn shape_schema(shape: &InputShape) -> Value {
    match shape {
        InputShape::String => json!({"type": "string"}),
        InputShape::Number => json!({"type": "number"}),
        InputShape::Integer => json!({"type": "integer"}),
        InputShape::Boolean => json!({"type": "boolean"}),
        InputShape::Array(item) => json!({"type": "array", "items": shape_schema(item)}),
        InputShape::Enum(values) => json!({"type": "string", "enum": values}),
        InputShape::Object(object) => object_schema(object),
        InputShape::Other(_) => json!({"type": "string"}),
    }
}
