//! Declarative input shapes
//!
//! An [`InputShape`] describes what a tool accepts. The same description is
//! consumed by the argument validator here and by each provider adapter's
//! descriptor builder, so there is exactly one source of truth per tool.
//!
//! ```text
//! InputShape
//!   ├─ String | Number | Integer | Boolean
//!   ├─ Array(T)            (recursive)
//!   ├─ Enum(values)        (string values)
//!   ├─ Object(ObjectShape) (fields + required set)
//!   └─ Other(hint)         (unsupported: described as "string", not validated)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

/// Declarative description of a value a tool accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum InputShape {
    String,
    Number,
    Integer,
    Boolean,
    Array(Box<InputShape>),
    Enum(Vec<String>),
    Object(ObjectShape),
    /// A shape this system does not model. Descriptor builders emit it as a
    /// plain string and the validator accepts any value for it.
    Other(String),
}

/// A named field of an [`ObjectShape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldShape {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub shape: InputShape,
}

/// An object with ordered fields and a set of required field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectShape {
    pub fields: Vec<FieldShape>,
    pub required: BTreeSet<String>,
}

/// Why a value did not match its shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required argument `{path}`")]
    MissingField { path: String },

    #[error("arguments could not be decoded: {0}")]
    Undecodable(String),

    #[error("argument `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: &'static str,
    },

    #[error("argument `{path}`: `{value}` is not one of [{allowed}]")]
    NotInEnum {
        path: String,
        value: String,
        allowed: String,
    },
}

impl InputShape {
    pub fn array_of(item: InputShape) -> Self {
        InputShape::Array(Box::new(item))
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputShape::Enum(values.into_iter().map(Into::into).collect())
    }

    /// Short type name used in validation messages.
    pub fn type_name(&self) -> String {
        match self {
            InputShape::String => "string".to_string(),
            InputShape::Number => "number".to_string(),
            InputShape::Integer => "integer".to_string(),
            InputShape::Boolean => "boolean".to_string(),
            InputShape::Array(item) => format!("array of {}", item.type_name()),
            InputShape::Enum(_) => "enum".to_string(),
            InputShape::Object(_) => "object".to_string(),
            InputShape::Other(hint) => hint.clone(),
        }
    }

    /// Validate `value` against this shape.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.validate_at(value, "")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), ValidationError> {
        let mismatch = || ValidationError::TypeMismatch {
            path: display_path(path),
            expected: self.type_name(),
            found: json_kind(value),
        };

        match self {
            InputShape::String => value.is_string().then_some(()).ok_or_else(mismatch),
            InputShape::Number => value.is_number().then_some(()).ok_or_else(mismatch),
            InputShape::Integer => {
                let is_integer = value.is_i64()
                    || value.is_u64()
                    || value.as_f64().is_some_and(|f| f.fract() == 0.0);
                is_integer.then_some(()).ok_or_else(mismatch)
            }
            InputShape::Boolean => value.is_boolean().then_some(()).ok_or_else(mismatch),
            InputShape::Array(item) => {
                let items = value.as_array().ok_or_else(mismatch)?;
                for (index, element) in items.iter().enumerate() {
                    item.validate_at(element, &format!("{}[{}]", path, index))?;
                }
                Ok(())
            }
            InputShape::Enum(allowed) => {
                let s = value.as_str().ok_or_else(mismatch)?;
                if allowed.iter().any(|a| a == s) {
                    Ok(())
                } else {
                    Err(ValidationError::NotInEnum {
                        path: display_path(path),
                        value: s.to_string(),
                        allowed: allowed.join(", "),
                    })
                }
            }
            InputShape::Object(object) => {
                let map = value.as_object().ok_or_else(mismatch)?;
                object.validate_at(map, path)
            }
            InputShape::Other(_) => Ok(()),
        }
    }

    fn retain_declared(&self, value: &Value) -> Value {
        match (self, value) {
            (InputShape::Object(object), Value::Object(map)) => {
                Value::Object(object.retain_declared(map))
            }
            (InputShape::Array(item), Value::Array(items)) => {
                Value::Array(items.iter().map(|v| item.retain_declared(v)).collect())
            }
            _ => value.clone(),
        }
    }
}

impl ObjectShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field (builder pattern)
    pub fn required(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        shape: InputShape,
    ) -> Self {
        let name = name.into();
        self.required.insert(name.clone());
        self.fields.push(FieldShape {
            name,
            description: Some(description.into()),
            shape,
        });
        self
    }

    /// Add an optional field (builder pattern)
    pub fn optional(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        shape: InputShape,
    ) -> Self {
        self.fields.push(FieldShape {
            name: name.into(),
            description: Some(description.into()),
            shape,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Validate a decoded argument object against this shape.
    ///
    /// Keys the shape does not declare are ignored here and dropped by
    /// [`ObjectShape::retain_declared`] before the handler runs. An explicit
    /// `null` for an optional field is treated the same as an absent field.
    pub fn validate(&self, args: &Map<String, Value>) -> Result<(), ValidationError> {
        self.validate_at(args, "")
    }

    fn validate_at(&self, args: &Map<String, Value>, path: &str) -> Result<(), ValidationError> {
        for name in &self.required {
            if args.get(name).is_none_or(Value::is_null) {
                return Err(ValidationError::MissingField {
                    path: join_path(path, name),
                });
            }
        }

        for (key, value) in args {
            let Some(field) = self.field(key) else {
                continue;
            };
            if value.is_null() && !self.is_required(key) {
                continue;
            }
            field.shape.validate_at(value, &join_path(path, key))?;
        }

        Ok(())
    }

    /// Copy of `args` holding only declared keys, recursing into nested
    /// objects and arrays of objects.
    pub fn retain_declared(&self, args: &Map<String, Value>) -> Map<String, Value> {
        args.iter()
            .filter_map(|(key, value)| {
                self.field(key)
                    .map(|field| (key.clone(), field.shape.retain_declared(value)))
            })
            .collect()
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
