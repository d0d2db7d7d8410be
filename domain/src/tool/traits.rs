//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async executor lives in the application layer.

use super::entities::{ToolCall, ToolDefinition};
use super::schema::ValidationError;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator: Send + Sync {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ValidationError>;
}

/// Validates arguments against the definition's declared input shape.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ValidationError> {
        if let Some(error) = &call.argument_error {
            return Err(ValidationError::Undecodable(error.clone()));
        }
        definition.input_schema.validate(&call.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::schema::{InputShape, ObjectShape};

    fn weather() -> ToolDefinition {
        ToolDefinition::new("getWeather", "Weather").with_input(
            ObjectShape::new()
                .required("city", "City name", InputShape::String)
                .optional("days", "Forecast length", InputShape::Integer),
        )
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ToolCall::new("c1", "getWeather").with_arg("days", 2);
        let err = DefaultToolValidator.validate(&call, &weather()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                path: "city".to_string()
            }
        );
    }

    #[test]
    fn test_validator_ignores_undeclared_argument() {
        let call = ToolCall::new("c1", "getWeather")
            .with_arg("city", "Paris")
            .with_arg("units", "metric");
        assert!(DefaultToolValidator.validate(&call, &weather()).is_ok());
    }

    #[test]
    fn test_validator_rejects_undecodable_arguments() {
        let call = ToolCall::new("c1", "getWeather").with_argument_error("trailing characters");
        let err = DefaultToolValidator.validate(&call, &weather()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Undecodable("trailing characters".to_string())
        );
        assert!(err.to_string().contains("could not be decoded"));
    }

    #[test]
    fn test_validator_valid() {
        let call = ToolCall::new("c1", "getWeather")
            .with_arg("city", "Paris")
            .with_arg("days", 3);
        assert!(DefaultToolValidator.validate(&call, &weather()).is_ok());
    }
}
