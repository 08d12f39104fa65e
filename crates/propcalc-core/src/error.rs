use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropCalcError {
    #[error("Invalid parameter: {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Invalid number '{input}': {reason}")]
    InvalidNumber { input: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PropCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PropCalcError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        PropCalcError::ArithmeticOverflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for PropCalcError {
    fn from(e: serde_json::Error) -> Self {
        PropCalcError::SerializationError(e.to_string())
    }
}
