use thiserror::Error;

/// Raised when a field is declared or driven in a way the core cannot honour.
///
/// Validation messages coming from the store are data, not errors; they never
/// surface through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("field is being used incorrectly: missing children")]
    MissingChildren,
    #[error("field is being used incorrectly: no field name can be derived from {0:?}")]
    UnderivableName(String),
    #[error("`{interaction}` does not apply to the {binding} control of field `{field}`")]
    UnsupportedInteraction {
        field: String,
        binding: &'static str,
        interaction: &'static str,
    },
    #[error("selected file for field `{field}` cannot be stored: {reason}")]
    UnencodableFile { field: String, reason: String },
}
