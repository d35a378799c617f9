use std::{fmt, sync::Arc};

use anyhow::{Result, anyhow};
use serde_json::Value;

type ValidateFn = dyn Fn(&Value) -> Option<String>;

/// Per-field validator handed through to the store. Returns the error
/// message for an invalid value, `None` otherwise.
#[derive(Clone)]
pub struct FieldValidator {
    check: Arc<ValidateFn>,
}

impl FieldValidator {
    pub fn from_fn(check: impl Fn(&Value) -> Option<String> + 'static) -> Self {
        Self {
            check: Arc::new(check),
        }
    }

    /// Compile a JSON Schema fragment; the first violation becomes the message.
    pub fn from_schema(schema: &Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|err| anyhow!("invalid field validation schema: {err}"))?;
        Ok(Self::from_fn(move |value| {
            validator.iter_errors(value).next().map(|err| err.to_string())
        }))
    }

    pub fn validate(&self, value: &Value) -> Option<String> {
        (self.check)(value)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldValidator(..)")
    }
}
