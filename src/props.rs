use std::{fmt, sync::Arc};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::{theme::CssOverrides, validate::FieldValidator, variant::VariantFlags};

/// Observer invoked with the new value after every store update.
pub type ChangeCallback = Arc<dyn Fn(&Value)>;

/// Scalar value carried by an option or a lone checkbox/radio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(Number),
}

impl OptionValue {
    pub fn to_value(&self) -> Value {
        match self {
            OptionValue::Text(text) => Value::String(text.clone()),
            OptionValue::Number(number) => Value::Number(number.clone()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(text) => f.write_str(text),
            OptionValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOption {
    pub value: OptionValue,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Every option a field recognises, with its effect on rendering or binding.
#[derive(Clone, Default)]
pub struct FieldProps {
    /// Which branch to render.
    pub flags: VariantFlags,
    /// Choices for select, radios and checkboxes.
    pub options: Vec<FieldOption>,
    /// Value owned by a lone checkbox or radio.
    pub value: Option<OptionValue>,
    /// Extra classes for this field only.
    pub css: CssOverrides,
    pub validate: Option<FieldValidator>,
    pub on_change: Option<ChangeCallback>,
}

impl FieldProps {
    pub fn new(flags: VariantFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_label_css(mut self, css: impl Into<String>) -> Self {
        self.css.label = Some(css.into());
        self
    }

    pub fn with_control_css(mut self, css: impl Into<String>) -> Self {
        self.css.control = Some(css.into());
        self
    }

    pub fn with_error_css(mut self, css: impl Into<String>) -> Self {
        self.css.error = Some(css.into());
        self
    }

    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validate = Some(validator);
        self
    }

    pub fn with_on_change(mut self, callback: impl Fn(&Value) + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Option value of a lone checkbox or radio. A bare checkbox without one
    /// toggles `true` in and out of the field's array.
    pub(crate) fn own_value(&self) -> Value {
        self.value
            .as_ref()
            .map(OptionValue::to_value)
            .unwrap_or(Value::Bool(true))
    }
}

impl fmt::Debug for FieldProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldProps")
            .field("flags", &self.flags)
            .field("options", &self.options)
            .field("value", &self.value)
            .field("css", &self.css)
            .field("validate", &self.validate)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .finish()
    }
}
