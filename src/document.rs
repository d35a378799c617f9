use anyhow::{Context, Result, bail};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    descriptor::{ChildContent, FieldDescription},
    props::{FieldOption, FieldProps, OptionValue},
    render::{RenderedField, render_field},
    store::FormStore,
    theme::CssOverrides,
    validate::FieldValidator,
    variant::VariantFlags,
};

/// Declarative description of one field, as written in a form document.
///
/// Keys outside this list are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldSpec {
    pub children: Option<ChildContent>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    /// Value owned by a lone checkbox or radio.
    pub value: Option<OptionValue>,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub file: bool,
    #[serde(default)]
    pub checkbox: bool,
    #[serde(default)]
    pub radio: bool,
    #[serde(default)]
    pub radios: bool,
    #[serde(default)]
    pub checkboxes: bool,
    #[serde(default)]
    pub textarea: bool,
    #[serde(default)]
    pub select: bool,
    #[serde(default)]
    pub number: bool,
    #[serde(default)]
    pub password: bool,
    #[serde(default)]
    pub date: bool,
    pub label_css: Option<String>,
    pub control_css: Option<String>,
    pub error_css: Option<String>,
    /// JSON Schema fragment the field value must satisfy.
    pub validate: Option<Value>,
}

impl FieldSpec {
    pub fn flags(&self) -> VariantFlags {
        VariantFlags {
            file: self.file,
            checkbox: self.checkbox,
            radio: self.radio,
            radios: self.radios,
            checkboxes: self.checkboxes,
            textarea: self.textarea,
            select: self.select,
            number: self.number,
            password: self.password,
            date: self.date,
        }
    }

    pub fn description(&self) -> FieldDescription {
        FieldDescription {
            explicit_name: self.name.clone(),
            explicit_label: self.label.clone(),
            explicit_placeholder: self.placeholder.clone(),
            children: self.children.clone(),
        }
    }

    pub fn props(&self) -> Result<FieldProps> {
        let validate = self
            .validate
            .as_ref()
            .map(FieldValidator::from_schema)
            .transpose()
            .with_context(|| format!("field {}", self.display_name()))?;
        Ok(FieldProps {
            flags: self.flags(),
            options: self.options.clone(),
            value: self.value.clone(),
            css: CssOverrides {
                label: self.label_css.clone(),
                control: self.control_css.clone(),
                error: self.error_css.clone(),
            },
            validate,
            on_change: None,
        })
    }

    fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| match &self.children {
                Some(ChildContent::Text(text)) => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

/// A list of fields rendered against one store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormDocument {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// JSON Schema describing [`FormDocument`].
pub fn form_document_schema() -> Result<Value> {
    serde_json::to_value(schema_for!(FormDocument)).context("failed to serialize form schema")
}

/// Check a raw document against [`form_document_schema`] and deserialize it.
pub fn parse_form_document(value: Value) -> Result<FormDocument> {
    let schema = form_document_schema()?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|err| anyhow::anyhow!("invalid form document schema: {err}"))?;
    let issues = validator
        .iter_errors(&value)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let prefix = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{prefix}: {error}")
        })
        .collect::<Vec<_>>();
    if !issues.is_empty() {
        bail!("invalid form document:\n  {}", issues.join("\n  "));
    }
    serde_json::from_value(value).context("failed to read form document")
}

/// Render every field of `document`, stopping at the first failure.
pub fn render_document(
    store: &dyn FormStore,
    document: &FormDocument,
) -> Result<Vec<RenderedField>> {
    document
        .fields
        .iter()
        .map(|spec| {
            let props = spec.props()?;
            render_field(store, &spec.description(), &props)
                .with_context(|| format!("failed to render field {}", spec.display_name()))
        })
        .collect()
}

/// Rendered fields joined into a single HTML fragment, one block per line.
pub fn render_document_html(store: &dyn FormStore, document: &FormDocument) -> Result<String> {
    let fields = render_document(store, document)?;
    Ok(fields
        .iter()
        .map(RenderedField::to_html)
        .collect::<Vec<_>>()
        .join("\n"))
}
