use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;
use crate::{
    document::{FormDocument, parse_form_document},
    store::StoreSnapshot,
};

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Parse a form document and check it against the form schema.
pub fn load_form_document(contents: &str, format: DocumentFormat) -> Result<FormDocument> {
    let value = parse_document_str(contents, format)?;
    parse_form_document(value)
}

/// Parse a store snapshot (`values`, `errors`, `touched`, `submitCount`,
/// `ezUse`, `ezCss`).
pub fn load_snapshot(contents: &str, format: DocumentFormat) -> Result<StoreSnapshot> {
    let value = parse_document_str(contents, format)?;
    serde_json::from_value(value).context("failed to read store snapshot")
}
