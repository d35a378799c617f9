use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::array::current_members;
use crate::{
    error::UsageError,
    props::ChangeCallback,
    store::{ChangeEvent, FormStore, StoreSnapshot},
    validate::FieldValidator,
};

/// A file chosen through a file input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub mime_type: Option<String>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// A checkbox is checked when its value is a member of the field's array,
/// even for a lone checkbox.
pub fn checkbox_checked(snapshot: &StoreSnapshot, field: &str, option: &Value) -> bool {
    current_members(snapshot.value(field)).contains(option)
}

pub fn radio_checked(snapshot: &StoreSnapshot, field: &str, option: &Value) -> bool {
    snapshot.value(field) == Some(option)
}

/// Store value rendered into a plain control.
pub fn projected_value(snapshot: &StoreSnapshot, field: &str) -> String {
    match snapshot.value(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn select_radio(
    store: &mut dyn FormStore,
    field: &str,
    option: &Value,
    on_change: Option<&ChangeCallback>,
) -> Value {
    tracing::debug!(field, option = %option, "selecting radio option");
    store.set_field_value(field, option.clone());
    notify(on_change, option);
    option.clone()
}

pub fn select_file(
    store: &mut dyn FormStore,
    field: &str,
    file: &FileHandle,
    on_change: Option<&ChangeCallback>,
) -> Result<Value, UsageError> {
    tracing::debug!(field, file = %file.name, "selecting file");
    let value = file.to_value().map_err(|err| UsageError::UnencodableFile {
        field: field.to_string(),
        reason: err.to_string(),
    })?;
    store.set_field_value(field, value.clone());
    notify(on_change, &value);
    Ok(value)
}

/// Plain controls go through the store's generic handler, carrying the
/// field's validator along.
pub fn forward_change(
    store: &mut dyn FormStore,
    event: &ChangeEvent,
    validator: Option<&FieldValidator>,
    on_change: Option<&ChangeCallback>,
) -> Value {
    tracing::debug!(field = %event.name, "forwarding change");
    store.handle_change(event, validator);
    notify(on_change, &event.value);
    event.value.clone()
}

fn notify(on_change: Option<&ChangeCallback>, value: &Value) {
    if let Some(callback) = on_change {
        callback(value);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc, sync::Arc};

    use super::*;
    use crate::store::{MemoryStore, StoreWrite};
    use serde_json::json;

    #[test]
    fn lone_checkbox_reads_array_membership() {
        let store = MemoryStore::default().with_value("terms", json!([true]));
        assert!(checkbox_checked(store.snapshot(), "terms", &json!(true)));
        assert!(!checkbox_checked(store.snapshot(), "terms", &json!("yes")));
        assert!(!checkbox_checked(store.snapshot(), "missing", &json!(true)));
    }

    #[test]
    fn radio_checked_uses_strict_equality() {
        let store = MemoryStore::default().with_value("size", json!(2));
        assert!(radio_checked(store.snapshot(), "size", &json!(2)));
        assert!(!radio_checked(store.snapshot(), "size", &json!("2")));
    }

    #[test]
    fn projected_value_renders_scalars() {
        let store = MemoryStore::default()
            .with_value("name", "Ada")
            .with_value("age", 36)
            .with_value("none", Value::Null);
        assert_eq!(projected_value(store.snapshot(), "name"), "Ada");
        assert_eq!(projected_value(store.snapshot(), "age"), "36");
        assert_eq!(projected_value(store.snapshot(), "none"), "");
        assert_eq!(projected_value(store.snapshot(), "missing"), "");
    }

    #[test]
    fn radio_selection_sets_value_and_notifies() {
        let mut store = MemoryStore::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let callback: ChangeCallback = Arc::new(move |_: &Value| counter.set(counter.get() + 1));
        select_radio(&mut store, "size", &json!("m"), Some(&callback));
        assert_eq!(store.snapshot().value("size"), Some(&json!("m")));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn file_selection_binds_to_the_field_name() {
        let mut store = MemoryStore::default();
        let file = FileHandle::new("cv.pdf", 1024).with_mime_type("application/pdf");
        select_file(&mut store, "resume", &file, None).unwrap();
        assert_eq!(
            store.writes(),
            &[StoreWrite::SetFieldValue {
                name: "resume".into(),
                value: json!({"name": "cv.pdf", "size": 1024, "mimeType": "application/pdf"}),
            }]
        );
    }

    #[test]
    fn file_handle_value_matches_its_serde_shape() {
        let bare = FileHandle::new("me.png", 12).to_value().unwrap();
        assert_eq!(bare, json!({"name": "me.png", "size": 12, "mimeType": null}));
        let back: FileHandle = serde_json::from_value(bare).unwrap();
        assert_eq!(back, FileHandle::new("me.png", 12));
    }
}
