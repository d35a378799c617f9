use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{theme::CssOverrides, validate::FieldValidator};

/// Form-wide configuration read by every field: theme name and extra classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    pub ez_use: Option<String>,
    pub ez_css: CssOverrides,
}

/// Read-only view of the external store at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub values: IndexMap<String, Value>,
    pub errors: IndexMap<String, String>,
    pub touched: IndexMap<String, bool>,
    pub submit_count: u32,
    #[serde(flatten)]
    pub config: FormConfig,
}

impl StoreSnapshot {
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }
}

/// Generic change event fed to [`FormStore::handle_change`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub name: String,
    pub value: Value,
}

impl ChangeEvent {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Boundary to the form-state manager that owns values, errors and touched
/// flags. The core reads through [`FormStore::snapshot`] and writes only via
/// the two entry points below.
pub trait FormStore {
    fn snapshot(&self) -> &StoreSnapshot;

    fn set_field_value(&mut self, name: &str, value: Value);

    /// Generic event-to-value adapter for plain inputs. The field's validator,
    /// if any, is passed along so the store can schedule validation.
    fn handle_change(&mut self, event: &ChangeEvent, validator: Option<&FieldValidator>);
}

/// One write recorded by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreWrite {
    SetFieldValue { name: String, value: Value },
    HandleChange { name: String, value: Value },
}

/// In-memory store used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: StoreSnapshot,
    validators: IndexMap<String, FieldValidator>,
    writes: Vec<StoreWrite>,
}

impl MemoryStore {
    pub fn new(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.snapshot.config = config;
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.snapshot.values.insert(name.into(), value.into());
        self
    }

    pub fn register_validator(&mut self, name: impl Into<String>, validator: FieldValidator) {
        self.validators.insert(name.into(), validator);
    }

    pub fn touch(&mut self, name: impl Into<String>) {
        self.snapshot.touched.insert(name.into(), true);
    }

    pub fn set_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.snapshot.errors.insert(name.into(), message.into());
    }

    pub fn clear_error(&mut self, name: &str) {
        self.snapshot.errors.shift_remove(name);
    }

    /// Count a submission attempt and mark every known field as touched.
    pub fn submit(&mut self) {
        self.snapshot.submit_count = self.snapshot.submit_count.saturating_add(1);
        let names = self.snapshot.values.keys().cloned().collect::<Vec<_>>();
        for name in names {
            self.snapshot.touched.insert(name, true);
        }
    }

    pub fn writes(&self) -> &[StoreWrite] {
        &self.writes
    }

    pub fn into_snapshot(self) -> StoreSnapshot {
        self.snapshot
    }

    fn run_validator(&mut self, name: &str, validator: Option<&FieldValidator>) {
        let validator = validator.or_else(|| self.validators.get(name));
        let Some(validator) = validator else {
            return;
        };
        let value = self.snapshot.values.get(name).cloned().unwrap_or(Value::Null);
        match validator.validate(&value) {
            Some(message) => {
                self.snapshot.errors.insert(name.to_string(), message);
            }
            None => {
                self.snapshot.errors.shift_remove(name);
            }
        }
    }
}

impl FormStore for MemoryStore {
    fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }

    fn set_field_value(&mut self, name: &str, value: Value) {
        self.writes.push(StoreWrite::SetFieldValue {
            name: name.to_string(),
            value: value.clone(),
        });
        self.snapshot.values.insert(name.to_string(), value);
        self.run_validator(name, None);
    }

    fn handle_change(&mut self, event: &ChangeEvent, validator: Option<&FieldValidator>) {
        self.writes.push(StoreWrite::HandleChange {
            name: event.name.clone(),
            value: event.value.clone(),
        });
        self.snapshot
            .values
            .insert(event.name.clone(), event.value.clone());
        if let Some(validator) = validator {
            self.validators
                .insert(event.name.clone(), validator.clone());
        }
        self.run_validator(&event.name, validator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_deserializes_camel_case_keys() {
        let snapshot: StoreSnapshot = serde_json::from_value(json!({
            "values": {"email": "a@b"},
            "errors": {"email": "Invalid email"},
            "touched": {"email": true},
            "submitCount": 2,
            "ezUse": "bootstrap",
            "ezCss": {"label": "strong"}
        }))
        .unwrap();
        assert_eq!(snapshot.submit_count, 2);
        assert_eq!(snapshot.config.ez_use.as_deref(), Some("bootstrap"));
        assert_eq!(snapshot.config.ez_css.label.as_deref(), Some("strong"));
        assert_eq!(snapshot.error("email"), Some("Invalid email"));
    }

    #[test]
    fn set_field_value_records_one_write() {
        let mut store = MemoryStore::default();
        store.set_field_value("colors", json!(["r"]));
        assert_eq!(store.snapshot().value("colors"), Some(&json!(["r"])));
        assert_eq!(
            store.writes(),
            &[StoreWrite::SetFieldValue {
                name: "colors".into(),
                value: json!(["r"]),
            }]
        );
    }

    #[test]
    fn handle_change_runs_forwarded_validator() {
        let mut store = MemoryStore::default();
        let validator = FieldValidator::from_fn(|value| {
            (value.as_str() == Some("")).then(|| "required".to_string())
        });
        store.handle_change(&ChangeEvent::new("name", ""), Some(&validator));
        assert_eq!(store.snapshot().error("name"), Some("required"));
        store.handle_change(&ChangeEvent::new("name", "Ada"), None);
        assert_eq!(store.snapshot().error("name"), None);
    }

    #[test]
    fn submit_counts_and_touches() {
        let mut store = MemoryStore::default().with_value("email", "");
        store.submit();
        assert_eq!(store.snapshot().submit_count, 1);
        assert_eq!(store.snapshot().touched.get("email"), Some(&true));
    }
}
