//! Interaction bindings between rendered controls and the store.

pub mod array;
pub mod scalar;

use serde_json::Value;

use crate::{
    error::UsageError,
    props::ChangeCallback,
    store::{ChangeEvent, FormStore},
    validate::FieldValidator,
};

pub use array::{ArrayToggle, Membership, apply_toggle, current_members, toggle_member};
pub use scalar::{
    FileHandle, checkbox_checked, forward_change, projected_value, radio_checked, select_file,
    select_radio,
};

/// What a rendered control does when the user interacts with it.
#[derive(Debug, Clone)]
pub enum Binding {
    /// Checkbox: toggles `value` in the field's array.
    Toggle { field: String, value: Value },
    /// Radio: sets the field to `value`.
    Choose { field: String, value: Value },
    /// File input: sets the field to the selected file handle.
    File { field: String },
    /// Plain input, textarea or select: goes through the store's change handler.
    Change {
        field: String,
        validator: Option<FieldValidator>,
    },
}

/// A user event delivered to a bound control.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Click,
    SelectFile(FileHandle),
    Input(Value),
}

impl Interaction {
    fn name(&self) -> &'static str {
        match self {
            Interaction::Click => "click",
            Interaction::SelectFile(_) => "file selection",
            Interaction::Input(_) => "input",
        }
    }
}

impl Binding {
    pub fn field(&self) -> &str {
        match self {
            Binding::Toggle { field, .. }
            | Binding::Choose { field, .. }
            | Binding::File { field }
            | Binding::Change { field, .. } => field,
        }
    }

    /// Option value owned by the control, for checkboxes and radios.
    pub fn option_value(&self) -> Option<&Value> {
        match self {
            Binding::Toggle { value, .. } | Binding::Choose { value, .. } => Some(value),
            Binding::File { .. } | Binding::Change { .. } => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Binding::Toggle { .. } => "checkbox",
            Binding::Choose { .. } => "radio",
            Binding::File { .. } => "file",
            Binding::Change { .. } => "input",
        }
    }

    /// Apply `interaction`: one store write, then the `on_change` observer.
    /// Returns the value written.
    pub fn dispatch(
        &self,
        store: &mut dyn FormStore,
        interaction: Interaction,
        on_change: Option<&ChangeCallback>,
    ) -> Result<Value, UsageError> {
        match (self, interaction) {
            (Binding::Toggle { field, value }, Interaction::Click) => {
                Ok(apply_toggle(store, field, value, on_change))
            }
            (Binding::Choose { field, value }, Interaction::Click) => {
                Ok(select_radio(store, field, value, on_change))
            }
            (Binding::File { field }, Interaction::SelectFile(file)) => {
                select_file(store, field, &file, on_change)
            }
            (Binding::Change { field, validator }, Interaction::Input(value)) => {
                let event = ChangeEvent {
                    name: field.clone(),
                    value,
                };
                Ok(forward_change(store, &event, validator.as_ref(), on_change))
            }
            (binding, interaction) => Err(UsageError::UnsupportedInteraction {
                field: binding.field().to_string(),
                binding: binding.kind(),
                interaction: interaction.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreWrite};
    use serde_json::json;

    #[test]
    fn mismatched_interaction_is_rejected_without_writes() {
        let mut store = MemoryStore::default();
        let binding = Binding::File {
            field: "avatar".into(),
        };
        let err = binding
            .dispatch(&mut store, Interaction::Click, None)
            .unwrap_err();
        assert_eq!(
            err,
            UsageError::UnsupportedInteraction {
                field: "avatar".into(),
                binding: "file",
                interaction: "click",
            }
        );
        assert!(store.writes().is_empty());
    }

    #[test]
    fn change_binding_uses_generic_handler() {
        let mut store = MemoryStore::default();
        let binding = Binding::Change {
            field: "email".into(),
            validator: None,
        };
        let written = binding
            .dispatch(&mut store, Interaction::Input(json!("a@b.c")), None)
            .unwrap();
        assert_eq!(written, json!("a@b.c"));
        assert_eq!(
            store.writes(),
            &[StoreWrite::HandleChange {
                name: "email".into(),
                value: json!("a@b.c"),
            }]
        );
    }
}
