use serde_json::Value;

use crate::{props::ChangeCallback, store::FormStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Added,
    Removed,
}

/// Next array for a multi-valued field after one toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayToggle {
    pub next: Vec<Value>,
    pub membership: Membership,
}

/// Members of an array-valued field. Missing or non-array values read as empty.
pub fn current_members(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Toggle `option` in `current`, always producing a fresh vector.
///
/// Members are treated as a set of scalars: removal drops every equal entry.
pub fn toggle_member(current: &[Value], option: &Value) -> ArrayToggle {
    if current.contains(option) {
        ArrayToggle {
            next: current
                .iter()
                .filter(|item| *item != option)
                .cloned()
                .collect(),
            membership: Membership::Removed,
        }
    } else {
        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend_from_slice(current);
        next.push(option.clone());
        ArrayToggle {
            next,
            membership: Membership::Added,
        }
    }
}

/// Read the field once, write the toggled array once, then notify `on_change`.
pub fn apply_toggle(
    store: &mut dyn FormStore,
    field: &str,
    option: &Value,
    on_change: Option<&ChangeCallback>,
) -> Value {
    let toggle = toggle_member(current_members(store.snapshot().value(field)), option);
    tracing::debug!(
        field,
        option = %option,
        membership = ?toggle.membership,
        "toggling array member"
    );
    let next = Value::Array(toggle.next);
    store.set_field_value(field, next.clone());
    if let Some(callback) = on_change {
        callback(&next);
    }
    next
}
