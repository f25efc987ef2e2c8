//! Deep merge used by the state-update protocol.

use crate::value::Value;
use std::collections::BTreeMap;

/// Merge `partial` into `target`.
///
/// Structured values merge recursively into the matching slot, which is reset
/// to an empty value of the same shape when it is missing or shaped
/// differently. Scalars overwrite. Keys absent from `partial` are kept; arrays
/// merge index-wise and grow as needed.
pub fn deep_merge(target: &mut Value, partial: &Value) {
    match partial {
        Value::Object(entries) => {
            if !matches!(target, Value::Object(_)) {
                *target = Value::Object(BTreeMap::new());
            }
            if let Value::Object(slots) = target {
                for (key, value) in entries {
                    if value.is_structured() {
                        let slot = slots.entry(key.clone()).or_insert(Value::Null);
                        deep_merge(slot, value);
                    } else {
                        slots.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        Value::Array(items) => {
            if !matches!(target, Value::Array(_)) {
                *target = Value::Array(Vec::new());
            }
            if let Value::Array(slots) = target {
                if slots.len() < items.len() {
                    slots.resize(items.len(), Value::Null);
                }
                for (slot, value) in slots.iter_mut().zip(items) {
                    if value.is_structured() {
                        deep_merge(slot, value);
                    } else {
                        *slot = value.clone();
                    }
                }
            }
        }
        scalar => *target = scalar.clone(),
    }
}
