//! Known-keys merge — the single update algorithm for settings documents.
//!
//! Every mutable settings object in sprout is updated the same way: a
//! partial document is merged into the existing one, overwriting only keys
//! the existing document already has. Keys never appear or disappear, so
//! the shape of a settings object is fixed at creation for the lifetime of
//! the process.

use serde_json::Value;

/// Merge `proposed` into `current`, overwriting known keys only.
///
/// For every key present in **both** objects the current value is replaced
/// by the proposed one; nested objects are merged recursively key-by-key
/// rather than replaced wholesale. Keys absent from `current` are ignored.
/// Non-object values (including arrays) are overwritten in place.
pub fn update_params(current: &mut Value, proposed: &Value) {
    let (Value::Object(current), Value::Object(proposed)) = (current, proposed) else {
        return;
    };
    for (key, slot) in current.iter_mut() {
        if let Some(incoming) = proposed.get(key) {
            if slot.is_object() && incoming.is_object() {
                update_params(slot, incoming);
            } else {
                *slot = incoming.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_overwrite_keys_present_in_both() {
        let mut current = json!({"enabled": false, "interval": 60});
        update_params(&mut current, &json!({"enabled": true}));
        assert_eq!(current, json!({"enabled": true, "interval": 60}));
    }

    #[test]
    fn should_ignore_keys_absent_from_current() {
        let mut current = json!({"enabled": false});
        update_params(&mut current, &json!({"enabled": true, "bogus": 1}));
        assert_eq!(current, json!({"enabled": true}));
    }

    #[test]
    fn should_merge_nested_objects_key_by_key() {
        let mut current = json!({
            "watering": {"threshold": 40.0, "deviation": 5.0},
            "lighting": {"threshold": 25.0, "deviation": 2.0},
        });
        update_params(&mut current, &json!({"watering": {"threshold": 35.0}}));
        assert_eq!(
            current,
            json!({
                "watering": {"threshold": 35.0, "deviation": 5.0},
                "lighting": {"threshold": 25.0, "deviation": 2.0},
            })
        );
    }

    #[test]
    fn should_never_introduce_keys_in_nested_objects() {
        let mut current = json!({"outer": {"known": 1}});
        update_params(&mut current, &json!({"outer": {"known": 2, "extra": 3}}));
        assert_eq!(current, json!({"outer": {"known": 2}}));
    }

    #[test]
    fn should_be_idempotent() {
        let patch = json!({"enabled": true, "interval": 15});
        let mut once = json!({"enabled": false, "interval": 60});
        update_params(&mut once, &patch);
        let mut twice = once.clone();
        update_params(&mut twice, &patch);
        assert_eq!(once, twice);
    }

    #[test]
    fn should_replace_non_object_values_wholesale() {
        let mut current = json!({"tags": ["a", "b"], "interval": 60});
        update_params(&mut current, &json!({"tags": ["c"]}));
        assert_eq!(current, json!({"tags": ["c"], "interval": 60}));
    }

    #[test]
    fn should_do_nothing_when_either_side_is_not_an_object() {
        let mut current = json!({"enabled": false});
        update_params(&mut current, &json!(42));
        assert_eq!(current, json!({"enabled": false}));

        let mut scalar = json!(42);
        update_params(&mut scalar, &json!({"enabled": true}));
        assert_eq!(scalar, json!(42));
    }

    #[test]
    fn should_do_nothing_for_empty_patch() {
        let mut current = json!({"enabled": false, "interval": 60});
        let original = current.clone();
        update_params(&mut current, &json!({}));
        assert_eq!(current, original);
    }
}
