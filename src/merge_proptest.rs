//! Property-based tests for overlay and override functions.
//!
//! These tests use proptest to generate random documents and overrides and
//! verify that the merge invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::ComponentName;
    use crate::merge::overrides::{apply_set_flags, parse_overrides, read_override};
    use crate::merge::yaml::overlay;
    use crate::phases::collate::sort_manifests;
    use crate::phases::operator::ManifestSet;
    use proptest::prelude::*;
    use serde_yaml::{Mapping, Value as YamlValue};

    fn scalar() -> impl Strategy<Value = YamlValue> {
        prop_oneof![
            any::<bool>().prop_map(YamlValue::Bool),
            any::<i64>().prop_map(YamlValue::from),
            "[a-z]{1,8}".prop_map(YamlValue::String),
        ]
    }

    fn document() -> impl Strategy<Value = YamlValue> {
        scalar().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(YamlValue::Sequence),
                prop::collection::btree_map("[a-d]", inner, 0..4).prop_map(|entries| {
                    let mut map = Mapping::new();
                    for (k, v) in entries {
                        map.insert(YamlValue::String(k), v);
                    }
                    YamlValue::Mapping(map)
                }),
            ]
        })
    }

    fn mapping() -> impl Strategy<Value = YamlValue> {
        prop::collection::btree_map("[a-d]", document(), 0..4).prop_map(|entries| {
            let mut map = Mapping::new();
            for (k, v) in entries {
                map.insert(YamlValue::String(k), v);
            }
            YamlValue::Mapping(map)
        })
    }

    // ============================================================================
    // overlay property tests
    // ============================================================================

    proptest! {
        /// Property: every top-level key of the overlay survives the merge
        #[test]
        fn overlay_keeps_every_overlay_key(base in mapping(), top in mapping()) {
            let merged = overlay(&base, &top);
            if let YamlValue::Mapping(top_map) = &top {
                for key in top_map.keys() {
                    prop_assert!(merged.get(key).is_some(), "lost key {:?}", key);
                }
            }
        }

        /// Property: base keys the overlay does not mention are untouched
        #[test]
        fn overlay_keeps_untouched_base_keys(base in mapping(), top in mapping()) {
            let merged = overlay(&base, &top);
            if let (YamlValue::Mapping(base_map), YamlValue::Mapping(top_map)) = (&base, &top) {
                for (key, value) in base_map {
                    if !top_map.contains_key(key) {
                        prop_assert_eq!(merged.get(key), Some(value));
                    }
                }
            }
        }

        /// Property: unless both sides are mappings, the overlay value wins
        #[test]
        fn overlay_non_mapping_replaces(base in document(), top in document()) {
            let merged = overlay(&base, &top);
            if !(base.is_mapping() && top.is_mapping()) {
                prop_assert_eq!(merged, top);
            }
        }

        /// Property: overlaying a document on itself changes nothing
        #[test]
        fn overlay_with_self_is_identity(doc in document()) {
            prop_assert_eq!(overlay(&doc, &doc), doc);
        }
    }

    // ============================================================================
    // override property tests
    // ============================================================================

    proptest! {
        /// Property: reading an override's path after applying it yields its value
        #[test]
        fn override_read_after_write(
            doc in mapping(),
            path in "[a-d]{1,3}(\\.[a-d]{1,3}){0,2}",
            value in "[a-z]{1,8}|[0-9]{1,4}|true|false",
        ) {
            let token = format!("{}={}", path, value);
            let overrides = parse_overrides(&[token.as_str()]).unwrap();
            match apply_set_flags(&doc, &[token.as_str()]) {
                Ok(result) => {
                    prop_assert_eq!(read_override(&result, &overrides[0]), Some(&overrides[0].value));
                }
                // Scalars in the way of the path are reported, never overwritten
                Err(e) => prop_assert!(e.to_string().contains("expected mapping")),
            }
        }

        /// Property: applying the same overrides twice equals applying them once
        #[test]
        fn overrides_are_idempotent(
            doc in mapping(),
            path in "[a-d]{1,3}(\\.[a-d]{1,3}){0,2}",
            value in "[a-z]{1,8}",
        ) {
            let token = format!("{}={}", path, value);
            if let Ok(once) = apply_set_flags(&doc, &[token.as_str()]) {
                let twice = apply_set_flags(&once, &[token.as_str()]).unwrap();
                prop_assert_eq!(once, twice);
            }
        }

        /// Property: the input document is never modified
        #[test]
        fn overrides_leave_input_untouched(doc in mapping(), value in "[a-z]{1,8}") {
            let before = doc.clone();
            let _ = apply_set_flags(&doc, &[format!("a.b={}", value)]);
            prop_assert_eq!(doc, before);
        }
    }

    // ============================================================================
    // collation property tests
    // ============================================================================

    proptest! {
        /// Property: sorted output depends only on the set's contents
        #[test]
        fn sort_manifests_is_deterministic(
            picks in prop::collection::vec((0usize..8, "[a-z: ]{0,16}"), 0..8)
        ) {
            let forward: ManifestSet = picks
                .iter()
                .map(|(i, text)| (ComponentName::ALL[*i], text.clone()))
                .collect();
            let mut reversed = ManifestSet::new();
            for (name, text) in &forward {
                reversed.insert(*name, text.clone());
            }

            let sorted = sort_manifests(&forward);
            prop_assert_eq!(&sorted, &sort_manifests(&reversed));
            prop_assert_eq!(sorted.len(), forward.len());
            for text in &sorted {
                prop_assert!(text.ends_with("\n---\n"));
            }
        }
    }
}
