//! Insertion-ordered key/value overlays.
//!
//! Labels, registration options, and panel fields are all ordered
//! mappings with last-wins merge semantics: defaults keep their insertion
//! order, caller overrides update in place or append.

/// An insertion-ordered mapping stored as key/value pairs.
pub type OrderedMap<V> = Vec<(String, V)>;

/// Insert or update a key, preserving its position when it already exists.
pub fn upsert<V>(map: &mut OrderedMap<V>, key: impl Into<String>, value: V) {
    let key = key.into();
    match map.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => map.push((key, value)),
    }
}

/// Overlay `overrides` onto `defaults`, last-wins.
///
/// The merge is not commutative: a key present in both ends up with the
/// override's value, at the default's position.
pub fn overlay<V>(defaults: OrderedMap<V>, overrides: OrderedMap<V>) -> OrderedMap<V> {
    let mut merged = defaults;
    for (key, value) in overrides {
        upsert(&mut merged, key, value);
    }
    merged
}

/// Look up a key.
pub fn get<'a, V>(map: &'a OrderedMap<V>, key: &str) -> Option<&'a V> {
    map.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> OrderedMap<String> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn override_wins_on_collision() {
        let merged = overlay(pairs(&[("name", "Items"), ("menu_name", "Items")]), pairs(&[("name", "Things")]));
        assert_eq!(get(&merged, "name").unwrap(), "Things");
        assert_eq!(get(&merged, "menu_name").unwrap(), "Items");
    }

    #[test]
    fn default_only_keys_survive() {
        let merged = overlay(pairs(&[("a", "1"), ("b", "2")]), pairs(&[]));
        assert_eq!(merged.len(), 2);
        assert_eq!(get(&merged, "b").unwrap(), "2");
    }

    #[test]
    fn merge_is_not_commutative() {
        let forward = overlay(pairs(&[("k", "default")]), pairs(&[("k", "caller")]));
        let backward = overlay(pairs(&[("k", "caller")]), pairs(&[("k", "default")]));
        assert_eq!(get(&forward, "k").unwrap(), "caller");
        assert_eq!(get(&backward, "k").unwrap(), "default");
    }

    #[test]
    fn overridden_key_keeps_its_position() {
        let merged = overlay(
            pairs(&[("first", "1"), ("second", "2"), ("third", "3")]),
            pairs(&[("second", "two"), ("fourth", "4")]),
        );
        let keys: Vec<&str> = merged.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "third", "fourth"]);
        assert_eq!(get(&merged, "second").unwrap(), "two");
    }

    #[test]
    fn upsert_appends_new_keys() {
        let mut map = pairs(&[("a", "1")]);
        upsert(&mut map, "b", "2".to_string());
        assert_eq!(map.len(), 2);
        assert_eq!(map[1].0, "b");
    }
}
