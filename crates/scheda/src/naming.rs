//! Machine name derivation and the storage key scheme.
//!
//! Storage keys are the only persistent contract in this crate: stored
//! values survive across renders solely because render and save derive
//! the same key from the same panel id and field key.

/// Derive a machine name from a display name.
///
/// Lowercases and replaces spaces with `sep`. Applying the derivation to
/// its own output is a no-op.
pub fn machine_name(name: &str, sep: char) -> String {
    name.to_lowercase().replace(' ', &sep.to_string())
}

/// Composite storage key for a field within a panel.
///
/// The panel id uses `-` separators; storage keys normalize those to `_`
/// so the key is a single flat identifier: `<panel_id>_<field_key>`.
pub fn storage_key(panel_id: &str, field_key: &str) -> String {
    format!(
        "{}_{}",
        panel_id.replace('-', "_"),
        machine_name(field_key, '_')
    )
}

/// Naive English plural used for default labels.
pub fn pluralize(name: &str) -> String {
    format!("{name}s")
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn machine_name_lowercases_and_separates() {
        assert_eq!(machine_name("Studio", '-'), "studio");
        assert_eq!(machine_name("Address Details", '-'), "address-details");
        assert_eq!(machine_name("Address Details", '_'), "address_details");
    }

    #[test]
    fn machine_name_is_idempotent() {
        let once = machine_name("Address Details", '-');
        assert_eq!(machine_name(&once, '-'), once);
    }

    #[test]
    fn storage_key_normalizes_panel_separators() {
        assert_eq!(storage_key("address-details", "street"), "address_details_street");
    }

    #[test]
    fn storage_key_normalizes_field_spaces() {
        assert_eq!(storage_key("address-details", "Post Code"), "address_details_post_code");
    }

    #[test]
    fn pluralize_appends_s() {
        assert_eq!(pluralize("Studio"), "Studios");
    }
}
