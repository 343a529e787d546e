//! Configuration types for content types, taxonomies, and fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::merge::{OrderedMap, overlay};
use crate::naming::{machine_name, pluralize};

/// Field type variants with type-specific configuration.
///
/// The set of field types is closed; panels dispatch on this enum when
/// rendering and the save path treats every variant as a single stored
/// string value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line text input.
    Text,

    /// Multi-line text input.
    Textarea,

    /// Single checkbox storing `"1"` when checked.
    Checkbox,

    /// Dropdown select over an ordered stored-value → display-label list.
    Select { options: Vec<(String, String)> },
}

impl FieldType {
    /// Create a select field from value/label pairs.
    pub fn select<K, L>(options: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        Self::Select {
            options: options
                .into_iter()
                .map(|(k, l)| (k.into(), l.into()))
                .collect(),
        }
    }

    /// Get the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Checkbox => "checkbox",
            FieldType::Select { .. } => "select",
        }
    }
}

/// Screen region a panel is placed in on the edit page.
///
/// Text inputs render narrower in the sidebar than in the main column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelRegion {
    #[default]
    Side,
    Normal,
}

impl PanelRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelRegion::Side => "side",
            PanelRegion::Normal => "normal",
        }
    }
}

/// Caller overrides for a content type definition.
#[derive(Debug, Clone, Default)]
pub struct TypeOverrides {
    pub labels: OrderedMap<String>,
    pub options: OrderedMap<Value>,
    pub supports: Option<Vec<String>>,
}

impl TypeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a label.
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }

    /// Override a registration option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }

    /// Replace the supported feature set.
    pub fn supports<S: Into<String>>(mut self, features: impl IntoIterator<Item = S>) -> Self {
        self.supports = Some(features.into_iter().map(Into::into).collect());
        self
    }
}

/// Caller overrides for a taxonomy definition.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyOverrides {
    pub labels: OrderedMap<String>,
    pub options: OrderedMap<Value>,
}

impl TaxonomyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a label.
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }

    /// Override a registration option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }
}

/// A merged content type definition, ready for host registration.
///
/// The machine name is derived once from the display name and never
/// changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTypeConfig {
    pub type_name: String,
    pub singular_label: String,
    pub plural_label: String,
    pub labels: OrderedMap<String>,
    pub options: OrderedMap<Value>,
    pub supports: Vec<String>,
}

impl ContentTypeConfig {
    /// Merge a fixed default set with caller overrides, caller wins.
    pub fn merged(name: &str, overrides: TypeOverrides) -> Self {
        let plural = pluralize(name);
        let defaults = vec![
            ("name".into(), plural.clone()),
            ("singular_name".into(), name.to_string()),
            ("add_new".into(), "Add new".into()),
            ("add_new_item".into(), format!("Add New {name}")),
            ("edit_item".into(), format!("Edit {name}")),
            ("new_item".into(), format!("New {name}")),
            ("all_items".into(), format!("All {plural}")),
            ("view_item".into(), format!("View {name}")),
            ("search_items".into(), format!("Search {plural}")),
            ("not_found".into(), format!("No {} found", plural.to_lowercase())),
            (
                "not_found_in_trash".into(),
                format!("No {} found in Trash", plural.to_lowercase()),
            ),
            ("parent_item_colon".into(), String::new()),
            ("menu_name".into(), plural.clone()),
        ];
        let default_options = vec![
            ("label".into(), Value::String(plural.clone())),
            ("public".into(), Value::Bool(true)),
            ("show_ui".into(), Value::Bool(true)),
            ("show_in_nav_menus".into(), Value::Bool(true)),
            ("builtin".into(), Value::Bool(false)),
        ];

        Self {
            type_name: machine_name(name, '-'),
            singular_label: name.to_string(),
            plural_label: plural,
            labels: overlay(defaults, overrides.labels),
            options: overlay(default_options, overrides.options),
            supports: overrides
                .supports
                .unwrap_or_else(|| vec!["title".into(), "editor".into()]),
        }
    }
}

/// A merged taxonomy definition.
///
/// Owned by exactly one manager; the taxonomy list order is preserved
/// when registering and associating with the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    pub name: String,
    pub labels: OrderedMap<String>,
    pub options: OrderedMap<Value>,
}

impl TaxonomyConfig {
    /// Merge a fixed default set with caller overrides, caller wins.
    pub fn merged(name: &str, overrides: TaxonomyOverrides) -> Self {
        let plural = pluralize(name);
        let defaults = vec![
            ("name".into(), plural.clone()),
            ("singular_name".into(), name.to_string()),
            ("search_items".into(), format!("Search {plural}")),
            ("all_items".into(), format!("All {plural}")),
            ("parent_item".into(), format!("Parent {name}")),
            ("parent_item_colon".into(), format!("Parent {name}:")),
            ("edit_item".into(), format!("Edit {name}")),
            ("update_item".into(), format!("Update {name}")),
            ("add_new_item".into(), format!("Add New {name}")),
            ("new_item_name".into(), format!("New {name} Name")),
            ("menu_name".into(), plural.clone()),
        ];
        let default_options = vec![
            ("label".into(), Value::String(plural)),
            ("public".into(), Value::Bool(true)),
            ("show_ui".into(), Value::Bool(true)),
            ("show_in_nav_menus".into(), Value::Bool(true)),
            ("builtin".into(), Value::Bool(false)),
        ];

        Self {
            name: machine_name(name, '-'),
            labels: overlay(defaults, overrides.labels),
            options: overlay(default_options, overrides.options),
        }
    }
}

/// The parsed form submission handed to the save callback.
///
/// Values are keyed by composite storage key. A key absent from the
/// submission means the stored value is cleared on save.
#[derive(Debug, Clone, Default)]
pub struct SubmittedForm {
    pub autosave: bool,
    pub token: Option<String>,
    values: HashMap<String, String>,
}

impl SubmittedForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anti-forgery token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Mark this submission as autosave-triggered.
    pub fn autosave(mut self) -> Self {
        self.autosave = true;
        self
    }

    /// Add a submitted value keyed by composite storage key.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Look up a submitted value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::merge::get;

    #[test]
    fn merged_type_derives_machine_name() {
        let config = ContentTypeConfig::merged("Studio", TypeOverrides::new());
        assert_eq!(config.type_name, "studio");
        assert_eq!(config.plural_label, "Studios");
    }

    #[test]
    fn merged_type_defaults() {
        let config = ContentTypeConfig::merged("Studio", TypeOverrides::new());
        assert_eq!(config.supports, vec!["title", "editor"]);
        assert_eq!(get(&config.labels, "all_items").unwrap(), "All Studios");
        assert_eq!(get(&config.labels, "not_found").unwrap(), "No studios found");
        assert_eq!(get(&config.options, "public").unwrap(), &Value::Bool(true));
    }

    #[test]
    fn caller_labels_win() {
        let config = ContentTypeConfig::merged(
            "Studio",
            TypeOverrides::new().label("menu_name", "Recording Studios"),
        );
        assert_eq!(get(&config.labels, "menu_name").unwrap(), "Recording Studios");
        // Untouched defaults survive.
        assert_eq!(get(&config.labels, "singular_name").unwrap(), "Studio");
    }

    #[test]
    fn caller_options_and_supports_win() {
        let config = ContentTypeConfig::merged(
            "Studio",
            TypeOverrides::new()
                .option("public", false)
                .supports(["title"]),
        );
        assert_eq!(get(&config.options, "public").unwrap(), &Value::Bool(false));
        assert_eq!(config.supports, vec!["title"]);
    }

    #[test]
    fn merged_taxonomy_defaults() {
        let tax = TaxonomyConfig::merged("Genre", TaxonomyOverrides::new());
        assert_eq!(tax.name, "genre");
        assert_eq!(get(&tax.labels, "name").unwrap(), "Genres");
        assert_eq!(get(&tax.labels, "new_item_name").unwrap(), "New Genre Name");
    }

    #[test]
    fn field_type_names() {
        assert_eq!(FieldType::Text.type_name(), "text");
        assert_eq!(
            FieldType::select([("uk", "United Kingdom")]).type_name(),
            "select"
        );
    }

    #[test]
    fn field_type_serialization_is_tagged() {
        let json = serde_json::to_string(&FieldType::Textarea).unwrap();
        assert!(json.contains("textarea"));
        let parsed: FieldType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.type_name(), "textarea");
    }

    #[test]
    fn submitted_form_builder() {
        let form = SubmittedForm::new()
            .token("abc")
            .value("address_details_street", "10 High St");
        assert!(!form.autosave);
        assert_eq!(form.get("address_details_street"), Some("10 High St"));
        assert_eq!(form.get("missing"), None);
    }
}
