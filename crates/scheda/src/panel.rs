//! Edit panels: grouped custom fields on a record's edit screen.

use std::collections::{BTreeMap, HashMap};

use crate::merge::{OrderedMap, upsert};
use crate::naming::{machine_name, storage_key};
use crate::render::{html_escape, render_field};
use crate::types::{FieldType, PanelRegion};

/// A titled group of fields laid out in two-column floats.
///
/// Fields live in indexed columns; the panel also keeps a flattened map
/// of every field key so the save path knows which storage keys to read
/// and write. Later registrations win on key collision, in the column and
/// in the flattened map alike.
#[derive(Debug, Clone)]
pub struct EditPanel {
    id: String,
    title: String,
    description: Option<String>,
    region: PanelRegion,
    columns: BTreeMap<u32, OrderedMap<FieldType>>,
    fields: OrderedMap<FieldType>,
}

impl EditPanel {
    /// Create a panel; `fields` become column 0.
    pub fn new<S: Into<String>>(
        title: &str,
        fields: impl IntoIterator<Item = (S, FieldType)>,
        description: Option<&str>,
    ) -> Self {
        let mut panel = Self {
            id: machine_name(title, '-'),
            title: title.to_string(),
            description: description.map(str::to_string),
            region: PanelRegion::default(),
            columns: BTreeMap::new(),
            fields: Vec::new(),
        };
        panel.add_fields(fields, 0);
        panel
    }

    /// Panel identifier derived from the title.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn region(&self) -> PanelRegion {
        self.region
    }

    /// Move the panel to a different screen region.
    pub fn set_region(&mut self, region: PanelRegion) {
        self.region = region;
    }

    /// Builder form of [`set_region`](Self::set_region).
    pub fn in_region(mut self, region: PanelRegion) -> Self {
        self.region = region;
        self
    }

    /// Merge fields into a column, creating it if absent.
    ///
    /// A key already present in the column or in the flattened map takes
    /// the new descriptor.
    pub fn add_fields<S: Into<String>>(
        &mut self,
        fields: impl IntoIterator<Item = (S, FieldType)>,
        column: u32,
    ) {
        let slot = self.columns.entry(column).or_default();
        for (key, field_type) in fields {
            let key = key.into();
            upsert(slot, key.clone(), field_type.clone());
            upsert(&mut self.fields, key, field_type);
        }
    }

    /// Flattened field map used by the save path.
    pub fn fields(&self) -> &OrderedMap<FieldType> {
        &self.fields
    }

    /// Render the panel against a record's stored values.
    ///
    /// Values are looked up by composite storage key; the first stored
    /// value wins when the host returns several.
    pub fn render(&self, stored_values: &HashMap<String, Vec<String>>) -> String {
        let mut html = String::new();

        if let Some(description) = &self.description {
            html.push_str(&format!("<p>{}</p>", html_escape(description)));
        }

        html.push_str(r#"<div style="overflow:hidden">"#);
        for fields in self.columns.values() {
            html.push_str(r#"<div style="width: 50%; float: left;">"#);
            for (key, field_type) in fields {
                let name = storage_key(&self.id, key);
                let value = stored_values
                    .get(&name)
                    .and_then(|values| values.first())
                    .map(String::as_str);
                html.push_str("<p>");
                html.push_str(&render_field(field_type, &name, key, value, self.region));
                html.push_str("</p>");
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");

        html
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::merge::get;

    fn address_panel() -> EditPanel {
        EditPanel::new(
            "Address Details",
            [
                ("street", FieldType::Text),
                ("bio", FieldType::Textarea),
            ],
            Some("Where the studio lives"),
        )
    }

    #[test]
    fn id_derives_from_title() {
        assert_eq!(address_panel().id(), "address-details");
    }

    #[test]
    fn initial_fields_land_in_column_zero() {
        let panel = address_panel();
        assert_eq!(panel.fields().len(), 2);
        assert_eq!(panel.fields()[0].0, "street");
    }

    #[test]
    fn add_fields_merges_same_column() {
        let mut panel = address_panel();
        panel.add_fields([("street", FieldType::Textarea), ("city", FieldType::Text)], 0);

        // Second registration wins for the duplicate key.
        assert!(matches!(
            get(panel.fields(), "street").unwrap(),
            FieldType::Textarea
        ));
        assert_eq!(panel.fields().len(), 3);
    }

    #[test]
    fn add_fields_creates_new_columns() {
        let mut panel = address_panel();
        panel.add_fields([("country", FieldType::select([("uk", "UK")]))], 1);
        assert_eq!(panel.fields().len(), 3);

        let html = panel.render(&HashMap::new());
        assert_eq!(html.matches(r#"width: 50%"#).count(), 2);
    }

    #[test]
    fn render_emits_description_and_layout() {
        let html = address_panel().render(&HashMap::new());
        assert!(html.starts_with("<p>Where the studio lives</p>"));
        assert!(html.contains(r#"<div style="overflow:hidden">"#));
        assert!(html.contains(r#"name="address_details_street""#));
    }

    #[test]
    fn render_skips_missing_description() {
        let panel = EditPanel::new("Bare", [("a", FieldType::Text)], None);
        assert!(!panel.render(&HashMap::new()).starts_with("<p>"));
    }

    #[test]
    fn render_prepopulates_from_stored_values() {
        let mut values = HashMap::new();
        values.insert(
            "address_details_street".to_string(),
            vec!["10 High St".to_string(), "ignored".to_string()],
        );
        let html = address_panel().render(&values);
        assert!(html.contains(r#"value="10 High St""#));
        assert!(!html.contains("ignored"));
    }

    #[test]
    fn region_affects_rendered_text_size() {
        let mut panel = address_panel();
        assert!(panel.render(&HashMap::new()).contains(r#"size="28""#));
        panel.set_region(PanelRegion::Normal);
        assert!(panel.render(&HashMap::new()).contains(r#"size="50""#));
    }

    #[test]
    fn field_keys_with_spaces_normalize_in_storage_key() {
        let panel = EditPanel::new("Contact", [("Post Code", FieldType::Text)], None);
        let html = panel.render(&HashMap::new());
        assert!(html.contains(r#"name="contact_post_code""#));
        // The visible label keeps the original key text.
        assert!(html.contains(">Post Code</label>"));
    }
}
