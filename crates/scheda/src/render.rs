//! HTML control rendering for the fixed field-type set.
//!
//! Controls are emitted as plain HTML fragments; the structure is fixed
//! (label + input per field) but only the field-type-to-control mapping
//! and the storage key in the `name` attribute are contractual.

use crate::types::{FieldType, PanelRegion};

/// Stored value a checkbox compares against to decide checked state.
const CHECKBOX_SENTINEL: &str = "1";

/// Escape text for use in HTML attribute values and element bodies.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Normalize a stored or option value before comparison.
///
/// Pre-selection compares trimmed strings on both sides, so `"1"` and a
/// numeric `1` stringified upstream compare equal without guessing at
/// numeric intent.
fn loosely_equals(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

/// Render the label + input control for one field.
pub fn render_field(
    field_type: &FieldType,
    name: &str,
    label: &str,
    value: Option<&str>,
    region: PanelRegion,
) -> String {
    let mut html = render_label(label, name);
    html.push_str(&render_control(field_type, name, value, region));
    html
}

fn render_label(label: &str, name: &str) -> String {
    format!(
        r#"<label for="{}" style="float: left; width: 10em;">{}</label>"#,
        html_escape(name),
        html_escape(label)
    )
}

fn render_control(
    field_type: &FieldType,
    name: &str,
    value: Option<&str>,
    region: PanelRegion,
) -> String {
    let name = html_escape(name);

    match field_type {
        FieldType::Text => {
            let size = match region {
                PanelRegion::Side => 28,
                PanelRegion::Normal => 50,
            };
            let val = value.map(html_escape).unwrap_or_default();
            format!(
                r#"<input type="text" id="{name}" name="{name}" value="{val}" size="{size}" />"#
            )
        }

        FieldType::Textarea => {
            let val = value.map(html_escape).unwrap_or_default();
            format!(
                r#"<textarea id="{name}" name="{name}" cols="50" rows="5">{val}</textarea>"#
            )
        }

        FieldType::Checkbox => {
            let checked = value.is_some_and(|v| loosely_equals(v, CHECKBOX_SENTINEL));
            let checked_attr = if checked { r#" checked="checked""# } else { "" };
            format!(
                r#"<input type="checkbox" id="{name}" name="{name}" value="1"{checked_attr} />"#
            )
        }

        FieldType::Select { options } => {
            let mut html = format!(r#"<select id="{name}" name="{name}">"#);
            for (key, option_label) in options {
                let selected = value.is_some_and(|v| loosely_equals(key, v));
                let selected_attr = if selected { r#" selected="selected""# } else { "" };
                html.push_str(&format!(
                    "<option value=\"{}\"{selected_attr}>{}</option>\n",
                    html_escape(key),
                    html_escape(option_label)
                ));
            }
            html.push_str("</select>");
            html
        }
    }
}
