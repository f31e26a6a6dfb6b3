//! Student information form
//!
//! Widget table for the 16 profile fields. Names match the serde names of
//! `StudentProfile`, so a submitted form deserializes straight into it.

use std::fmt::Write;

use dropout_core::StudentProfile;

use super::escape_html;

#[derive(Debug, Clone, Copy)]
pub enum Widget {
    Slider { min: f32, max: f32, step: f32 },
    Number { min: f32, max: f32, step: f32 },
    Select { options: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

const YES_NO: &[&str] = &["Yes", "No"];

/// Form fields in display order
pub const FORM_FIELDS: &[FormField] = &[
    FormField { name: "age", label: "Age", widget: Widget::Slider { min: 15.0, max: 22.0, step: 1.0 } },
    FormField { name: "gender", label: "Gender", widget: Widget::Select { options: &["Female", "Male"] } },
    FormField { name: "region", label: "Region", widget: Widget::Select { options: &["Rural", "Urban"] } },
    FormField {
        name: "family_income",
        label: "Family Income (₹)",
        widget: Widget::Number { min: 0.0, max: 100_000.0, step: 1000.0 },
    },
    FormField {
        name: "parental_education",
        label: "Parental Education",
        widget: Widget::Select { options: &["Primary", "Secondary", "Higher Education"] },
    },
    FormField {
        name: "distance_from_school",
        label: "Distance from School (km)",
        widget: Widget::Slider { min: 0.0, max: 50.0, step: 0.1 },
    },
    FormField { name: "absences", label: "Absences", widget: Widget::Number { min: 0.0, max: 100.0, step: 1.0 } },
    FormField { name: "failures", label: "Failures", widget: Widget::Number { min: 0.0, max: 10.0, step: 1.0 } },
    FormField {
        name: "study_time_category",
        label: "Study Time Category",
        widget: Widget::Select { options: &["1", "2", "3", "4"] },
    },
    FormField { name: "g1", label: "G1", widget: Widget::Slider { min: 0.0, max: 20.0, step: 1.0 } },
    FormField { name: "g2", label: "G2", widget: Widget::Slider { min: 0.0, max: 20.0, step: 1.0 } },
    FormField { name: "g3", label: "G3", widget: Widget::Slider { min: 0.0, max: 20.0, step: 1.0 } },
    FormField { name: "internet_access", label: "Internet Access", widget: Widget::Select { options: YES_NO } },
    FormField { name: "family_support", label: "Family Support", widget: Widget::Select { options: YES_NO } },
    FormField { name: "school_support", label: "School Support", widget: Widget::Select { options: YES_NO } },
    FormField { name: "activities", label: "Activities", widget: Widget::Select { options: YES_NO } },
];

/// Current value of a field as the form should show it
fn field_value(profile: &StudentProfile, values: &serde_json::Value, name: &str) -> String {
    // JSON widens f32 to f64, 17.3 would come back as 17.299999237060547
    if name == "distance_from_school" {
        return profile.distance_from_school.to_string();
    }

    match values.get(name) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Render the sidebar form pre-filled with `profile`
pub fn render_form(profile: &StudentProfile) -> String {
    let values = serde_json::to_value(profile).unwrap_or_default();
    let mut html = String::from(
        r#"<form class="sidebar" method="post" action="/predict">
<h2>📋 Student Information</h2>
"#,
    );

    for field in FORM_FIELDS {
        let value = escape_html(&field_value(profile, &values, field.name));
        let _ = write!(html, r#"<label for="{name}">{label}"#, name = field.name, label = field.label);

        match field.widget {
            Widget::Slider { min, max, step } => {
                let _ = write!(
                    html,
                    r#" <output id="{name}_out">{value}</output></label>
<input type="range" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" oninput="document.getElementById('{name}_out').value=this.value">
"#,
                    name = field.name,
                );
            }
            Widget::Number { min, max, step } => {
                let _ = write!(
                    html,
                    r#"</label>
<input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" required>
"#,
                    name = field.name,
                );
            }
            Widget::Select { options } => {
                let _ = write!(html, "</label>\n<select id=\"{name}\" name=\"{name}\">", name = field.name);
                for option in options {
                    let selected = if *option == value { " selected" } else { "" };
                    let _ = write!(
                        html,
                        r#"<option value="{option}"{selected}>{option}</option>"#,
                        option = escape_html(option),
                    );
                }
                html.push_str("</select>\n");
            }
        }
    }

    html.push_str(r#"<button type="submit">🔮 Predict Dropout Risk</button>
</form>
"#);
    html
}
