//! Input widgets generated from field definitions.
//!
//! Numeric inputs carry the field bounds, and a form whose numeric inputs
//! fall outside them is not submitted (the widget-level constraint). The
//! validator in `client_core` only checks categorical choices.

use client_core::FormStateStore;
use eframe::egui;
use shared::domain::{FieldDefinition, FieldKind, NumericBounds};

const INPUT_WIDTH: f32 = 200.0;
const INVALID_COLOR: egui::Color32 = egui::Color32::from_rgb(0xe0, 0x5a, 0x5a);

/// Renders one labeled input; returns the new raw value when the user edits it.
pub fn field_input(ui: &mut egui::Ui, field: &FieldDefinition, current: &str) -> Option<String> {
    ui.label(egui::RichText::new(&field.label).strong());
    let edited = match &field.kind {
        FieldKind::Numeric(bounds) => numeric_input(ui, field, *bounds, current),
        FieldKind::Categorical(allowed) => choice_selector(ui, field, allowed, current),
    };
    ui.end_row();
    edited
}

fn numeric_input(
    ui: &mut egui::Ui,
    field: &FieldDefinition,
    bounds: NumericBounds,
    current: &str,
) -> Option<String> {
    let mut buffer = current.to_string();
    let mut edited = None;
    ui.horizontal(|ui| {
        let response = ui
            .add(
                egui::TextEdit::singleline(&mut buffer)
                    .hint_text(field.placeholder.as_str())
                    .desired_width(INPUT_WIDTH),
            )
            .on_hover_text(bounds_hint(bounds));
        if response.changed() {
            edited = Some(sanitize_numeric(&buffer));
        }
        if !bounds.admits(current) {
            ui.colored_label(INVALID_COLOR, "out of range")
                .on_hover_text(bounds_hint(bounds));
        }
    });
    edited
}

fn choice_selector(
    ui: &mut egui::Ui,
    field: &FieldDefinition,
    allowed: &[String],
    current: &str,
) -> Option<String> {
    let mut edited = None;
    let selected_text = if current.is_empty() {
        field.placeholder.as_str()
    } else {
        current
    };
    egui::ComboBox::from_id_salt(field.key.as_str())
        .width(INPUT_WIDTH)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for choice in allowed {
                if ui
                    .selectable_label(current == choice.as_str(), choice.as_str())
                    .clicked()
                {
                    edited = Some(choice.clone());
                }
            }
        });
    edited
}

fn bounds_hint(bounds: NumericBounds) -> String {
    format!(
        "From {} to {} in steps of {}",
        bounds.min, bounds.max, bounds.step
    )
}

/// Keeps only characters that can appear in a number.
pub fn sanitize_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E'))
        .collect()
}

/// First numeric field that is empty or violates its bounds, rendered as a
/// hint. Such a form is held back before it reaches the workflow.
pub fn first_numeric_violation(store: &FormStateStore) -> Option<String> {
    store
        .snapshot()
        .first_numeric_violation()
        .map(|violation| violation.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn sanitize_drops_letters_and_spaces() {
        assert_eq!(sanitize_numeric("7.5 hrs"), "7.5");
        assert_eq!(sanitize_numeric(" 12 "), "12");
        assert_eq!(sanitize_numeric("-0.1"), "-0.1");
    }

    #[test]
    fn empty_numeric_field_is_reported_first_in_schema_order() {
        let store = FormStateStore::student_habits();
        assert_eq!(
            first_numeric_violation(&store).as_deref(),
            Some("Please fill in Age.")
        );
    }

    #[test]
    fn out_of_range_value_names_the_bounds() {
        let mut store = FormStateStore::student_habits();
        let schema = Arc::clone(store.schema());
        for field in schema.iter() {
            if field.kind.bounds().is_some() {
                store.set_value(field.key.as_str(), "5");
            }
        }
        store.set_value("age", "20");
        store.set_value("exercise_frequency", "9");
        assert_eq!(
            first_numeric_violation(&store).as_deref(),
            Some("Exercise Frequency must be between 0 and 7 in steps of 1.")
        );

        store.set_value("exercise_frequency", "3");
        assert_eq!(first_numeric_violation(&store), None);
    }
}
