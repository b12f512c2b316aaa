use std::{collections::HashSet, fmt, sync::OnceLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of one form field, e.g. `study_hours_per_day`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-case spaced form used in messages: `part time job`.
    pub fn spoken(&self) -> String {
        self.0.replace('_', " ")
    }

    /// Title-cased form used for labels: `Part Time Job`.
    pub fn title(&self) -> String {
        self.0
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumericBounds {
    const STEP_TOLERANCE: f64 = 1e-9;

    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Widget-level constraint for a raw numeric input.
    ///
    /// Empty input is admitted (the field is simply unset). Anything else must
    /// parse to a finite number inside `[min, max]` that sits on the step grid
    /// anchored at `min`.
    pub fn admits(&self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() {
            return true;
        }
        let Ok(value) = raw.parse::<f64>() else {
            return false;
        };
        if !value.is_finite() || value < self.min || value > self.max {
            return false;
        }
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        (value - snapped).abs() <= Self::STEP_TOLERANCE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Numeric(NumericBounds),
    Categorical(Vec<String>),
}

impl FieldKind {
    pub fn categorical<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Categorical(allowed.into_iter().map(Into::into).collect())
    }

    pub fn allowed_values(&self) -> Option<&[String]> {
        match self {
            Self::Categorical(values) => Some(values),
            Self::Numeric(_) => None,
        }
    }

    pub fn bounds(&self) -> Option<NumericBounds> {
        match self {
            Self::Numeric(bounds) => Some(*bounds),
            Self::Categorical(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub key: FieldKey,
    pub kind: FieldKind,
    pub label: String,
    pub placeholder: String,
}

impl FieldDefinition {
    pub fn numeric(key: &str, bounds: NumericBounds, placeholder: &str) -> Self {
        let key = FieldKey::new(key);
        Self {
            label: key.title(),
            key,
            kind: FieldKind::Numeric(bounds),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn categorical(key: &str, allowed: &[&str], placeholder: &str) -> Self {
        let key = FieldKey::new(key);
        Self {
            label: key.title(),
            key,
            kind: FieldKind::categorical(allowed.iter().copied()),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, FieldKind::Categorical(_))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("duplicate field key '{0}'")]
    DuplicateKey(FieldKey),
    #[error("field '{key}' has min {min} greater than max {max}")]
    InvertedBounds { key: FieldKey, min: f64, max: f64 },
    #[error("field '{key}' has non-positive step {step}")]
    InvalidStep { key: FieldKey, step: f64 },
    #[error("categorical field '{0}' has no allowed values")]
    EmptyChoices(FieldKey),
}

/// Ordered, immutable table of field definitions.
///
/// Insertion order drives both render order and validation order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    fields: Vec<FieldDefinition>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key.clone()) {
                return Err(SchemaError::DuplicateKey(field.key.clone()));
            }
            match &field.kind {
                FieldKind::Numeric(bounds) => {
                    if !bounds.step.is_finite() || bounds.step <= 0.0 {
                        return Err(SchemaError::InvalidStep {
                            key: field.key.clone(),
                            step: bounds.step,
                        });
                    }
                    if bounds.min > bounds.max {
                        return Err(SchemaError::InvertedBounds {
                            key: field.key.clone(),
                            min: bounds.min,
                            max: bounds.max,
                        });
                    }
                }
                FieldKind::Categorical(values) if values.is_empty() => {
                    return Err(SchemaError::EmptyChoices(field.key.clone()));
                }
                FieldKind::Categorical(_) => {}
            }
        }
        Ok(Self { fields })
    }

    /// The student habits schema shared by every front end.
    pub fn student_habits() -> &'static FormSchema {
        static SCHEMA: OnceLock<FormSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| Self {
            fields: student_habit_fields(),
        })
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.key.as_str() == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.key.as_str() == key)
    }

    pub fn categorical_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|field| field.is_categorical())
    }
}

const HOURS: NumericBounds = NumericBounds::new(0.0, 24.0, 0.1);
const YES_NO: &[&str] = &["Yes", "No"];

fn student_habit_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::numeric("age", NumericBounds::new(10.0, 100.0, 1.0), "e.g. 20"),
        FieldDefinition::categorical("gender", &["Male", "Female", "Other"], "Select Gender"),
        FieldDefinition::numeric("study_hours_per_day", HOURS, "e.g. 4"),
        FieldDefinition::numeric("social_media_hours", HOURS, "e.g. 2.5"),
        FieldDefinition::numeric("netflix_hours", HOURS, "e.g. 1.2"),
        FieldDefinition::categorical("part_time_job", YES_NO, "Select Option"),
        FieldDefinition::numeric(
            "attendance_percentage",
            NumericBounds::new(0.0, 100.0, 0.1),
            "e.g. 85",
        ),
        FieldDefinition::numeric("sleep_hours", HOURS, "e.g. 7.5"),
        FieldDefinition::categorical("diet_quality", &["Poor", "Fair", "Good"], "Select Quality"),
        FieldDefinition::numeric(
            "exercise_frequency",
            NumericBounds::new(0.0, 7.0, 1.0),
            "Times per week e.g. 3",
        ),
        FieldDefinition::categorical(
            "parental_education_level",
            &["High School", "Bachelor", "Master", "no_education"],
            "Select Level",
        ),
        FieldDefinition::categorical(
            "internet_quality",
            &["Poor", "Average", "Good"],
            "Select Quality",
        ),
        FieldDefinition::numeric(
            "mental_health_rating",
            NumericBounds::new(1.0, 10.0, 1.0),
            "Scale of 1 to 10",
        ),
        FieldDefinition::categorical("extracurricular_participation", YES_NO, "Select Option"),
    ]
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
