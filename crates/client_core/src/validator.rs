//! Submit-time validation of a form snapshot.
//!
//! Only categorical fields are checked. Numeric ranges are enforced by the
//! input widget through [`shared::domain::NumericBounds::admits`] and are not
//! re-validated here.

use shared::domain::FieldKind;

use crate::{error::ValidationError, store::FormSnapshot};

/// Reports the first categorical field, in schema order, whose value is not
/// one of its allowed choices.
pub fn validate(snapshot: &FormSnapshot) -> Result<(), ValidationError> {
    for field in snapshot.schema().iter() {
        let FieldKind::Categorical(allowed) = &field.kind else {
            continue;
        };
        let value = snapshot.get(field.key.as_str()).unwrap_or_default();
        if !allowed.iter().any(|choice| choice == value) {
            return Err(ValidationError {
                key: field.key.clone(),
                allowed: allowed.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
