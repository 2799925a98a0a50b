//! Form validation
//!
//! `validate` is pure and always reflects the current values. `feedback`
//! layers the touched-flag gating on top of it for display; it never changes
//! whether the data itself is valid.

use std::collections::BTreeMap;

use crate::form::{Field, FormValues, TouchedFlags};

pub const USER_MESSAGE: &str = "You need to specify a user";
pub const SAMPLE_LABEL_MESSAGE: &str = "You need to specify a sample label";
pub const PROPOSAL_NUMBER_MESSAGE: &str = "You need to specify a proposal number";
pub const INNER_DIAMETER_MESSAGE: &str =
    "Inner diameter must be a valid number greater than 0 and lesser than outer diameter";
pub const OUTER_DIAMETER_MESSAGE: &str =
    "Outer diameter must be a valid number greater than 0 and greater than inner diameter";

/// Validity of a single field. `message` is empty when the field is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStatus {
    pub is_invalid: bool,
    pub message: &'static str,
}

impl FieldStatus {
    const VALID: FieldStatus = FieldStatus {
        is_invalid: false,
        message: "",
    };

    fn check(is_invalid: bool, message: &'static str) -> Self {
        if is_invalid {
            Self {
                is_invalid,
                message,
            }
        } else {
            Self::VALID
        }
    }
}

/// Per-field validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    fields: BTreeMap<Field, FieldStatus>,
}

impl Validation {
    pub fn get(&self, field: Field) -> FieldStatus {
        self.fields.get(&field).copied().unwrap_or(FieldStatus::VALID)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|status| !status.is_invalid)
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields
            .iter()
            .filter(|(_, status)| status.is_invalid)
            .map(|(field, _)| *field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldStatus)> + '_ {
        self.fields.iter().map(|(field, status)| (*field, *status))
    }
}

/// Validate every field against the current values.
pub fn validate(values: &FormValues) -> Validation {
    let inner = values.inner_diameter;
    let outer = values.outer_diameter;

    // NaN comparisons are false, so the explicit is_nan checks matter.
    let inner_invalid = inner.is_nan() || inner <= 0.0 || inner >= outer;
    let outer_invalid = outer.is_nan() || outer <= 0.0 || outer <= inner;

    let fields = BTreeMap::from([
        (
            Field::User,
            FieldStatus::check(values.user.is_empty(), USER_MESSAGE),
        ),
        (
            Field::SampleLabel,
            FieldStatus::check(values.sample_label.is_empty(), SAMPLE_LABEL_MESSAGE),
        ),
        (
            Field::ProposalNumber,
            FieldStatus::check(values.proposal_number.is_empty(), PROPOSAL_NUMBER_MESSAGE),
        ),
        (
            Field::InnerDiameter,
            FieldStatus::check(inner_invalid, INNER_DIAMETER_MESSAGE),
        ),
        (
            Field::OuterDiameter,
            FieldStatus::check(outer_invalid, OUTER_DIAMETER_MESSAGE),
        ),
    ]);

    Validation { fields }
}

/// True when no field still holds its empty/zero sentinel
pub fn is_complete(values: &FormValues) -> bool {
    !values.user.is_empty()
        && !values.sample_label.is_empty()
        && !values.proposal_number.is_empty()
        && values.inner_diameter != 0.0
        && values.outer_diameter != 0.0
}

/// Validation as it should be displayed given the touched flags.
///
/// Text fields report once touched. Both diameter fields report only once
/// both of them have been touched.
pub fn feedback(values: &FormValues, touched: &TouchedFlags) -> Validation {
    let diameters_touched = touched.inner_diameter && touched.outer_diameter;
    let mut validation = validate(values);

    for (field, status) in validation.fields.iter_mut() {
        let shown = if field.is_diameter() {
            diameters_touched
        } else {
            touched.get(*field)
        };
        if !shown {
            *status = FieldStatus::VALID;
        }
    }

    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled(inner: f64, outer: f64) -> FormValues {
        FormValues {
            user: "John Doe".into(),
            sample_label: "S-001".into(),
            proposal_number: "P-1234".into(),
            inner_diameter: inner,
            outer_diameter: outer,
        }
    }

    #[test]
    fn complete_valid_form() {
        let values = filled(5.0, 10.0);
        let result = validate(&values);
        assert!(result.is_valid());
        assert!(is_complete(&values));
        assert_eq!(result.get(Field::InnerDiameter).message, "");
    }

    #[test]
    fn reversed_diameters_invalid_on_both() {
        let result = validate(&filled(10.0, 5.0));
        assert!(result.get(Field::InnerDiameter).is_invalid);
        assert!(result.get(Field::OuterDiameter).is_invalid);
    }

    #[test]
    fn equal_diameters_invalid_on_both() {
        let result = validate(&filled(5.0, 5.0));
        assert_eq!(
            result.invalid_fields().collect::<Vec<_>>(),
            vec![Field::InnerDiameter, Field::OuterDiameter]
        );
    }

    #[test]
    fn zero_diameter_always_invalid() {
        let result = validate(&filled(0.0, 10.0));
        assert!(result.get(Field::InnerDiameter).is_invalid);
        assert!(!result.get(Field::OuterDiameter).is_invalid);
        assert!(!is_complete(&filled(0.0, 10.0)));
    }

    #[test]
    fn nan_diameter_invalid() {
        let result = validate(&filled(f64::NAN, 10.0));
        assert!(result.get(Field::InnerDiameter).is_invalid);
        assert_eq!(
            result.get(Field::InnerDiameter).message,
            INNER_DIAMETER_MESSAGE
        );
    }

    #[test]
    fn empty_text_fields_report_messages() {
        let result = validate(&FormValues::default());
        assert_eq!(result.get(Field::User).message, USER_MESSAGE);
        assert_eq!(result.get(Field::SampleLabel).message, SAMPLE_LABEL_MESSAGE);
        assert_eq!(
            result.get(Field::ProposalNumber).message,
            PROPOSAL_NUMBER_MESSAGE
        );
    }

    #[test]
    fn feedback_hidden_until_touched() {
        let values = FormValues::default();
        let untouched = feedback(&values, &TouchedFlags::default());
        assert!(untouched.is_valid());

        let touched = TouchedFlags {
            user: true,
            ..Default::default()
        };
        let shown = feedback(&values, &touched);
        assert!(shown.get(Field::User).is_invalid);
        assert!(!shown.get(Field::SampleLabel).is_invalid);
    }

    #[test]
    fn diameter_feedback_needs_both_touched() {
        let values = filled(10.0, 5.0);
        let only_inner = TouchedFlags {
            inner_diameter: true,
            ..Default::default()
        };
        let result = feedback(&values, &only_inner);
        assert!(!result.get(Field::InnerDiameter).is_invalid);
        assert!(!result.get(Field::OuterDiameter).is_invalid);

        let both = TouchedFlags {
            inner_diameter: true,
            outer_diameter: true,
            ..Default::default()
        };
        let result = feedback(&values, &both);
        assert!(result.get(Field::InnerDiameter).is_invalid);
        assert!(result.get(Field::OuterDiameter).is_invalid);
    }

    #[test]
    fn feedback_does_not_change_validity() {
        let values = FormValues::default();
        let _ = feedback(&values, &TouchedFlags::default());
        assert!(!validate(&values).is_valid());
    }

    proptest! {
        #[test]
        fn inner_not_below_outer_rejected(outer in -1e6f64..1e6, delta in 0f64..1e6) {
            let inner = outer + delta;
            prop_assert!(!validate(&filled(inner, outer)).is_valid());
        }

        #[test]
        fn non_positive_diameter_rejected(bad in -1e6f64..=0.0, good in 0.001f64..1e6) {
            prop_assert!(!validate(&filled(bad, good)).is_valid());
            prop_assert!(!validate(&filled(good, bad)).is_valid());
        }

        #[test]
        fn ordered_positive_pair_accepted(inner in 0.001f64..1e6, gap in 0.001f64..1e6) {
            prop_assert!(validate(&filled(inner, inner + gap)).is_valid());
        }
    }
}
