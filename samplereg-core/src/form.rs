//! Field state controller
//!
//! Holds the raw form values and the touched flags. Mutators never validate;
//! callers ask `validate` for a fresh result after every change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SampleRegError};

/// One of the five registration form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    User,
    SampleLabel,
    ProposalNumber,
    InnerDiameter,
    OuterDiameter,
}

impl Field {
    /// All fields in display order
    pub const ALL: [Field; 5] = [
        Field::User,
        Field::SampleLabel,
        Field::ProposalNumber,
        Field::InnerDiameter,
        Field::OuterDiameter,
    ];

    /// Wire name, as used in request payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Field::User => "user",
            Field::SampleLabel => "sample_label",
            Field::ProposalNumber => "proposal_number",
            Field::InnerDiameter => "inner_diameter",
            Field::OuterDiameter => "outer_diameter",
        }
    }

    pub fn is_diameter(self) -> bool {
        matches!(self, Field::InnerDiameter | Field::OuterDiameter)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = SampleRegError;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| SampleRegError::unknown_field(s))
    }
}

/// Current field values. Diameters use 0 as the "not entered" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormValues {
    pub user: String,
    pub sample_label: String,
    pub proposal_number: String,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
}

impl FormValues {
    /// Text value of a field; `None` for diameters
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::User => Some(&self.user),
            Field::SampleLabel => Some(&self.sample_label),
            Field::ProposalNumber => Some(&self.proposal_number),
            Field::InnerDiameter | Field::OuterDiameter => None,
        }
    }

    /// Numeric value of a field; `None` for text fields
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::InnerDiameter => Some(self.inner_diameter),
            Field::OuterDiameter => Some(self.outer_diameter),
            _ => None,
        }
    }
}

/// Whether each field has been visited and left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedFlags {
    pub user: bool,
    pub sample_label: bool,
    pub proposal_number: bool,
    pub inner_diameter: bool,
    pub outer_diameter: bool,
}

impl TouchedFlags {
    pub fn all() -> Self {
        Self {
            user: true,
            sample_label: true,
            proposal_number: true,
            inner_diameter: true,
            outer_diameter: true,
        }
    }

    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::User => self.user,
            Field::SampleLabel => self.sample_label,
            Field::ProposalNumber => self.proposal_number,
            Field::InnerDiameter => self.inner_diameter,
            Field::OuterDiameter => self.outer_diameter,
        }
    }

    fn flag_mut(&mut self, field: Field) -> &mut bool {
        match field {
            Field::User => &mut self.user,
            Field::SampleLabel => &mut self.sample_label,
            Field::ProposalNumber => &mut self.proposal_number,
            Field::InnerDiameter => &mut self.inner_diameter,
            Field::OuterDiameter => &mut self.outer_diameter,
        }
    }
}

/// Values plus touched flags, mutated one interaction at a time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: FormValues,
    touched: TouchedFlags,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn touched(&self) -> &TouchedFlags {
        &self.touched
    }

    /// Update one field from raw input text.
    ///
    /// Diameter fields parse the text as a float; anything unparsable
    /// (including empty input) is stored as NaN so validation rejects it.
    pub fn set(&mut self, field: Field, raw: &str) {
        match field {
            Field::User => self.values.user = raw.to_owned(),
            Field::SampleLabel => self.values.sample_label = raw.to_owned(),
            Field::ProposalNumber => self.values.proposal_number = raw.to_owned(),
            Field::InnerDiameter => self.values.inner_diameter = parse_diameter(raw),
            Field::OuterDiameter => self.values.outer_diameter = parse_diameter(raw),
        }
    }

    /// Update a field addressed by its wire name
    pub fn set_by_name(&mut self, name: &str, raw: &str) -> Result<()> {
        let field: Field = name.parse()?;
        self.set(field, raw);
        Ok(())
    }

    /// Store a number in one of the diameter fields
    pub fn set_diameter(&mut self, field: Field, value: f64) -> Result<()> {
        match field {
            Field::InnerDiameter => self.values.inner_diameter = value,
            Field::OuterDiameter => self.values.outer_diameter = value,
            other => {
                return Err(SampleRegError::NotNumeric {
                    field: other.as_str(),
                })
            }
        }
        Ok(())
    }

    /// Mark a field as visited (blur)
    pub fn blur(&mut self, field: Field) {
        *self.touched.flag_mut(field) = true;
    }

    pub fn touch_all(&mut self) {
        self.touched = TouchedFlags::all();
    }

    /// Back to empty values and untouched fields
    pub fn reset(&mut self) {
        self.values = FormValues::default();
        self.touched = TouchedFlags::default();
    }
}

fn parse_diameter(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert!("diameter".parse::<Field>().is_err());
    }

    #[test]
    fn set_text_and_diameters() {
        let mut form = FormState::new();
        form.set(Field::User, "John Doe");
        form.set(Field::InnerDiameter, " 2.5 ");
        form.set(Field::OuterDiameter, "abc");

        assert_eq!(form.values().user, "John Doe");
        assert_eq!(form.values().inner_diameter, 2.5);
        assert!(form.values().outer_diameter.is_nan());
    }

    #[test]
    fn empty_diameter_input_is_nan() {
        let mut form = FormState::new();
        form.set(Field::InnerDiameter, "");
        assert!(form.values().inner_diameter.is_nan());
    }

    #[test]
    fn set_by_name_rejects_unknown_field() {
        let mut form = FormState::new();
        assert!(form.set_by_name("sample_label", "S-1").is_ok());
        assert_eq!(form.values().sample_label, "S-1");

        let err = form.set_by_name("colour", "red").unwrap_err();
        assert!(matches!(err, SampleRegError::UnknownField { .. }));
    }

    #[test]
    fn set_diameter_rejects_text_field() {
        let mut form = FormState::new();
        assert!(form.set_diameter(Field::OuterDiameter, 10.0).is_ok());
        assert!(form.set_diameter(Field::User, 1.0).is_err());
    }

    #[test]
    fn blur_marks_only_that_field() {
        let mut form = FormState::new();
        form.blur(Field::SampleLabel);
        assert!(form.touched().sample_label);
        assert!(!form.touched().user);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = FormState::new();
        form.set(Field::ProposalNumber, "P-42");
        form.set(Field::InnerDiameter, "3");
        form.touch_all();

        form.reset();

        assert_eq!(form, FormState::default());
    }
}
