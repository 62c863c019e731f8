//! Submitted forms and their field-by-field validation.
//!
//! Every form field arrives as an optional string so that a missing or
//! malformed value becomes a field message instead of an extractor
//! rejection. `validate()` turns a form into the typed input the
//! registry and scheduler accept, or reports every failing field at once.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{NewAppointment, NewDoctor, NewPatient};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_INTEGER: &str = "Not a valid integer value.";
pub const NEGATIVE_AGE: &str = "Age must not be negative.";
pub const INVALID_DATE: &str = "Not a valid date value.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";

const NAME_MAX: usize = 100;
const SPECIALIZATION_MAX: usize = 100;
const CONTACT_MAX: usize = 20;
const ADDRESS_MAX: usize = 200;

// ─── Field errors ─────────────────────────────────────────────────────────────

/// Validation messages keyed by form field name. One message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field` unless one is already present.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// ─── Field parsers ────────────────────────────────────────────────────────────

fn present<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &Option<String>,
    max_len: usize,
) -> Option<String> {
    let Some(text) = present(value) else {
        errors.add(field, REQUIRED);
        return None;
    };
    if text.chars().count() > max_len {
        errors.add(field, format!("Field cannot be longer than {max_len} characters."));
        return None;
    }
    Some(text.to_string())
}

fn required_age(errors: &mut FieldErrors, field: &'static str, value: &Option<String>) -> Option<u32> {
    let Some(text) = present(value) else {
        errors.add(field, REQUIRED);
        return None;
    };
    match text.parse::<i64>() {
        Ok(age) if age < 0 => {
            errors.add(field, NEGATIVE_AGE);
            None
        }
        Ok(age) => match u32::try_from(age) {
            Ok(age) => Some(age),
            Err(_) => {
                errors.add(field, INVALID_INTEGER);
                None
            }
        },
        Err(_) => {
            errors.add(field, INVALID_INTEGER);
            None
        }
    }
}

fn required_choice(errors: &mut FieldErrors, field: &'static str, value: &Option<String>) -> Option<i64> {
    let Some(text) = present(value) else {
        errors.add(field, REQUIRED);
        return None;
    };
    match text.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(field, INVALID_CHOICE);
            None
        }
    }
}

fn required_date(errors: &mut FieldErrors, field: &'static str, value: &Option<String>) -> Option<NaiveDate> {
    let Some(text) = present(value) else {
        errors.add(field, REQUIRED);
        return None;
    };
    match parse_iso_date(text) {
        Some(date) => Some(date),
        None => {
            errors.add(field, INVALID_DATE);
            None
        }
    }
}

/// Strict `YYYY-MM-DD`: four-digit year in 1..=9999, no sign. Dates are
/// stored as this text, so its string order must be its date order.
fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    (1..=9999).contains(&date.year()).then_some(date)
}

// ─── Forms ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

impl PatientForm {
    pub fn validate(&self) -> Result<NewPatient, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", &self.name, NAME_MAX);
        let age = required_age(&mut errors, "age", &self.age);
        let contact = required_text(&mut errors, "contact", &self.contact, CONTACT_MAX);
        let address = required_text(&mut errors, "address", &self.address, ADDRESS_MAX);

        match (name, age, contact, address) {
            (Some(name), Some(age), Some(contact), Some(address)) if errors.is_empty() => {
                Ok(NewPatient { name, age, contact, address })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorForm {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub contact: Option<String>,
}

impl DoctorForm {
    pub fn validate(&self) -> Result<NewDoctor, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", &self.name, NAME_MAX);
        let specialization =
            required_text(&mut errors, "specialization", &self.specialization, SPECIALIZATION_MAX);
        let contact = required_text(&mut errors, "contact", &self.contact, CONTACT_MAX);

        match (name, specialization, contact) {
            (Some(name), Some(specialization), Some(contact)) if errors.is_empty() => {
                Ok(NewDoctor { name, specialization, contact })
            }
            _ => Err(errors),
        }
    }
}

/// Appointment form. Whether the referenced patient and doctor exist is
/// checked by the scheduler against the store, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentForm {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub appointment_date: Option<String>,
}

impl AppointmentForm {
    pub fn validate(&self) -> Result<NewAppointment, FieldErrors> {
        let mut errors = FieldErrors::new();
        let patient_id = required_choice(&mut errors, "patient_id", &self.patient_id);
        let doctor_id = required_choice(&mut errors, "doctor_id", &self.doctor_id);
        let appointment_date = required_date(&mut errors, "appointment_date", &self.appointment_date);

        match (patient_id, doctor_id, appointment_date) {
            (Some(patient_id), Some(doctor_id), Some(appointment_date)) if errors.is_empty() => {
                Ok(NewAppointment {
                    patient_id,
                    doctor_id,
                    appointment_date,
                })
            }
            _ => Err(errors),
        }
    }
}
