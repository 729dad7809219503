//! Validation of raw inquiry submissions.
//!
//! Every rule runs against the raw JSON object and records its failures in a
//! shared [`ValidationErrors`] map, so a single pass reports every problem
//! with the submission at once.

use crate::inquiry::{limits, TravelInquiry};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use travelingo_shared::pii::Masked;
use validator::ValidateEmail;

/// Key used for errors that belong to the submission as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub mod messages {
    pub const REQUIRED: &str = "This field is required.";
    pub const NULL: &str = "This field may not be null.";
    pub const BLANK: &str = "This field may not be blank.";
    pub const NOT_A_STRING: &str = "Not a valid string.";
    pub const NULL_CHARACTERS: &str = "Null characters are not allowed.";
    pub const INVALID_EMAIL: &str = "Enter a valid email address.";
    pub const INVALID_INTEGER: &str = "A valid integer is required.";
    pub const INVALID_DATE: &str =
        "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
    pub const RETURN_NOT_AFTER_DEPARTURE: &str = "Return date must be after departure date.";

    pub fn max_length(max: usize) -> String {
        format!("Ensure this field has no more than {} characters.", max)
    }

    pub fn min_value(min: i64) -> String {
        format!("Ensure this value is greater than or equal to {}.", min)
    }

    pub fn max_value(max: i64) -> String {
        format!("Ensure this value is less than or equal to {}.", max)
    }
}

/// Field name -> human readable messages. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}

/// Validates a raw submission and returns the normalized inquiry.
///
/// Keys other than the ten inquiry fields are ignored.
pub fn validate_inquiry(payload: &Map<String, Value>) -> Result<TravelInquiry, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let first_name = char_field(payload, "first_name", limits::FIRST_NAME, &mut errors);
    let last_name = char_field(payload, "last_name", limits::LAST_NAME, &mut errors);
    let email = email_field(payload, &mut errors);
    let phone = char_field(payload, "phone", limits::PHONE, &mut errors);
    let destination = char_field(payload, "destination", limits::DESTINATION, &mut errors);
    let budget_range = char_field(payload, "budget_range", limits::BUDGET_RANGE, &mut errors);
    let travel_type = char_field(payload, "travel_type", limits::TRAVEL_TYPE, &mut errors);
    let travelers = travelers_field(payload, &mut errors);
    let departure_date = date_field(payload, "departure_date", &mut errors);
    let return_date = date_field(payload, "return_date", &mut errors);

    if let (Some(departure), Some(ret)) = (departure_date, return_date) {
        if ret <= departure {
            errors.add(NON_FIELD_ERRORS, messages::RETURN_NOT_AFTER_DEPARTURE);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Each extractor records an error whenever it yields None.
    let build = || -> Option<TravelInquiry> {
        Some(TravelInquiry {
            first_name: first_name?,
            last_name: last_name?,
            email: Masked::new(email?),
            phone: Masked::new(phone?),
            destination: destination?,
            departure_date: departure_date?,
            return_date: return_date?,
            travelers: travelers?,
            budget_range: budget_range?,
            travel_type: travel_type?,
        })
    };
    build().ok_or(errors)
}

fn required<'a>(
    payload: &'a Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a Value> {
    match payload.get(field) {
        None => {
            errors.add(field, messages::REQUIRED);
            None
        }
        Some(Value::Null) => {
            errors.add(field, messages::NULL);
            None
        }
        Some(value) => Some(value),
    }
}

fn char_field(
    payload: &Map<String, Value>,
    field: &str,
    max_len: usize,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let text = text_value(payload, field, errors)?;
    let problems = text_problems(&text, max_len);
    accept(field, text, problems, errors)
}

fn email_field(payload: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<String> {
    let field = "email";
    let email = text_value(payload, field, errors)?;

    let mut problems = text_problems(&email, limits::EMAIL);
    if !email.validate_email() {
        problems.push(messages::INVALID_EMAIL.to_string());
    }
    accept(field, email, problems, errors)
}

/// Present, non-null, string-like and not blank. Numbers are stringified.
fn text_value(
    payload: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let text = match required(payload, field, errors)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => {
            errors.add(field, messages::NOT_A_STRING);
            return None;
        }
    };

    if text.is_empty() {
        errors.add(field, messages::BLANK);
        return None;
    }
    Some(text)
}

/// Every content rule that applies to a string column; all failures are kept.
fn text_problems(text: &str, max_len: usize) -> Vec<String> {
    let mut problems = Vec::new();
    if text.contains('\0') {
        problems.push(messages::NULL_CHARACTERS.to_string());
    }
    if text.chars().count() > max_len {
        problems.push(messages::max_length(max_len));
    }
    problems
}

fn accept(
    field: &str,
    text: String,
    problems: Vec<String>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    if problems.is_empty() {
        return Some(text);
    }
    for problem in problems {
        errors.add(field, problem);
    }
    None
}

fn travelers_field(payload: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<u32> {
    let field = "travelers";
    let value = required(payload, field, errors)?;

    let Some(count) = parse_integer(value) else {
        errors.add(field, messages::INVALID_INTEGER);
        return None;
    };

    if count < 0 {
        errors.add(field, messages::min_value(0));
        return None;
    }
    if count > i128::from(limits::TRAVELERS_MAX) {
        errors.add(field, messages::max_value(limits::TRAVELERS_MAX));
        return None;
    }
    u32::try_from(count).ok()
}

/// Accepts JSON integers, integral floats (`2.0`) and numeric strings
/// (`"2"`, `"2.00"`).
fn parse_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(i128::from(u))
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i128)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            let digits = match trimmed.split_once('.') {
                Some((whole, frac)) if frac.chars().all(|c| c == '0') => whole,
                Some(_) => return None,
                None => trimmed,
            };
            digits.parse::<i128>().ok()
        }
        _ => None,
    }
}

fn date_field(
    payload: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    let value = required(payload, field, errors)?;
    let parsed = value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());

    if parsed.is_none() {
        errors.add(field, messages::INVALID_DATE);
    }
    parsed
}
