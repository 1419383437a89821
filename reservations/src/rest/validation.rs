// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Validation of the reservation payloads accepted by the create and update APIs.
//!
//! Payloads are received as raw JSON values so that every field can be checked independently and
//! all problems reported at once, instead of stopping at the first deserialization error.

use crate::model::{PhoneNumber, ReservationFields};
use hotel_core::model::EmailAddress;
use hotel_core::rest::{FieldViolation, RestError, RestResult};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// A check on a single field of the payload, along with the message to report when it fails.
type Rule = (&'static str, fn(&Value) -> bool, &'static str);

/// Rules to validate a reservation payload, in the order in which violations are reported.
const RULES: &[Rule] = &[
    ("full_name", is_text, "Full name is required"),
    ("email", is_email, "Email must be a valid email address"),
    ("phone_number", is_phone, "Phone number must be a valid phone number"),
    ("checkIn_date", is_date, "Check-in date must be an ISO-8601 date"),
    ("checkOut_date", is_date, "Check-out date must be an ISO-8601 date"),
    ("type_of_room", is_text, "Type of room is required"),
    ("number_of_guest", is_count, "Number of guests must be an integer greater than or equal to 1"),
    ("number_of_rooms", is_count, "Number of rooms must be an integer greater than or equal to 1"),
];

/// Extracts a non-blank string, trimmed.
fn parse_text(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    if s.is_empty() { None } else { Some(s.to_owned()) }
}

/// Extracts a valid email address.
fn parse_email(value: &Value) -> Option<EmailAddress> {
    EmailAddress::new(value.as_str()?).ok()
}

/// Extracts a valid phone number.
fn parse_phone(value: &Value) -> Option<PhoneNumber> {
    PhoneNumber::new(value.as_str()?).ok()
}

/// Extracts a calendar date given either as a plain date or as a full timestamp, in which case
/// the time of day is discarded.
fn parse_date(value: &Value) -> Option<Date> {
    let s = value.as_str()?;
    if let Ok(date) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    OffsetDateTime::parse(s, &Rfc3339).ok().map(|ts| ts.date())
}

/// Converts `f` to an `i32` if it has no fractional part and fits.
fn whole_number(f: f64) -> Option<i32> {
    if f.fract() != 0.0 || f < f64::from(i32::MIN) || f > f64::from(i32::MAX) {
        return None;
    }
    Some(f as i32)
}

/// Extracts a positive count given either as a JSON number or as a string holding one.
///
/// Numbers written with a zero fractional part, like `2.0`, are accepted as integers.
fn parse_count(value: &Value) -> Option<i32> {
    let n = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok()?,
            None => whole_number(n.as_f64()?)?,
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i32>() {
                Ok(i) => i,
                Err(_) => whole_number(s.parse::<f64>().ok()?)?,
            }
        }
        _ => return None,
    };
    if n >= 1 { Some(n) } else { None }
}

/// Predicate for `parse_text`.
fn is_text(value: &Value) -> bool {
    parse_text(value).is_some()
}

/// Predicate for `parse_email`.
fn is_email(value: &Value) -> bool {
    parse_email(value).is_some()
}

/// Predicate for `parse_phone`.
fn is_phone(value: &Value) -> bool {
    parse_phone(value).is_some()
}

/// Predicate for `parse_date`.
fn is_date(value: &Value) -> bool {
    parse_date(value).is_some()
}

/// Predicate for `parse_count`.
fn is_count(value: &Value) -> bool {
    parse_count(value).is_some()
}

/// Returns the value of `field` in `body`, or null if it is missing.
fn get<'a>(body: &'a Value, field: &str) -> &'a Value {
    body.get(field).unwrap_or(&Value::Null)
}

/// Checks `body` against all rules and returns every violation found.
fn check(body: &Value) -> Vec<FieldViolation> {
    RULES
        .iter()
        .filter(|(field, predicate, _)| !predicate(get(body, field)))
        .map(|(field, _, message)| FieldViolation::new(*field, *message))
        .collect()
}

/// Converts an already-validated `body` into its typed representation.
fn parse_fields(body: &Value) -> Option<ReservationFields> {
    Some(ReservationFields {
        full_name: parse_text(get(body, "full_name"))?,
        email: parse_email(get(body, "email"))?,
        phone_number: parse_phone(get(body, "phone_number"))?,
        check_in_date: parse_date(get(body, "checkIn_date"))?,
        check_out_date: parse_date(get(body, "checkOut_date"))?,
        type_of_room: parse_text(get(body, "type_of_room"))?,
        number_of_guest: parse_count(get(body, "number_of_guest"))?,
        number_of_rooms: parse_count(get(body, "number_of_rooms"))?,
    })
}

/// Validates a reservation payload in `body` and converts it into its typed representation.
pub(crate) fn validate(body: &Value) -> RestResult<ReservationFields> {
    let violations = check(body);
    if !violations.is_empty() {
        return Err(RestError::ValidationFailed(violations));
    }

    parse_fields(body)
        .ok_or_else(|| RestError::InternalError("Validation rules out of sync".to_owned()))
}
