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

//! Data types for the reservations service.

use derive_getters::Getters;
use hotel_core::model::{EmailAddress, ModelError, ModelResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use time::{Date, OffsetDateTime};

/// Minimum number of digits in a phone number.
const MIN_PHONE_DIGITS: usize = 7;

/// Maximum number of digits in a phone number (the E.164 limit).
const MAX_PHONE_DIGITS: usize = 15;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Identifier of a reservation, as assigned by the database.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ReservationId(i64);

impl ReservationId {
    /// Creates a new identifier from a raw `id`, which must be positive.
    pub fn new(id: i64) -> ModelResult<Self> {
        if id <= 0 {
            return Err(ModelError("Invalid reservation ID".to_owned()));
        }
        Ok(Self(id))
    }

    /// Parses an identifier from its textual representation `s`, as found in URL paths.
    pub fn parse(s: &str) -> ModelResult<Self> {
        match s.parse::<i64>() {
            Ok(id) => Self::new(id),
            Err(_) => Err(ModelError("Invalid reservation ID".to_owned())),
        }
    }

    /// Returns the raw value of the identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ReservationId {
    type Error = ModelError;

    fn try_from(id: i64) -> ModelResult<Self> {
        Self::new(id)
    }
}

impl From<ReservationId> for i64 {
    fn from(id: ReservationId) -> Self {
        id.0
    }
}

/// A syntactically-valid phone number.
///
/// Phone numbers are stored as typed by the guest: we only check that they contain a plausible
/// number of digits and no characters other than the usual separators.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a new phone number from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        static PHONE_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^\+?[0-9(][0-9 ().-]*$").unwrap());

        let s = s.into();
        if !PHONE_RE.is_match(&s) {
            return Err(ModelError(format!("Phone number contains invalid characters '{}'", s)));
        }

        let digits = s.chars().filter(char::is_ascii_digit).count();
        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
            return Err(ModelError(format!(
                "Phone number must have between {} and {} digits",
                MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
            )));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the phone number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Self::new(s)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
impl From<&'static str> for PhoneNumber {
    fn from(s: &'static str) -> Self {
        Self::new(s).unwrap()
    }
}

/// The descriptive fields of a reservation.  These are supplied by clients on creation and are
/// fully replaced on updates.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReservationFields {
    /// Name of the guest holding the reservation.
    pub full_name: String,

    /// Contact email of the guest.
    pub email: EmailAddress,

    /// Contact phone number of the guest.
    pub phone_number: PhoneNumber,

    /// First night of the stay.
    #[serde(rename = "checkIn_date", with = "iso_date")]
    pub check_in_date: Date,

    /// Departure day.
    #[serde(rename = "checkOut_date", with = "iso_date")]
    pub check_out_date: Date,

    /// Free-form description of the room category.
    pub type_of_room: String,

    /// Number of guests staying.
    pub number_of_guest: i32,

    /// Number of rooms booked.
    pub number_of_rooms: i32,
}

/// A stored reservation.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize)]
pub struct Reservation {
    /// Identifier assigned by the database.
    #[serde(rename = "reservation_id")]
    id: ReservationId,

    /// Descriptive fields of the reservation.
    #[serde(flatten)]
    fields: ReservationFields,

    /// When the reservation was created.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,

    /// When the reservation was last modified.
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl Reservation {
    /// Creates a new reservation from its parts.
    pub fn new(
        id: ReservationId,
        fields: ReservationFields,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self { id, fields, created_at, updated_at }
    }
}

/// Criteria to look up reservations by guest.  Absent criteria do not filter.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchCriteria {
    /// Case-insensitive substring to look for in the guest's full name.
    pub full_name: Option<String>,

    /// Exact phone number to look for.
    pub phone_number: Option<String>,
}

impl SearchCriteria {
    /// Creates a new set of criteria, treating empty or blank values as absent.
    pub fn new(full_name: Option<String>, phone_number: Option<String>) -> Self {
        fn non_blank(s: Option<String>) -> Option<String> {
            s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
        }

        Self { full_name: non_blank(full_name), phone_number: non_blank(phone_number) }
    }

    /// Returns true if no criteria are set, in which case everything matches.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone_number.is_none()
    }

    /// Returns the `LIKE` pattern that matches the full name criteria anywhere in a string, with
    /// all wildcard characters in the criteria escaped using `\`.
    pub(crate) fn full_name_pattern(&self) -> Option<String> {
        self.full_name.as_ref().map(|name| {
            let mut pattern = String::with_capacity(name.len() + 2);
            pattern.push('%');
            for ch in name.chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use serde_test::{Token, assert_de_tokens_error, assert_tokens};
    use time::macros::datetime;

    #[test]
    fn test_reservation_id_ok() {
        assert_eq!(1, ReservationId::new(1).unwrap().as_i64());
        assert_eq!(12345, ReservationId::parse("12345").unwrap().as_i64());
    }

    #[test]
    fn test_reservation_id_error() {
        for raw in ["", "abc", "0", "-3", "1.5", "12a", "99999999999999999999"] {
            assert_eq!(
                ModelError("Invalid reservation ID".to_owned()),
                ReservationId::parse(raw).unwrap_err(),
                "Accepted {}",
                raw
            );
        }
    }

    #[test]
    fn test_reservation_id_ser_de() {
        assert_tokens(&ReservationId::new(7).unwrap(), &[Token::I64(7)]);
        assert_de_tokens_error::<ReservationId>(&[Token::I64(0)], "Invalid reservation ID");
    }

    #[test]
    fn test_phone_number_ok() {
        for raw in ["5551234", "+15551234567", "+1 (555) 123-4567", "555.123.4567", "(555) 1234567"]
        {
            assert_eq!(raw, PhoneNumber::new(raw).unwrap().as_str());
        }
    }

    #[test]
    fn test_phone_number_error() {
        for raw in ["", "abc", "555-CALL-NOW", "123456", "1234567890123456", "++5551234567", "-5551234"]
        {
            PhoneNumber::new(raw).unwrap_err();
        }
    }

    #[test]
    fn test_phone_number_ser_de() {
        assert_tokens(&PhoneNumber::from("555-123-4567"), &[Token::String("555-123-4567")]);
        assert_de_tokens_error::<PhoneNumber>(
            &[Token::String("12")],
            "Phone number must have between 7 and 15 digits",
        );
    }

    #[test]
    fn test_reservation_json_names() {
        let reservation = Reservation::new(
            ReservationId::new(3).unwrap(),
            fields_for("John Doe"),
            datetime!(2024-05-01 10:00:00 UTC),
            datetime!(2024-05-02 11:30:00 UTC),
        );
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(
            serde_json::json!({
                "reservation_id": 3,
                "full_name": "John Doe",
                "email": "guest@example.com",
                "phone_number": "+1-555-010-0123",
                "checkIn_date": "2024-06-01",
                "checkOut_date": "2024-06-05",
                "type_of_room": "Double",
                "number_of_guest": 2,
                "number_of_rooms": 1,
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-02T11:30:00Z",
            }),
            json
        );

        let back: Reservation = serde_json::from_value(json).unwrap();
        assert_eq!(reservation, back);
    }

    #[test]
    fn test_search_criteria_blank_is_absent() {
        let criteria = SearchCriteria::new(Some("  ".to_owned()), Some(String::new()));
        assert_eq!(SearchCriteria::default(), criteria);
        assert!(criteria.is_empty());

        let criteria = SearchCriteria::new(Some(" John ".to_owned()), None);
        assert_eq!(Some("John".to_owned()), criteria.full_name);
        assert_eq!(None, criteria.phone_number);
        assert!(!criteria.is_empty());
    }

    #[test]
    fn test_search_criteria_full_name_pattern() {
        assert_eq!(None, SearchCriteria::default().full_name_pattern());
        assert_eq!(
            Some("%test%".to_owned()),
            SearchCriteria::new(Some("test".to_owned()), None).full_name_pattern()
        );
        assert_eq!(
            Some(r"%50\% of\_a\\b%".to_owned()),
            SearchCriteria::new(Some(r"50% of_a\b".to_owned()), None).full_name_pattern()
        );
    }
}
