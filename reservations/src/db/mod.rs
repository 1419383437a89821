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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Every operation issues exactly one statement so that it commits on its own.

use crate::model::{PhoneNumber, Reservation, ReservationFields, ReservationId, SearchCriteria};
use futures::TryStreamExt;
#[cfg(feature = "postgres")]
use hotel_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use hotel_core::db::sqlite::{self, build_timestamp, unpack_timestamp};
use hotel_core::db::{DbError, DbResult, Executor};
use hotel_core::model::EmailAddress;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use time::{Date, OffsetDateTime};

#[cfg(test)]
mod tests;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Reservation {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("reservation_id").map_err(postgres::map_sqlx_error)?;
        let full_name: String = row.try_get("full_name").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let phone_number: String = row.try_get("phone_number").map_err(postgres::map_sqlx_error)?;
        let check_in_date: Date = row.try_get("check_in_date").map_err(postgres::map_sqlx_error)?;
        let check_out_date: Date =
            row.try_get("check_out_date").map_err(postgres::map_sqlx_error)?;
        let type_of_room: String = row.try_get("type_of_room").map_err(postgres::map_sqlx_error)?;
        let number_of_guest: i32 =
            row.try_get("number_of_guest").map_err(postgres::map_sqlx_error)?;
        let number_of_rooms: i32 =
            row.try_get("number_of_rooms").map_err(postgres::map_sqlx_error)?;
        let created_at: OffsetDateTime =
            row.try_get("created_at").map_err(postgres::map_sqlx_error)?;
        let updated_at: OffsetDateTime =
            row.try_get("updated_at").map_err(postgres::map_sqlx_error)?;

        let fields = ReservationFields {
            full_name,
            email: EmailAddress::new(email)?,
            phone_number: PhoneNumber::new(phone_number)?,
            check_in_date,
            check_out_date,
            type_of_room,
            number_of_guest,
            number_of_rooms,
        };
        Ok(Reservation::new(ReservationId::new(id)?, fields, created_at, updated_at))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Reservation {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("reservation_id").map_err(sqlite::map_sqlx_error)?;
        let full_name: String = row.try_get("full_name").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let phone_number: String = row.try_get("phone_number").map_err(sqlite::map_sqlx_error)?;
        let check_in_date: Date = row.try_get("check_in_date").map_err(sqlite::map_sqlx_error)?;
        let check_out_date: Date = row.try_get("check_out_date").map_err(sqlite::map_sqlx_error)?;
        let type_of_room: String = row.try_get("type_of_room").map_err(sqlite::map_sqlx_error)?;
        let number_of_guest: i32 =
            row.try_get("number_of_guest").map_err(sqlite::map_sqlx_error)?;
        let number_of_rooms: i32 =
            row.try_get("number_of_rooms").map_err(sqlite::map_sqlx_error)?;
        let created_at_secs: i64 =
            row.try_get("created_at_secs").map_err(sqlite::map_sqlx_error)?;
        let created_at_nsecs: i64 =
            row.try_get("created_at_nsecs").map_err(sqlite::map_sqlx_error)?;
        let updated_at_secs: i64 =
            row.try_get("updated_at_secs").map_err(sqlite::map_sqlx_error)?;
        let updated_at_nsecs: i64 =
            row.try_get("updated_at_nsecs").map_err(sqlite::map_sqlx_error)?;

        let fields = ReservationFields {
            full_name,
            email: EmailAddress::new(email)?,
            phone_number: PhoneNumber::new(phone_number)?,
            check_in_date,
            check_out_date,
            type_of_room,
            number_of_guest,
            number_of_rooms,
        };
        Ok(Reservation::new(
            ReservationId::new(id)?,
            fields,
            build_timestamp(created_at_secs, created_at_nsecs)?,
            build_timestamp(updated_at_secs, updated_at_nsecs)?,
        ))
    }
}

/// Gets all reservations ordered by their identifier.
pub(crate) async fn list_reservations(ex: &mut Executor) -> DbResult<Vec<Reservation>> {
    let mut reservations = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM reservations ORDER BY reservation_id";
            let mut rows = sqlx::query(query_str).fetch(&mut **ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                reservations.push(Reservation::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM reservations ORDER BY reservation_id";
            let mut rows = sqlx::query(query_str).fetch(&mut **ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                reservations.push(Reservation::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(reservations)
}

/// Gets the reservation identified by `id`.
pub(crate) async fn get_reservation(ex: &mut Executor, id: ReservationId) -> DbResult<Reservation> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM reservations WHERE reservation_id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Reservation::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM reservations WHERE reservation_id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Reservation::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all reservations that match the `criteria`, ordered by their identifier.
///
/// The full name criteria matches any substring of the guest's name without regard to case, and
/// the phone number criteria must match exactly.  Absent criteria match everything.
pub(crate) async fn search_reservations(
    ex: &mut Executor,
    criteria: &SearchCriteria,
) -> DbResult<Vec<Reservation>> {
    let full_name_pattern = criteria.full_name_pattern();

    let mut reservations = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM reservations
                WHERE
                    ($1::TEXT IS NULL OR full_name ILIKE $1 ESCAPE '\\')
                    AND ($2::TEXT IS NULL OR phone_number = $2)
                ORDER BY reservation_id
            ";
            let mut rows = sqlx::query(query_str)
                .bind(full_name_pattern.as_deref())
                .bind(criteria.phone_number.as_deref())
                .fetch(&mut **ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                reservations.push(Reservation::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            // SQLite only folds ASCII letters, so match against a copy of the name that was
            // lowercased on write.
            let query_str = "
                SELECT * FROM reservations
                WHERE
                    (?1 IS NULL OR full_name_folded LIKE ?1 ESCAPE '\\')
                    AND (?2 IS NULL OR phone_number = ?2)
                ORDER BY reservation_id
            ";
            let mut rows = sqlx::query(query_str)
                .bind(full_name_pattern.map(|p| p.to_lowercase()))
                .bind(criteria.phone_number.as_deref())
                .fetch(&mut **ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                reservations.push(Reservation::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(reservations)
}

/// Creates a new reservation with the given `fields`, timestamped at `now`, and returns it as
/// stored.
pub(crate) async fn create_reservation(
    ex: &mut Executor,
    fields: &ReservationFields,
    now: OffsetDateTime,
) -> DbResult<Reservation> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO reservations (
                    full_name, email, phone_number, check_in_date, check_out_date,
                    type_of_room, number_of_guest, number_of_rooms, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
                RETURNING *
            ";
            let row = sqlx::query(query_str)
                .bind(&fields.full_name)
                .bind(fields.email.as_str())
                .bind(fields.phone_number.as_str())
                .bind(fields.check_in_date)
                .bind(fields.check_out_date)
                .bind(&fields.type_of_room)
                .bind(fields.number_of_guest)
                .bind(fields.number_of_rooms)
                .bind(now)
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Reservation::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now);

            let query_str = "
                INSERT INTO reservations (
                    full_name, email, phone_number, check_in_date, check_out_date,
                    type_of_room, number_of_guest, number_of_rooms,
                    created_at_secs, created_at_nsecs, updated_at_secs, updated_at_nsecs,
                    full_name_folded
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?9, ?10, ?11)
                RETURNING *
            ";
            let row = sqlx::query(query_str)
                .bind(&fields.full_name)
                .bind(fields.email.as_str())
                .bind(fields.phone_number.as_str())
                .bind(fields.check_in_date)
                .bind(fields.check_out_date)
                .bind(&fields.type_of_room)
                .bind(fields.number_of_guest)
                .bind(fields.number_of_rooms)
                .bind(now_secs)
                .bind(now_nsecs)
                .bind(fields.full_name.to_lowercase())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Reservation::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces all descriptive fields of the reservation identified by `id` with `fields`, marking it
/// as updated at `now`, and returns it as stored.
pub(crate) async fn update_reservation(
    ex: &mut Executor,
    id: ReservationId,
    fields: &ReservationFields,
    now: OffsetDateTime,
) -> DbResult<Reservation> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE reservations
                SET
                    full_name = $1, email = $2, phone_number = $3,
                    check_in_date = $4, check_out_date = $5, type_of_room = $6,
                    number_of_guest = $7, number_of_rooms = $8, updated_at = $9
                WHERE reservation_id = $10
                RETURNING *
            ";
            let row = sqlx::query(query_str)
                .bind(&fields.full_name)
                .bind(fields.email.as_str())
                .bind(fields.phone_number.as_str())
                .bind(fields.check_in_date)
                .bind(fields.check_out_date)
                .bind(&fields.type_of_room)
                .bind(fields.number_of_guest)
                .bind(fields.number_of_rooms)
                .bind(now)
                .bind(id.as_i64())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Reservation::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now);

            let query_str = "
                UPDATE reservations
                SET
                    full_name = ?, email = ?, phone_number = ?,
                    check_in_date = ?, check_out_date = ?, type_of_room = ?,
                    number_of_guest = ?, number_of_rooms = ?,
                    updated_at_secs = ?, updated_at_nsecs = ?, full_name_folded = ?
                WHERE reservation_id = ?
                RETURNING *
            ";
            let row = sqlx::query(query_str)
                .bind(&fields.full_name)
                .bind(fields.email.as_str())
                .bind(fields.phone_number.as_str())
                .bind(fields.check_in_date)
                .bind(fields.check_out_date)
                .bind(&fields.type_of_room)
                .bind(fields.number_of_guest)
                .bind(fields.number_of_rooms)
                .bind(now_secs)
                .bind(now_nsecs)
                .bind(fields.full_name.to_lowercase())
                .bind(id.as_i64())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Reservation::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes the reservation identified by `id`.
pub(crate) async fn delete_reservation(ex: &mut Executor, id: ReservationId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM reservations WHERE reservation_id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM reservations WHERE reservation_id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
