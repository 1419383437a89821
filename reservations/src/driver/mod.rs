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

//! Business logic for the service.

use hotel_core::clocks::Clock;
use hotel_core::db::{Db, DbError};
use hotel_core::driver::DriverError;
use std::sync::Arc;

mod reservation;
mod reservations;
#[cfg(test)]
pub(crate) mod testutils;

/// Error message for operations that target a reservation that does not exist.
const RESERVATION_NOT_FOUND: &str = "Reservation not found";

/// Converts a database error into a driver error, describing missing entities as reservations.
fn map_not_found(e: DbError) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(RESERVATION_NOT_FOUND.to_owned()),
        e => e.into(),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": each of them runs a single
/// statement against the database, so it's incorrect for the caller to chain separate calls.  For
/// this reason, these operations consume the driver in an attempt to minimize the possibility of
/// executing two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Clock used to timestamp changes to reservations.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}
