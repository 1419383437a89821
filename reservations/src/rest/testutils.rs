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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::testutils::fields_for;
use crate::model::{Reservation, ReservationId};
use crate::rest::app;
use axum::Router;
use hotel_core::clocks::testutils::SettableClock;
use hotel_core::db::{Db, DbError};
use std::sync::Arc;
use time::macros::datetime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the app.
    clock: Arc<SettableClock>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database and a settable clock.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(hotel_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2024-05-01 09:00:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        let app = app(driver);
        Self { db, clock, app }
    }

    /// Returns a clone of the app under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Returns the clock used by the app.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Creates a reservation for `full_name` directly in the database.
    pub(crate) async fn create(&self, full_name: &str) -> Reservation {
        db::create_reservation(
            &mut self.db.ex().await.unwrap(),
            &fields_for(full_name),
            datetime!(2024-04-01 00:00:00 UTC),
        )
        .await
        .unwrap()
    }

    /// Gets the reservation `id` from the database, if it exists.
    pub(crate) async fn get(&self, id: ReservationId) -> Option<Reservation> {
        match db::get_reservation(&mut self.db.ex().await.unwrap(), id).await {
            Ok(reservation) => Some(reservation),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Unexpected database error: {}", e),
        }
    }

    /// Returns all reservations in the database.
    pub(crate) async fn all(&self) -> Vec<Reservation> {
        db::list_reservations(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}
