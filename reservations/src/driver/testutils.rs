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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::testutils::fields_for;
use crate::model::Reservation;
use hotel_core::clocks::testutils::SettableClock;
use hotel_core::clocks::Clock;
use hotel_core::db::{Db, Executor};
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::datetime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the driver, which tests can advance at will.
    pub(crate) clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a settable clock.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(hotel_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2024-05-01 09:00:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Obtains a new database executor.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a clone of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Returns the current time as seen by the driver.
    pub(crate) fn now(&self) -> OffsetDateTime {
        self.clock.now_utc()
    }

    /// Creates a reservation for `full_name` directly in the database.
    pub(crate) async fn create(&self, full_name: &str) -> Reservation {
        db::create_reservation(&mut self.ex().await, &fields_for(full_name), self.now())
            .await
            .unwrap()
    }

    /// Returns all reservations in the database.
    pub(crate) async fn all(&self) -> Vec<Reservation> {
        db::list_reservations(&mut self.ex().await).await.unwrap()
    }
}
