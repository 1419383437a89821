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

//! Operations on one reservation.

use crate::db;
use crate::driver::{Driver, map_not_found};
use crate::model::{Reservation, ReservationFields, ReservationId};
use hotel_core::driver::DriverResult;

impl Driver {
    /// Gets the reservation identified by `id`.
    pub(crate) async fn get_reservation(self, id: ReservationId) -> DriverResult<Reservation> {
        let reservation =
            db::get_reservation(&mut self.db.ex().await?, id).await.map_err(map_not_found)?;
        Ok(reservation)
    }

    /// Creates a new reservation with the given `fields`.
    pub(crate) async fn create_reservation(
        self,
        fields: ReservationFields,
    ) -> DriverResult<Reservation> {
        let now = self.clock.now_utc();
        let reservation = db::create_reservation(&mut self.db.ex().await?, &fields, now).await?;
        Ok(reservation)
    }

    /// Replaces all descriptive fields of the reservation identified by `id` with `fields`.
    pub(crate) async fn update_reservation(
        self,
        id: ReservationId,
        fields: ReservationFields,
    ) -> DriverResult<Reservation> {
        let now = self.clock.now_utc();
        let reservation = db::update_reservation(&mut self.db.ex().await?, id, &fields, now)
            .await
            .map_err(map_not_found)?;
        Ok(reservation)
    }

    /// Deletes the reservation identified by `id`.
    pub(crate) async fn delete_reservation(self, id: ReservationId) -> DriverResult<()> {
        db::delete_reservation(&mut self.db.ex().await?, id).await.map_err(map_not_found)?;
        Ok(())
    }
}
