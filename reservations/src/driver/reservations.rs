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

//! Operations on collections of reservations.

use crate::db;
use crate::driver::Driver;
use crate::model::{Reservation, SearchCriteria};
use hotel_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Gets all reservations.
    pub(crate) async fn list_reservations(self) -> DriverResult<Vec<Reservation>> {
        let reservations = db::list_reservations(&mut self.db.ex().await?).await?;
        Ok(reservations)
    }

    /// Gets all reservations that match the `criteria`.  Finding none is an error.
    pub(crate) async fn search_reservations(
        self,
        criteria: SearchCriteria,
    ) -> DriverResult<Vec<Reservation>> {
        let reservations = db::search_reservations(&mut self.db.ex().await?, &criteria).await?;
        if reservations.is_empty() {
            return Err(DriverError::NotFound("No reservations found".to_owned()));
        }
        Ok(reservations)
    }
}
