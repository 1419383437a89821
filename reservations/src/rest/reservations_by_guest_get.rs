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

//! API to look up reservations by the guest's full name and phone number.

use crate::driver::Driver;
use crate::model::{Reservation, SearchCriteria};
use axum::Json;
use axum::extract::{Path, State};
use hotel_core::rest::{DataResponse, EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path((full_name, phone_number)): Path<(String, String)>,
    _: EmptyBody,
) -> RestResult<Json<DataResponse<Vec<Reservation>>>> {
    let criteria = SearchCriteria::new(Some(full_name), Some(phone_number));
    let reservations = driver.search_reservations(criteria).await?;
    Ok(Json(DataResponse::new(reservations)))
}
