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

//! API to list reservations, optionally filtered by guest.

use crate::driver::Driver;
use crate::model::{Reservation, SearchCriteria};
use axum::Json;
use axum::extract::{Query, State};
use hotel_core::rest::{DataResponse, EmptyBody, RestResult};
use serde::{Deserialize, Serialize};

/// Query parameters accepted by this API.  All are optional.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct ListQuery {
    /// Substring to look for in the guest's full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,

    /// Exact phone number of the guest.
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
}

/// GET handler for this API.
///
/// Without criteria, returns all reservations.  With criteria, behaves like a search and fails if
/// nothing matches.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<ListQuery>,
    _: EmptyBody,
) -> RestResult<Json<DataResponse<Vec<Reservation>>>> {
    let criteria = SearchCriteria::new(query.full_name, query.phone_number);
    let reservations = if criteria.is_empty() {
        driver.list_reservations().await?
    } else {
        driver.search_reservations(criteria).await?
    };
    Ok(Json(DataResponse::new(reservations)))
}
