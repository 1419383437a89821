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

//! API to replace the contents of an existing reservation.

use crate::driver::Driver;
use crate::model::{Reservation, ReservationId};
use crate::rest::validation::validate;
use axum::Json;
use axum::extract::{Path, State};
use hotel_core::rest::{DataResponse, RestError, RestResult};
use serde_json::Value;

/// PUT handler for this API.
///
/// The identifier in the path is only used as a lookup key: identifiers that cannot name any
/// reservation are reported as not found.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> RestResult<Json<DataResponse<Reservation>>> {
    let fields = validate(&body)?;
    let id = ReservationId::parse(&id)
        .map_err(|_| RestError::NotFound("Reservation not found".to_owned()))?;
    let reservation = driver.update_reservation(id, fields).await?;
    Ok(Json(DataResponse::new(reservation)))
}
