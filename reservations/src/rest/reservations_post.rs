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

//! API to create a new reservation.

use crate::driver::Driver;
use crate::model::Reservation;
use crate::rest::validation::validate;
use axum::extract::State;
use axum::{Json, http};
use hotel_core::rest::{DataResponse, RestResult};
use serde_json::Value;

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(body): Json<Value>,
) -> RestResult<(http::StatusCode, Json<DataResponse<Reservation>>)> {
    let fields = validate(&body)?;
    let reservation = driver.create_reservation(fields).await?;
    Ok((http::StatusCode::CREATED, Json(DataResponse::new(reservation))))
}
