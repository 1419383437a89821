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

//! API to delete a reservation.

use crate::driver::Driver;
use crate::model::ReservationId;
use axum::extract::{Path, State};
use axum::http;
use hotel_core::rest::{EmptyBody, RestError, RestResult};

/// DELETE handler for this API.
///
/// The identifier in the path is only used as a lookup key: identifiers that cannot name any
/// reservation are reported as not found.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> RestResult<http::StatusCode> {
    let id = ReservationId::parse(&id)
        .map_err(|_| RestError::NotFound("Reservation not found".to_owned()))?;
    driver.delete_reservation(id).await?;
    Ok(http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use hotel_core::rest::testutils::*;
    use hotel_core::test_payload_must_be_empty;

    fn route<I: std::fmt::Display>(id: I) -> (http::Method, String) {
        (http::Method::DELETE, format!("/reservations/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let target = context.create("John Doe").await;
        let other = context.create("Other Guest").await;

        OneShotBuilder::new(context.app(), route(target.id().as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert_eq!(vec![other], context.all().await);
    }

    #[tokio::test]
    async fn test_twice() {
        let context = TestContext::setup().await;

        let target = context.create("John Doe").await;

        OneShotBuilder::new(context.app(), route(target.id().as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        OneShotBuilder::new(context.app(), route(target.id().as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Reservation not found$")
            .await;
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let context = TestContext::setup().await;

        let existing = context.create("John Doe").await;

        for id in ["abc", "search", "0"] {
            OneShotBuilder::new(context.app(), route(id))
                .send_empty()
                .await
                .expect_status(http::StatusCode::NOT_FOUND)
                .expect_error("^Reservation not found$")
                .await;
        }

        assert_eq!(vec![existing], context.all().await);
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
