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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use tower_http::cors::CorsLayer;

mod reservation_delete;
mod reservation_get;
mod reservation_put;
mod reservations_by_guest_get;
mod reservations_get;
mod reservations_post;
#[cfg(test)]
mod testutils;
mod validation;

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;

    // The router requires parameters in the same position to share their name, so `:key` holds
    // the reservation identifier in one route and the guest's full name in the other.
    Router::new()
        .route("/reservations", get(reservations_get::handler).post(reservations_post::handler))
        .route(
            "/reservations/:key",
            get(reservation_get::handler)
                .put(reservation_put::handler)
                .delete(reservation_delete::handler),
        )
        .route("/reservations/:key/:phone_number", get(reservations_by_guest_get::handler))
        .layer(CorsLayer::permissive())
        .with_state(driver)
}
