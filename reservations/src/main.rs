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

//! Server entry point for the hotel reservations service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use hotel_core::db::Db;
use hotel_core::db::postgres::{PostgresDb, PostgresOptions};
use hotel_core::env::get_optional_var;
use hotel_reservations::db::init_schema;
use hotel_reservations::serve;
use log::{error, info};
use std::error::Error;
use std::net::Ipv4Addr;
use std::process;
use std::sync::Arc;

/// Port to listen on when `RESERVATIONS_PORT` is not set.
const DEFAULT_PORT: u16 = 5001;

/// Connects to the database, brings its schema up to date and serves requests.
async fn run() -> Result<(), Box<dyn Error>> {
    let port = get_optional_var::<u16>("RESERVATIONS", "PORT")?.unwrap_or(DEFAULT_PORT);
    let addr = (Ipv4Addr::UNSPECIFIED, port);

    let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
    let db = Arc::new(PostgresDb::connect(db_opts)?);
    init_schema(&mut db.ex().await?).await?;
    info!("Database schema initialized");

    serve(addr, db).await
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("Server failed: {}", e);
        process::exit(1);
    }
}
