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

//! Shared building blocks for the hotel web services.
//!
//! Services built on top of this crate are split in layers, each living in its own module:
//!
//! 1.  `model`: plain data types for the domain.  Constructors validate their input and return
//!     `ModelError` on failure so that invalid values cannot be represented.
//!
//! 1.  `db`: the persistence layer.  Services write free functions that take an `Executor` and
//!     issue one query each, with one match arm per supported database system.
//!
//! 1.  `driver`: the business layer.  A service-specific `Driver` owns the injected `Db` and any
//!     other collaborators (such as a `Clock`) and turns database outcomes into domain outcomes.
//!
//! 1.  `rest`: the HTTP layer.  Services expose an `app` function returning an `axum::Router`
//!     whose state is the `Driver`.
//!
//! 1.  `main`: reads the configuration from the environment and calls the service's `serve`.
//!
//! Every layer has its own error type (`ModelError`, `DbError`, `DriverError`, `RestError`) with
//! `From` conversions between them, so errors float up with `?` and become HTTP status codes once
//! they leave a REST handler.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
