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

//! Database tests shared by all implementations.

use crate::db::*;
use crate::model::testutils::fields_for;
use hotel_core::db::Db;
use std::sync::Arc;
use time::macros::datetime;

/// Creates a reservation for `full_name` with default contents and returns it.
async fn create_simple(db: &Arc<dyn Db + Send + Sync>, full_name: &str) -> Reservation {
    create_reservation(
        &mut db.ex().await.unwrap(),
        &fields_for(full_name),
        datetime!(2024-01-01 00:00:00 UTC),
    )
    .await
    .unwrap()
}

/// Returns the full names of the `reservations`, in order.
fn names(reservations: &[Reservation]) -> Vec<&str> {
    reservations.iter().map(|r| r.fields().full_name.as_str()).collect()
}

pub(crate) async fn test_create_and_get(db: Arc<dyn Db + Send + Sync>) {
    let fields = fields_for("John Doe");
    let now = datetime!(2024-03-15 08:30:00.123456 UTC);

    let created = create_reservation(&mut db.ex().await.unwrap(), &fields, now).await.unwrap();
    assert!(created.id().as_i64() > 0);
    assert_eq!(&fields, created.fields());
    assert_eq!(now, *created.created_at());
    assert_eq!(now, *created.updated_at());

    let fetched = get_reservation(&mut db.ex().await.unwrap(), *created.id()).await.unwrap();
    assert_eq!(created, fetched);
}

pub(crate) async fn test_create_assigns_novel_ids(db: Arc<dyn Db + Send + Sync>) {
    let first = create_simple(&db, "First").await;
    let second = create_simple(&db, "Second").await;
    assert!(first.id() < second.id());

    delete_reservation(&mut db.ex().await.unwrap(), *second.id()).await.unwrap();

    let third = create_simple(&db, "Third").await;
    assert!(second.id() < third.id());
}

pub(crate) async fn test_get_not_found(db: Arc<dyn Db + Send + Sync>) {
    create_simple(&db, "Someone").await;

    assert_eq!(
        DbError::NotFound,
        get_reservation(&mut db.ex().await.unwrap(), ReservationId::new(12345).unwrap())
            .await
            .unwrap_err()
    );
}

pub(crate) async fn test_list_reservations(db: Arc<dyn Db + Send + Sync>) {
    assert!(list_reservations(&mut db.ex().await.unwrap()).await.unwrap().is_empty());

    create_simple(&db, "Charlie").await;
    create_simple(&db, "Alice").await;
    create_simple(&db, "Bob").await;

    let reservations = list_reservations(&mut db.ex().await.unwrap()).await.unwrap();
    assert_eq!(vec!["Charlie", "Alice", "Bob"], names(&reservations));
}

pub(crate) async fn test_search_by_full_name(db: Arc<dyn Db + Send + Sync>) {
    create_simple(&db, "Test Reservation").await;
    create_simple(&db, "Another Guest").await;
    create_simple(&db, "Latest Arrival").await;

    for query in ["test", "TEST", "Test"] {
        let criteria = SearchCriteria::new(Some(query.to_owned()), None);
        let reservations =
            search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap();
        assert_eq!(vec!["Test Reservation", "Latest Arrival"], names(&reservations));
    }

    let criteria = SearchCriteria::new(Some("nobody".to_owned()), None);
    assert!(search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap().is_empty());
}

pub(crate) async fn test_search_by_full_name_non_ascii(db: Arc<dyn Db + Send + Sync>) {
    create_simple(&db, "ÉMILE Zola").await;
    create_simple(&db, "Emile Other").await;

    for query in ["émile", "Émile", "ÉMILE"] {
        let criteria = SearchCriteria::new(Some(query.to_owned()), None);
        let reservations =
            search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap();
        assert_eq!(vec!["ÉMILE Zola"], names(&reservations));
    }
}

pub(crate) async fn test_search_after_rename(db: Arc<dyn Db + Send + Sync>) {
    let created = create_simple(&db, "Old Name").await;
    update_reservation(
        &mut db.ex().await.unwrap(),
        *created.id(),
        &fields_for("Ñandú Nuevo"),
        datetime!(2024-02-01 12:00:00 UTC),
    )
    .await
    .unwrap();

    let criteria = SearchCriteria::new(Some("old".to_owned()), None);
    assert!(search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap().is_empty());

    let criteria = SearchCriteria::new(Some("ñandú".to_owned()), None);
    let reservations = search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap();
    assert_eq!(vec!["Ñandú Nuevo"], names(&reservations));
}

pub(crate) async fn test_search_wildcards_are_literal(db: Arc<dyn Db + Send + Sync>) {
    create_simple(&db, "Room 100% Booked").await;
    create_simple(&db, "Room 1000 Guest").await;
    create_simple(&db, "A_B").await;
    create_simple(&db, "AxB").await;

    let criteria = SearchCriteria::new(Some("0%".to_owned()), None);
    let reservations = search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap();
    assert_eq!(vec!["Room 100% Booked"], names(&reservations));

    let criteria = SearchCriteria::new(Some("a_b".to_owned()), None);
    let reservations = search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap();
    assert_eq!(vec!["A_B"], names(&reservations));
}

pub(crate) async fn test_search_by_phone_number(db: Arc<dyn Db + Send + Sync>) {
    let now = datetime!(2024-01-01 00:00:00 UTC);
    let mut fields = fields_for("John Doe");
    fields.phone_number = PhoneNumber::new("555-0101").unwrap();
    create_reservation(&mut db.ex().await.unwrap(), &fields, now).await.unwrap();
    let mut fields = fields_for("Jane Doe");
    fields.phone_number = PhoneNumber::new("555-0102").unwrap();
    create_reservation(&mut db.ex().await.unwrap(), &fields, now).await.unwrap();
    let mut fields = fields_for("John Smith");
    fields.phone_number = PhoneNumber::new("555-0102").unwrap();
    create_reservation(&mut db.ex().await.unwrap(), &fields, now).await.unwrap();

    let criteria = SearchCriteria::new(None, Some("555-0102".to_owned()));
    let reservations = search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap();
    assert_eq!(vec!["Jane Doe", "John Smith"], names(&reservations));

    let criteria = SearchCriteria::new(Some("john".to_owned()), Some("555-0102".to_owned()));
    let reservations = search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap();
    assert_eq!(vec!["John Smith"], names(&reservations));

    let criteria = SearchCriteria::new(None, Some("555-010".to_owned()));
    assert!(search_reservations(&mut db.ex().await.unwrap(), &criteria).await.unwrap().is_empty());

    let reservations =
        search_reservations(&mut db.ex().await.unwrap(), &SearchCriteria::default()).await.unwrap();
    assert_eq!(vec!["John Doe", "Jane Doe", "John Smith"], names(&reservations));
}

pub(crate) async fn test_update_ok(db: Arc<dyn Db + Send + Sync>) {
    let created = create_simple(&db, "John Doe").await;
    let other = create_simple(&db, "Unrelated").await;

    let mut fields = fields_for("Johnny Doe");
    fields.type_of_room = "Suite".to_owned();
    fields.number_of_guest = 4;
    fields.number_of_rooms = 2;
    let later = datetime!(2024-02-01 12:00:00 UTC);
    let updated =
        update_reservation(&mut db.ex().await.unwrap(), *created.id(), &fields, later)
            .await
            .unwrap();
    assert_eq!(created.id(), updated.id());
    assert_eq!(&fields, updated.fields());
    assert_eq!(created.created_at(), updated.created_at());
    assert_eq!(later, *updated.updated_at());

    assert_eq!(updated, get_reservation(&mut db.ex().await.unwrap(), *created.id()).await.unwrap());
    assert_eq!(other, get_reservation(&mut db.ex().await.unwrap(), *other.id()).await.unwrap());
}

pub(crate) async fn test_update_not_found(db: Arc<dyn Db + Send + Sync>) {
    let created = create_simple(&db, "John Doe").await;

    assert_eq!(
        DbError::NotFound,
        update_reservation(
            &mut db.ex().await.unwrap(),
            ReservationId::new(created.id().as_i64() + 1).unwrap(),
            &fields_for("Someone Else"),
            datetime!(2024-02-01 12:00:00 UTC),
        )
        .await
        .unwrap_err()
    );

    let reservations = list_reservations(&mut db.ex().await.unwrap()).await.unwrap();
    assert_eq!(vec![created], reservations);
}

pub(crate) async fn test_delete_ok(db: Arc<dyn Db + Send + Sync>) {
    let first = create_simple(&db, "First").await;
    let second = create_simple(&db, "Second").await;

    delete_reservation(&mut db.ex().await.unwrap(), *first.id()).await.unwrap();

    let reservations = list_reservations(&mut db.ex().await.unwrap()).await.unwrap();
    assert_eq!(vec![second], reservations);
}

pub(crate) async fn test_delete_not_found(db: Arc<dyn Db + Send + Sync>) {
    let created = create_simple(&db, "First").await;
    delete_reservation(&mut db.ex().await.unwrap(), *created.id()).await.unwrap();

    assert_eq!(
        DbError::NotFound,
        delete_reservation(&mut db.ex().await.unwrap(), *created.id()).await.unwrap_err()
    );
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        hotel_core::db::testutils::generate_tests!(
            $(#[$extra],)?
            $setup,
            $crate::db::tests,
            test_create_and_get,
            test_create_assigns_novel_ids,
            test_get_not_found,
            test_list_reservations,
            test_search_by_full_name,
            test_search_by_full_name_non_ascii,
            test_search_after_rename,
            test_search_wildcards_are_literal,
            test_search_by_phone_number,
            test_update_ok,
            test_update_not_found,
            test_delete_ok,
            test_delete_not_found
        );
    }
];

mod sqlite {
    use super::*;

    /// Creates an in-memory SQLite database with the schema already in place.
    async fn setup() -> Arc<dyn Db + Send + Sync> {
        let db = Arc::new(hotel_core::db::sqlite::testutils::setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(setup().await);
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;

    /// Creates a connection to the test PostgreSQL database with the schema already in place.
    async fn setup() -> Arc<dyn Db + Send + Sync> {
        let db = Arc::new(hotel_core::db::postgres::testutils::setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(
        setup().await,
        #[ignore = "Requires environment configuration and is expensive"]
    );
}
