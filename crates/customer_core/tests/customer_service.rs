use customer_core::db::open_db_in_memory;
use customer_core::{
    Customer, CustomerFilter, CustomerService, CustomerServiceError, NoContent, NotFound,
    Outcome, SqliteCustomerRepository,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> CustomerService<SqliteCustomerRepository<'_>> {
    CustomerService::new(SqliteCustomerRepository::try_new(conn).unwrap())
}

fn john() -> Customer {
    Customer {
        id: None,
        name: "John Doe".to_string(),
        address: "Address 1".to_string(),
        dni: "37333444".to_string(),
        email: "john.doe@example.com".to_string(),
        phone: "1111111111".to_string(),
        mobile: "2222222222".to_string(),
        state: "California".to_string(),
        city: "Los Angeles".to_string(),
    }
}

fn jane() -> Customer {
    Customer {
        id: None,
        name: "Jane Doe".to_string(),
        address: "Address 2".to_string(),
        dni: "37333445".to_string(),
        email: "jane.doe@example.com".to_string(),
        phone: "4586895523".to_string(),
        mobile: "4526897140".to_string(),
        state: "California".to_string(),
        city: "San Diego".to_string(),
    }
}

fn create(
    service: &CustomerService<SqliteCustomerRepository<'_>>,
    customer: Customer,
) -> Customer {
    service.create_edit(&customer).unwrap().found().unwrap()
}

#[test]
fn list_all_returns_every_customer() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    create(&service, john());
    create(&service, jane());

    assert_eq!(service.list_all().unwrap().len(), 2);
}

#[test]
fn empty_store_lists_empty_but_every_lookup_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert!(service.list_all().unwrap().is_empty());

    assert_eq!(
        service.get_by_id(1).unwrap(),
        Outcome::NotFound(NotFound::Id(1))
    );
    assert!(service.get_by_dni("37333444").unwrap().is_not_found());
    assert!(service.get_by_name("John Doe").unwrap().is_not_found());
    assert!(service.get_by_state("California").unwrap().is_not_found());
    assert!(service.get_by_city("Los Angeles").unwrap().is_not_found());
    assert!(service.get_by_email("john.doe@example.com").unwrap().is_not_found());
    assert!(service.get_by_phone_number("1111111111").unwrap().is_not_found());
    assert!(service.get_by_address("Address 1").unwrap().is_not_found());
}

#[test]
fn create_assigns_id_and_round_trips_every_field() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let payload = john();

    let created = create(&service, payload.clone());
    let id = created.id.unwrap();
    assert!(id > 0);

    let loaded = service.get_by_id(id).unwrap().found().unwrap();
    assert_eq!(loaded, payload.with_id(id));
}

#[test]
fn get_by_id_misses_and_delete_of_missing_id_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let stored = create(&service, john());
    let missing = stored.id.unwrap() + 100;

    assert_eq!(
        service.get_by_id(missing).unwrap(),
        Outcome::NotFound(NotFound::Id(missing))
    );
    assert_eq!(
        service.delete(missing).unwrap(),
        Outcome::NotFound(NotFound::Id(missing))
    );
    assert_eq!(service.list_all().unwrap(), vec![stored]);
}

#[test]
fn update_replaces_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = create(&service, john()).id.unwrap();

    let edit = Customer {
        name: "John Updated".to_string(),
        email: "john.updated@example.com".to_string(),
        ..Customer::default()
    }
    .with_id(id);
    let updated = service.create_edit(&edit).unwrap().found().unwrap();

    assert_eq!(updated, edit);
    assert_eq!(service.get_by_id(id).unwrap().found().unwrap(), edit);
    assert!(service.get_by_city("Los Angeles").unwrap().is_not_found());
}

#[test]
fn repeated_identical_update_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = create(&service, john()).id.unwrap();
    create(&service, jane());

    let mut edit = john().with_id(id);
    edit.city = "Pasadena".to_string();

    assert!(service.create_edit(&edit).unwrap().is_found());
    let after_once = service.list_all().unwrap();
    assert!(service.create_edit(&edit).unwrap().is_found());
    let after_twice = service.list_all().unwrap();

    assert_eq!(after_once, after_twice);
    assert_eq!(after_once.len(), 2);
}

#[test]
fn update_of_unknown_id_is_rejected_without_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let outcome = service.create_edit(&john().with_id(77)).unwrap();

    assert_eq!(outcome, Outcome::NotFound(NotFound::RejectedUpdate(77)));
    assert!(service.list_all().unwrap().is_empty());
    assert!(service.get_by_id(77).unwrap().is_not_found());
}

#[test]
fn create_edit_with_zero_id_creates_a_record() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let payload: Customer = serde_json::from_str(r#"{"id":0,"name":"Juan Perez"}"#).unwrap();

    let from_wire = service.create_edit(&payload).unwrap().found().unwrap();
    let from_model = create(&service, john().with_id(0));

    assert!(from_wire.id.is_some_and(|id| id > 0));
    assert_eq!(from_wire.name, "Juan Perez");
    assert!(from_model.id.is_some_and(|id| id > 0));
    assert_ne!(from_wire.id, from_model.id);
    assert_eq!(service.list_all().unwrap().len(), 2);
}

#[test]
fn create_edit_rejects_negative_id() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.create_edit(&john().with_id(-1)).unwrap_err();

    assert!(matches!(err, CustomerServiceError::Validation(_)));
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn phone_lookup_matches_phone_or_mobile() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let stored = create(&service, john());

    assert_eq!(
        service.get_by_phone_number("1111111111").unwrap(),
        Outcome::Found(vec![stored.clone()])
    );
    assert_eq!(
        service.get_by_phone_number("2222222222").unwrap(),
        Outcome::Found(vec![stored])
    );
    assert_eq!(
        service.get_by_phone_number("9999999999").unwrap(),
        Outcome::NotFound(NotFound::NoMatch(CustomerFilter::PhoneNumber(
            "9999999999".to_string()
        )))
    );
}

#[test]
fn delete_removes_only_the_target() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let a = create(&service, john());
    let b = create(&service, jane());

    assert_eq!(
        service.delete(a.id.unwrap()).unwrap(),
        Outcome::Found(NoContent)
    );

    assert!(service.get_by_id(a.id.unwrap()).unwrap().is_not_found());
    assert_eq!(service.get_by_id(b.id.unwrap()).unwrap(), Outcome::Found(b));
}

#[test]
fn predicate_lookups_return_all_matches() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let a = create(&service, john());
    let b = create(&service, jane());

    assert_eq!(
        service.get_by_state("California").unwrap(),
        Outcome::Found(vec![a.clone(), b.clone()])
    );
    assert_eq!(
        service.get_by_city("San Diego").unwrap(),
        Outcome::Found(vec![b.clone()])
    );
    assert_eq!(
        service.get_by_name("John Doe").unwrap(),
        Outcome::Found(vec![a.clone()])
    );
    assert_eq!(
        service.get_by_address("Address 2").unwrap(),
        Outcome::Found(vec![b.clone()])
    );
    assert_eq!(
        service.get_by_email("john.doe@example.com").unwrap(),
        Outcome::Found(vec![a.clone()])
    );
    assert_eq!(
        service.get_by_dni("37333445").unwrap(),
        Outcome::Found(vec![b])
    );
    assert!(service.get_by_name("john doe").unwrap().is_not_found());
}

#[test]
fn duplicate_dni_and_email_are_accepted_and_both_returned() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let first = create(&service, john());
    let mut twin = jane();
    twin.dni = john().dni;
    twin.email = john().email;
    let second = create(&service, twin);

    let by_dni = service.get_by_dni("37333444").unwrap().found().unwrap();
    let by_email = service
        .get_by_email("john.doe@example.com")
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(by_dni, vec![first.clone(), second.clone()]);
    assert_eq!(by_email, vec![first, second]);
}

#[test]
fn separate_connections_to_one_file_see_each_others_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("customers.sqlite3");

    let id = {
        let conn = customer_core::db::open_db(&path).unwrap();
        create(&service(&conn), john()).id.unwrap()
    };

    let conn = customer_core::db::open_db(&path).unwrap();
    let loaded = service(&conn).get_by_id(id).unwrap().found().unwrap();
    assert_eq!(loaded.name, "John Doe");
}
