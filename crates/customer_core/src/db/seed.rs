//! Default customer data for fresh stores.
//!
//! Seeding is an explicit bootstrap step; `open_db` never calls it.
//! Rows use fixed identifiers and `INSERT OR IGNORE`, so reseeding is a no-op
//! and never overwrites edits made to the default records.

use crate::db::DbResult;
use crate::model::customer::Customer;
use log::info;
use rusqlite::{params, Connection};

/// Returns the default customer set with fixed identifiers 1..=3.
pub fn default_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: Some(1),
            name: "John Doe".to_string(),
            address: "123 Main St".to_string(),
            dni: "12345678".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "111-222-3333".to_string(),
            mobile: "444-555-6666".to_string(),
            state: "State1".to_string(),
            city: "City1".to_string(),
        },
        Customer {
            id: Some(2),
            name: "Jane Doe".to_string(),
            address: "456 Main St".to_string(),
            dni: "87654321".to_string(),
            email: "jane.doe@example.com".to_string(),
            phone: "777-888-9999".to_string(),
            mobile: "000-111-2222".to_string(),
            state: "State2".to_string(),
            city: "City2".to_string(),
        },
        Customer {
            id: Some(3),
            name: "Juan Perez".to_string(),
            address: "495 Main St".to_string(),
            dni: "87656648".to_string(),
            email: "juanperez@gmail.com".to_string(),
            phone: "777-128-4545".to_string(),
            mobile: "000-166-1741".to_string(),
            state: "Houston".to_string(),
            city: "Texas".to_string(),
        },
    ]
}

/// Inserts the default customers that are not present yet.
///
/// Returns the number of rows actually inserted.
pub fn seed_default_customers(conn: &mut Connection) -> DbResult<usize> {
    let tx = conn.transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO customers (
                id, name, address, dni, email, phone, mobile, state, city
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        )?;
        for customer in default_customers() {
            inserted += stmt.execute(params![
                customer.id,
                customer.name,
                customer.address,
                customer.dni,
                customer.email,
                customer.phone,
                customer.mobile,
                customer.state,
                customer.city,
            ])?;
        }
    }
    tx.commit()?;

    info!("event=db_seed module=db status=ok inserted={inserted}");
    Ok(inserted)
}
