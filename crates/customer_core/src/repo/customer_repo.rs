//! Customer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed lookup, equality-predicate queries and single-record
//!   writes over the `customers` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Customer::validate()` before SQL mutations.
//! - Every mutation runs in its own IMMEDIATE transaction and is committed
//!   before success is returned; early returns roll back on drop.
//! - `update_fields` performs the existence check and the write inside the
//!   same transaction, so no other writer can interleave between them.
//! - Read results are ordered by `id ASC`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::customer::{Customer, CustomerId, CustomerValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    name,
    address,
    dni,
    email,
    phone,
    mobile,
    state,
    city
FROM customers";

const REQUIRED_COLUMNS: [&str; 9] = [
    "id", "name", "address", "dni", "email", "phone", "mobile", "state", "city",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for customer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CustomerValidationError),
    Db(DbError),
    NotFound(CustomerId),
    /// Insert was handed a record that already carries an identifier.
    AlreadyAssigned(CustomerId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "customer not found: {id}"),
            Self::AlreadyAssigned(id) => {
                write!(f, "cannot insert customer that already has id {id}")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted customer data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CustomerValidationError> for RepoError {
    fn from(value: CustomerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Exact-match predicate over one non-key attribute.
///
/// Matching is byte-for-byte: no case folding, trimming or wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerFilter {
    Dni(String),
    Name(String),
    State(String),
    City(String),
    Email(String),
    /// Matches either `phone` or `mobile`.
    PhoneNumber(String),
    Address(String),
}

impl CustomerFilter {
    /// Stable attribute label, safe for logs (carries no value).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dni(_) => "dni",
            Self::Name(_) => "name",
            Self::State(_) => "state",
            Self::City(_) => "city",
            Self::Email(_) => "email",
            Self::PhoneNumber(_) => "phone_number",
            Self::Address(_) => "address",
        }
    }

    /// The value compared against stored attributes.
    pub fn value(&self) -> &str {
        match self {
            Self::Dni(value)
            | Self::Name(value)
            | Self::State(value)
            | Self::City(value)
            | Self::Email(value)
            | Self::PhoneNumber(value)
            | Self::Address(value) => value,
        }
    }

    fn predicate_sql(&self) -> &'static str {
        match self {
            Self::Dni(_) => "dni = ?1",
            Self::Name(_) => "name = ?1",
            Self::State(_) => "state = ?1",
            Self::City(_) => "city = ?1",
            Self::Email(_) => "email = ?1",
            Self::PhoneNumber(_) => "(phone = ?1 OR mobile = ?1)",
            Self::Address(_) => "address = ?1",
        }
    }
}

/// Persistence boundary used by the customer access service.
pub trait CustomerRepository {
    /// Loads one customer by primary key.
    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Returns every stored customer.
    fn list_all(&self) -> RepoResult<Vec<Customer>>;
    /// Returns customers matching one equality predicate, possibly none.
    fn query(&self, filter: &CustomerFilter) -> RepoResult<Vec<Customer>>;
    /// Persists a new customer and returns it with its assigned id.
    fn insert(&self, customer: &Customer) -> RepoResult<Customer>;
    /// Overwrites all mutable attributes of `id` from `customer`.
    ///
    /// `customer.id` is ignored; `id` selects the row.
    fn update_fields(&self, id: CustomerId, customer: &Customer) -> RepoResult<Customer>;
    /// Hard-deletes one customer.
    fn delete(&self, id: CustomerId) -> RepoResult<()>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        find_customer(self.conn, id)
    }

    fn list_all(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        collect_rows(&mut rows)
    }

    fn query(&self, filter: &CustomerFilter) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL} WHERE {} ORDER BY id ASC;",
            filter.predicate_sql()
        ))?;
        let mut rows = stmt.query([filter.value()])?;
        collect_rows(&mut rows)
    }

    fn insert(&self, customer: &Customer) -> RepoResult<Customer> {
        customer.validate()?;
        if let Some(id) = customer.assigned_id() {
            return Err(RepoError::AlreadyAssigned(id));
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO customers (
                name,
                address,
                dni,
                email,
                phone,
                mobile,
                state,
                city
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                customer.name,
                customer.address,
                customer.dni,
                customer.email,
                customer.phone,
                customer.mobile,
                customer.state,
                customer.city,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let stored = find_customer(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted customer {id} missing on read-back"))
        })?;
        tx.commit()?;

        Ok(stored)
    }

    fn update_fields(&self, id: CustomerId, customer: &Customer) -> RepoResult<Customer> {
        customer.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let Some(mut stored) = find_customer(&tx, id)? else {
            return Err(RepoError::NotFound(id));
        };
        stored.overwrite_from(customer);

        tx.execute(
            "UPDATE customers
             SET
                name = ?2,
                address = ?3,
                dni = ?4,
                email = ?5,
                phone = ?6,
                mobile = ?7,
                state = ?8,
                city = ?9
             WHERE id = ?1;",
            params![
                id,
                stored.name,
                stored.address,
                stored.dni,
                stored.email,
                stored.phone,
                stored.mobile,
                stored.state,
                stored.city,
            ],
        )?;
        tx.commit()?;

        Ok(stored)
    }

    fn delete(&self, id: CustomerId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute("DELETE FROM customers WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(())
    }
}

fn find_customer(conn: &Connection, id: CustomerId) -> RepoResult<Option<Customer>> {
    let mut stmt = conn.prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_customer_row(row)))
        .optional()?;
    row.transpose()
}

fn collect_rows(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Customer>> {
    let mut customers = Vec::new();
    while let Some(row) = rows.next()? {
        customers.push(parse_customer_row(row)?);
    }
    Ok(customers)
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let id: CustomerId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in customers.id"
        )));
    }

    Ok(Customer {
        id: Some(id),
        name: row.get("name")?,
        address: row.get("address")?,
        dni: row.get("dni")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        mobile: row.get("mobile")?,
        state: row.get("state")?,
        city: row.get("city")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "customers")? {
        return Err(RepoError::MissingRequiredTable("customers"));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "customers", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "customers",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
