//! Command dispatch: one service call per invocation.

use crate::envelope::Envelope;
use crate::error::CliError;
use clap::{Subcommand, ValueEnum};
use customer_core::{
    seed_default_customers, Customer, CustomerFilter, CustomerId, CustomerService,
    SqliteCustomerRepository,
};
use log::debug;
use rusqlite::Connection;
use serde_json::json;
use std::io::Read;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every customer (an empty store is still a success)
    List,
    /// Get one customer by id
    Get {
        #[arg(allow_negative_numbers = true)]
        id: CustomerId,
    },
    /// Find customers by exact match on one attribute
    Find {
        #[arg(value_enum)]
        by: LookupField,
        value: String,
    },
    /// Create (payload without id) or fully replace (payload with id) a customer
    Upsert {
        /// Customer JSON, or `-` to read it from stdin
        payload: String,
    },
    /// Delete one customer by id
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: CustomerId,
    },
    /// Insert the default customers that are missing
    Seed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupField {
    Dni,
    Name,
    State,
    City,
    Email,
    /// Matches phone or mobile
    Phone,
    Address,
}

impl Command {
    /// Subcommand name for logs; never includes arguments.
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get { .. } => "get",
            Self::Find { .. } => "find",
            Self::Upsert { .. } => "upsert",
            Self::Delete { .. } => "delete",
            Self::Seed => "seed",
        }
    }
}

impl LookupField {
    fn filter(self, value: String) -> CustomerFilter {
        match self {
            Self::Dni => CustomerFilter::Dni(value),
            Self::Name => CustomerFilter::Name(value),
            Self::State => CustomerFilter::State(value),
            Self::City => CustomerFilter::City(value),
            Self::Email => CustomerFilter::Email(value),
            Self::Phone => CustomerFilter::PhoneNumber(value),
            Self::Address => CustomerFilter::Address(value),
        }
    }
}

/// Runs `command` against an open, migrated connection.
pub fn execute(command: Command, conn: &mut Connection) -> Result<Envelope, CliError> {
    match command {
        Command::List => Envelope::ok(&service(conn)?.list_all()?),
        Command::Get { id } => Envelope::from_outcome(service(conn)?.get_by_id(id)?),
        Command::Find { by, value } => {
            Envelope::from_outcome(service(conn)?.find(by.filter(value))?)
        }
        Command::Upsert { payload } => {
            let customer = parse_payload(&payload)?;
            debug!(
                "event=cli_upsert module=cli status=start has_id={}",
                customer.is_persisted()
            );
            Envelope::from_outcome(service(conn)?.create_edit(&customer)?)
        }
        Command::Delete { id } => Ok(Envelope::from_deletion(service(conn)?.delete(id)?)),
        Command::Seed => {
            let inserted = seed_default_customers(conn)?;
            Envelope::ok(&json!({ "inserted": inserted }))
        }
    }
}

fn service(
    conn: &Connection,
) -> Result<CustomerService<SqliteCustomerRepository<'_>>, CliError> {
    Ok(CustomerService::new(SqliteCustomerRepository::try_new(conn)?))
}

fn parse_payload(payload: &str) -> Result<Customer, CliError> {
    if payload == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(serde_json::from_str(&buffer)?);
    }
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::{execute, Command, LookupField};
    use crate::envelope::{STATUS_NOT_FOUND, STATUS_NO_CONTENT, STATUS_OK};
    use customer_core::db::open_db_in_memory;

    #[test]
    fn upsert_then_find_and_delete() {
        let mut conn = open_db_in_memory().unwrap();

        let created = execute(
            Command::Upsert {
                payload: r#"{"name":"John Doe","phone":"1111111111","mobile":"2222222222"}"#
                    .to_string(),
            },
            &mut conn,
        )
        .unwrap();
        assert_eq!(created.status_code, STATUS_OK);
        let id = created.value.as_ref().unwrap()["id"].as_i64().unwrap();

        let found = execute(
            Command::Find {
                by: LookupField::Phone,
                value: "2222222222".to_string(),
            },
            &mut conn,
        )
        .unwrap();
        assert_eq!(found.status_code, STATUS_OK);
        assert_eq!(found.value.unwrap()[0]["name"], "John Doe");

        let deleted = execute(Command::Delete { id }, &mut conn).unwrap();
        assert_eq!(deleted.status_code, STATUS_NO_CONTENT);

        let missing = execute(Command::Get { id }, &mut conn).unwrap();
        assert_eq!(missing.status_code, STATUS_NOT_FOUND);
    }

    #[test]
    fn list_on_empty_store_is_ok_but_find_is_not_found() {
        let mut conn = open_db_in_memory().unwrap();

        let listed = execute(Command::List, &mut conn).unwrap();
        assert_eq!(listed.status_code, STATUS_OK);
        assert_eq!(listed.value, Some(serde_json::json!([])));

        let found = execute(
            Command::Find {
                by: LookupField::State,
                value: "Houston".to_string(),
            },
            &mut conn,
        )
        .unwrap();
        assert_eq!(found.status_code, STATUS_NOT_FOUND);
    }

    #[test]
    fn upsert_with_unknown_id_is_not_found() {
        let mut conn = open_db_in_memory().unwrap();

        let rejected = execute(
            Command::Upsert {
                payload: r#"{"id":12,"name":"Ghost"}"#.to_string(),
            },
            &mut conn,
        )
        .unwrap();
        assert_eq!(rejected.status_code, STATUS_NOT_FOUND);
        assert_eq!(
            rejected.message.as_deref(),
            Some("update rejected, customer not found: 12")
        );
    }

    #[test]
    fn upsert_with_zero_id_creates() {
        let mut conn = open_db_in_memory().unwrap();

        let created = execute(
            Command::Upsert {
                payload: r#"{"id":0,"name":"Juan Perez"}"#.to_string(),
            },
            &mut conn,
        )
        .unwrap();
        assert_eq!(created.status_code, STATUS_OK);
        assert!(created.value.unwrap()["id"].as_i64().unwrap() > 0);
    }

    #[test]
    fn negative_ids_resolve_to_not_found() {
        let mut conn = open_db_in_memory().unwrap();

        let got = execute(Command::Get { id: -5 }, &mut conn).unwrap();
        assert_eq!(got.status_code, STATUS_NOT_FOUND);
        let deleted = execute(Command::Delete { id: -5 }, &mut conn).unwrap();
        assert_eq!(deleted.status_code, STATUS_NOT_FOUND);
    }

    #[test]
    fn seed_reports_inserted_rows() {
        let mut conn = open_db_in_memory().unwrap();

        let first = execute(Command::Seed, &mut conn).unwrap();
        assert_eq!(first.value, Some(serde_json::json!({ "inserted": 3 })));
        let second = execute(Command::Seed, &mut conn).unwrap();
        assert_eq!(second.value, Some(serde_json::json!({ "inserted": 0 })));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let mut conn = open_db_in_memory().unwrap();

        let result = execute(
            Command::Upsert {
                payload: "not json".to_string(),
            },
            &mut conn,
        );
        assert!(result.is_err());
    }
}
