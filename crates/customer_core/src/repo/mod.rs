//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract consumed by the access service.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs report missing rows as semantic `NotFound` errors,
//!   separate from DB transport errors.

pub mod customer_repo;
