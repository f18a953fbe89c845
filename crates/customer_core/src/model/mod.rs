//! Domain model for the customer access service.
//!
//! # Responsibility
//! - Define the canonical record used by repository and service layers.
//!
//! # Invariants
//! - Every persisted customer is identified by a storage-assigned `CustomerId`.
//! - Deletion is a hard delete; identifiers are never reused.

pub mod customer;
