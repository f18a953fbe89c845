//! Typed operation outcomes.
//!
//! # Responsibility
//! - Carry either a found payload or an explicit not-found signal.
//! - Keep expected absence out of the `Err` channel.
//!
//! # Invariants
//! - A rejected update (unknown id) is a not-found, never an implicit create.
//! - Delete success carries no payload (`NoContent`).

use crate::model::customer::CustomerId;
use crate::repo::customer_repo::CustomerFilter;
use std::fmt::{Display, Formatter};

/// Result of one access-service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Found(T),
    NotFound(NotFound),
}

/// Payload-less success marker returned by delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoContent;

/// Why an operation resolved to not-found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    /// No record with this identifier.
    Id(CustomerId),
    /// Predicate lookup matched zero records.
    NoMatch(CustomerFilter),
    /// Update referenced an identifier that does not exist.
    RejectedUpdate(CustomerId),
}

impl Display for NotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "customer not found: {id}"),
            Self::NoMatch(filter) => {
                write!(f, "no customer matches {}", filter.label())
            }
            Self::RejectedUpdate(id) => {
                write!(f, "update rejected, customer not found: {id}")
            }
        }
    }
}

impl<T> Outcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Converts into `Option`, discarding the not-found reason.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(_) => None,
        }
    }
}
