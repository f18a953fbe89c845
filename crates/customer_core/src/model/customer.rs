//! Customer domain model.
//!
//! # Responsibility
//! - Define the single record shape managed by the access service.
//! - Make the create-vs-update decision explicit through `Option<CustomerId>`.
//!
//! # Invariants
//! - `id == None` means "not yet persisted"; storage assigns the id.
//! - `id == 0` on the wire is the same unassigned sentinel and decodes to `None`.
//! - An assigned `id` is strictly positive and never changes afterwards.
//! - No text attribute is required to be non-empty.
//! - Updates replace every mutable attribute; there is no patch/merge.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned customer identifier.
pub type CustomerId = i64;

/// Identifier value clients send for records that do not exist yet.
pub const UNASSIGNED_ID: CustomerId = 0;

/// Canonical customer record.
///
/// Missing fields deserialize to their defaults, so an omitted attribute
/// becomes the empty string and an omitted `id` means "create".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// `None` until storage assigns one.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id"
    )]
    pub id: Option<CustomerId>,
    pub name: String,
    pub address: String,
    /// National identity document number. Not enforced unique.
    pub dni: String,
    /// Treated as unique in practice, not enforced.
    pub email: String,
    pub phone: String,
    pub mobile: String,
    /// Administrative region.
    pub state: String,
    pub city: String,
}

/// Structural validation errors for customer payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerValidationError {
    /// Identifiers are never negative.
    NegativeId(CustomerId),
}

impl Display for CustomerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeId(id) => write!(f, "customer id cannot be negative, got {id}"),
        }
    }
}

impl Error for CustomerValidationError {}

impl Customer {
    /// Returns a copy of this record carrying the given identifier.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    /// The storage identifier, treating `Some(UNASSIGNED_ID)` as absent.
    pub fn assigned_id(&self) -> Option<CustomerId> {
        self.id.filter(|id| *id != UNASSIGNED_ID)
    }

    /// Returns whether storage has assigned an identifier to this record.
    pub fn is_persisted(&self) -> bool {
        self.assigned_id().is_some()
    }

    /// Checks structural invariants before the record reaches storage.
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        match self.id {
            Some(id) if id < 0 => Err(CustomerValidationError::NegativeId(id)),
            _ => Ok(()),
        }
    }

    /// Overwrites every mutable attribute from `source`.
    ///
    /// Full replacement: empty strings in `source` clear the stored value.
    /// `self.id` is left untouched.
    pub fn overwrite_from(&mut self, source: &Customer) {
        self.name.clone_from(&source.name);
        self.address.clone_from(&source.address);
        self.dni.clone_from(&source.dni);
        self.email.clone_from(&source.email);
        self.phone.clone_from(&source.phone);
        self.mobile.clone_from(&source.mobile);
        self.state.clone_from(&source.state);
        self.city.clone_from(&source.city);
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<CustomerId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<CustomerId>::deserialize(deserializer)?;
    Ok(id.filter(|id| *id != UNASSIGNED_ID))
}
