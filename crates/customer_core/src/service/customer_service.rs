//! Customer access service.
//!
//! # Responsibility
//! - Expose list, keyed lookup, predicate lookup, upsert and delete.
//! - Apply one not-found policy across every operation.
//!
//! # Invariants
//! - `list_all` on an empty store is success with an empty list.
//! - Every predicate lookup with zero matches is `Outcome::NotFound`.
//! - `create_edit` creates only when `id` is unassigned (`None` or `0`);
//!   an unknown id is a rejected update, never an implicit create.
//! - Updates replace every mutable attribute (no patch semantics).
//! - Nothing is cached between calls; every operation re-reads storage.

use crate::model::customer::{Customer, CustomerId, CustomerValidationError};
use crate::outcome::{NoContent, NotFound, Outcome};
use crate::repo::customer_repo::{CustomerFilter, CustomerRepository, RepoError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CustomerServiceResult<T> = Result<T, CustomerServiceError>;

/// Failures outside the not-found taxonomy: malformed payloads and storage.
#[derive(Debug)]
pub enum CustomerServiceError {
    Validation(CustomerValidationError),
    Repo(RepoError),
}

impl Display for CustomerServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid customer payload: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CustomerServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<CustomerValidationError> for CustomerServiceError {
    fn from(value: CustomerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CustomerServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Access service facade over a customer repository.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every customer. An empty store yields an empty list.
    pub fn list_all(&self) -> CustomerServiceResult<Vec<Customer>> {
        let customers = self.repo.list_all()?;
        debug!(
            "event=customer_list module=service status=ok count={}",
            customers.len()
        );
        Ok(customers)
    }

    /// Gets one customer by identifier.
    pub fn get_by_id(&self, id: CustomerId) -> CustomerServiceResult<Outcome<Customer>> {
        match self.repo.find_by_id(id)? {
            Some(customer) => {
                debug!("event=customer_get module=service status=ok id={id}");
                Ok(Outcome::Found(customer))
            }
            None => {
                debug!("event=customer_get module=service status=not_found id={id}");
                Ok(Outcome::NotFound(NotFound::Id(id)))
            }
        }
    }

    /// Runs one exact-match predicate lookup.
    ///
    /// Zero matches resolve to `NotFound::NoMatch`, unlike `list_all`.
    pub fn find(&self, filter: CustomerFilter) -> CustomerServiceResult<Outcome<Vec<Customer>>> {
        let customers = self.repo.query(&filter)?;
        if customers.is_empty() {
            debug!(
                "event=customer_find module=service status=not_found filter={}",
                filter.label()
            );
            return Ok(Outcome::NotFound(NotFound::NoMatch(filter)));
        }

        debug!(
            "event=customer_find module=service status=ok filter={} count={}",
            filter.label(),
            customers.len()
        );
        Ok(Outcome::Found(customers))
    }

    /// Customers whose national id equals `dni`. DNI is not unique here.
    pub fn get_by_dni(
        &self,
        dni: impl Into<String>,
    ) -> CustomerServiceResult<Outcome<Vec<Customer>>> {
        self.find(CustomerFilter::Dni(dni.into()))
    }

    pub fn get_by_name(
        &self,
        name: impl Into<String>,
    ) -> CustomerServiceResult<Outcome<Vec<Customer>>> {
        self.find(CustomerFilter::Name(name.into()))
    }

    pub fn get_by_state(
        &self,
        state: impl Into<String>,
    ) -> CustomerServiceResult<Outcome<Vec<Customer>>> {
        self.find(CustomerFilter::State(state.into()))
    }

    pub fn get_by_city(
        &self,
        city: impl Into<String>,
    ) -> CustomerServiceResult<Outcome<Vec<Customer>>> {
        self.find(CustomerFilter::City(city.into()))
    }

    /// Usually a single match; duplicates are returned as stored.
    pub fn get_by_email(
        &self,
        email: impl Into<String>,
    ) -> CustomerServiceResult<Outcome<Vec<Customer>>> {
        self.find(CustomerFilter::Email(email.into()))
    }

    /// Matches `phone_number` against both `phone` and `mobile`.
    pub fn get_by_phone_number(
        &self,
        phone_number: impl Into<String>,
    ) -> CustomerServiceResult<Outcome<Vec<Customer>>> {
        self.find(CustomerFilter::PhoneNumber(phone_number.into()))
    }

    pub fn get_by_address(
        &self,
        address: impl Into<String>,
    ) -> CustomerServiceResult<Outcome<Vec<Customer>>> {
        self.find(CustomerFilter::Address(address.into()))
    }

    /// Creates or fully replaces a customer.
    ///
    /// # Contract
    /// - `customer.id` is `None` or `Some(UNASSIGNED_ID)`: insert, return
    ///   the record with its new id.
    /// - `customer.id == Some(id)` and stored: overwrite every mutable
    ///   attribute, return the updated record.
    /// - `customer.id == Some(id)` and absent: `NotFound::RejectedUpdate`,
    ///   storage unchanged.
    ///
    /// # Errors
    /// - `Validation` for a negative id.
    /// - `Repo` for storage failures.
    pub fn create_edit(&self, customer: &Customer) -> CustomerServiceResult<Outcome<Customer>> {
        customer.validate()?;

        let Some(id) = customer.assigned_id() else {
            let created = self.repo.insert(customer)?;
            info!(
                "event=customer_create module=service status=ok id={}",
                created.id.unwrap_or_default()
            );
            return Ok(Outcome::Found(created));
        };

        match self.repo.update_fields(id, customer) {
            Ok(updated) => {
                info!("event=customer_update module=service status=ok id={id}");
                Ok(Outcome::Found(updated))
            }
            Err(RepoError::NotFound(missing)) => {
                warn!("event=customer_update module=service status=rejected id={missing}");
                Ok(Outcome::NotFound(NotFound::RejectedUpdate(missing)))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Hard-deletes one customer.
    pub fn delete(&self, id: CustomerId) -> CustomerServiceResult<Outcome<NoContent>> {
        match self.repo.delete(id) {
            Ok(()) => {
                info!("event=customer_delete module=service status=ok id={id}");
                Ok(Outcome::Found(NoContent))
            }
            Err(RepoError::NotFound(missing)) => {
                debug!("event=customer_delete module=service status=not_found id={missing}");
                Ok(Outcome::NotFound(NotFound::Id(missing)))
            }
            Err(err) => Err(err.into()),
        }
    }
}
