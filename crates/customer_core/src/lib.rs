//! Core domain logic for the customer access service.
//! This crate owns the record contract, persistence and not-found policy.

pub mod db;
pub mod logging;
pub mod model;
pub mod outcome;
pub mod repo;
pub mod service;

pub use db::seed::{default_customers, seed_default_customers};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::{Customer, CustomerId, CustomerValidationError, UNASSIGNED_ID};
pub use outcome::{NoContent, NotFound, Outcome};
pub use repo::customer_repo::{
    CustomerFilter, CustomerRepository, RepoError, RepoResult, SqliteCustomerRepository,
};
pub use service::customer_service::{
    CustomerService, CustomerServiceError, CustomerServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
