//! Core use-case services.
//!
//! # Responsibility
//! - Translate access commands into repository calls and typed outcomes.
//! - Keep callers decoupled from storage details.

pub mod customer_service;
