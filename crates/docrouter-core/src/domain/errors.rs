//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including invalid identifiers, department names and path templates.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Client code is empty or contains non-digit characters
    #[error("Invalid client code: {0:?}")]
    InvalidClientCode(String),

    /// Department name is empty or contains path separators
    #[error("Invalid department name: {0:?}")]
    InvalidDepartment(String),

    /// Destination template is empty, absolute, or escapes the client folder
    #[error("Invalid destination template: {0:?}")]
    InvalidTemplate(String),

    /// ID parsing error
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}
