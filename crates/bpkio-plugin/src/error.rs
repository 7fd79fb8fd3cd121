//! Lifecycle error types

use std::num::ParseIntError;
use thiserror::Error;

/// Failure while transcribing between state models and API payloads.
///
/// These never reach the network: a conversion error aborts the operation
/// before any remote call is made.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("attribute `{attribute}` is required but null")]
    Missing { attribute: String },

    #[error("attribute `{attribute}` is still unknown; it must be known before apply")]
    Unknown { attribute: String },

    #[error("attribute `{attribute}` is out of range: {value}")]
    OutOfRange { attribute: String, value: String },

    #[error("state does not match the schema: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConversionError {
    pub fn missing(attribute: impl Into<String>) -> Self {
        Self::Missing {
            attribute: attribute.into(),
        }
    }

    pub fn unknown(attribute: impl Into<String>) -> Self {
        Self::Unknown {
            attribute: attribute.into(),
        }
    }

    pub fn out_of_range(attribute: impl Into<String>, value: impl ToString) -> Self {
        Self::OutOfRange {
            attribute: attribute.into(),
            value: value.to_string(),
        }
    }
}

/// CRUD operation a lifecycle error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::Import => write!(f, "import"),
        }
    }
}

/// Resource lifecycle errors
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Invalid ID format: {id:?}. Expected a numeric ID. Error: {source}")]
    ImportFormat {
        id: String,
        #[source]
        source: ParseIntError,
    },

    #[error("cannot import {entity} {id}: it does not exist on the remote service")]
    ImportNotFound { entity: &'static str, id: u64 },

    #[error("{entity} state has no ID")]
    MissingId { entity: &'static str },

    #[error("could not convert {entity}: {source}")]
    Conversion {
        entity: &'static str,
        #[source]
        source: ConversionError,
    },

    #[error("could not {operation} {entity}: {message}")]
    Api {
        entity: &'static str,
        operation: Operation,
        message: String,
    },

    #[error("{entity} {id} was created, but reading it back failed: {message}")]
    ReadAfterCreate {
        entity: &'static str,
        id: u64,
        message: String,
    },

    #[error(
        "{entity} {id} was updated, but reading it back failed: {message}. \
         The state holds the values that were sent; the next refresh will reconcile it"
    )]
    ReadAfterUpdate {
        entity: &'static str,
        id: u64,
        message: String,
    },
}

impl LifecycleError {
    pub fn api(entity: &'static str, operation: Operation, error: &dyn std::error::Error) -> Self {
        Self::Api {
            entity,
            operation,
            message: error.to_string(),
        }
    }

    pub fn conversion(entity: &'static str, source: ConversionError) -> Self {
        Self::Conversion { entity, source }
    }

    /// Short diagnostic headline
    pub fn summary(&self) -> String {
        match self {
            LifecycleError::ImportFormat { .. } | LifecycleError::ImportNotFound { .. } => {
                "Error Importing Resource".to_string()
            }
            LifecycleError::MissingId { .. } => "Missing Resource ID".to_string(),
            LifecycleError::Conversion { .. } => "Invalid Resource Value".to_string(),
            LifecycleError::Api {
                entity, operation, ..
            } => format!("Error {} {}", gerund(*operation), entity),
            LifecycleError::ReadAfterCreate { entity, .. } => {
                format!("Error Reading Created {entity}")
            }
            LifecycleError::ReadAfterUpdate { entity, .. } => {
                format!("Error Reading Updated {entity}")
            }
        }
    }
}

fn gerund(operation: Operation) -> &'static str {
    match operation {
        Operation::Create => "Creating",
        Operation::Read => "Reading",
        Operation::Update => "Updating",
        Operation::Delete => "Deleting",
        Operation::Import => "Importing",
    }
}

/// Data source read errors
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("could not read {entity}: {message}")]
    Api {
        entity: &'static str,
        message: String,
    },

    #[error("could not convert {entity}: {source}")]
    Conversion {
        entity: &'static str,
        #[source]
        source: ConversionError,
    },
}

impl DataSourceError {
    pub fn summary(&self) -> String {
        match self {
            DataSourceError::NotFound { entity, .. } | DataSourceError::Api { entity, .. } => {
                format!("Unable to Read {entity}")
            }
            DataSourceError::Conversion { .. } => "Invalid Data Source Value".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
