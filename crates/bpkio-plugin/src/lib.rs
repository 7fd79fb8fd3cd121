//! bpkio plugin framework
//!
//! This crate holds everything a provider needs to talk to the host
//! orchestration engine, independent of the remote service it manages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            host orchestration engine             │
//! └─────────────────┬───────────────────────────────┘
//!                   │ JSON lines (stdio)
//! ┌─────────────────▼───────────────────────────────┐
//! │                 bpkio-plugin                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  ProviderServer (dispatch, registry)      │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌───────────────────────┐    │
//! │  │ Schema/Plan  │  │ Resource lifecycle    │    │
//! │  └──────────────┘  └───────────────────────┘    │
//! └───────┬─────────────────────────────────────────┘
//!         │ trait Resource / trait DataSource
//! ┌───────▼───────┐
//! │ bpkio-provider│
//! └───────────────┘
//! ```
//!
//! Every resource implements [`Resource`]; the create/read/update/delete/import
//! state machine lives once in [`lifecycle`] and is shared by all of them.

pub mod action;
pub mod data_source;
pub mod diagnostics;
pub mod error;
pub mod lifecycle;
pub mod plan;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod server;
pub mod value;

// Re-exports
pub use action::ActionType;
pub use data_source::{DataSource, DynDataSource};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ConversionError, DataSourceError, LifecycleError, Operation, Result};
pub use lifecycle::Outcome;
pub use provider::{DataSourceFactory, Provider, ResourceFactory};
pub use resource::{DynResource, Resource};
pub use schema::{Attribute, AttributeKind, ProviderSchema, Schema, Validator};
pub use server::{ProviderServer, Request, Response, serve_io};
pub use value::{UNKNOWN_SENTINEL, Value};

pub use async_trait::async_trait;
