//! Resource contract
//!
//! [`Resource`] is the typed trait every managed entity implements: schema,
//! converters and the four remote calls. [`DynResource`] is its JSON-level,
//! object-safe face used by the server; it is implemented once for every
//! `Resource` on top of [`crate::lifecycle`].

use crate::error::ConversionError;
use crate::lifecycle::{self, Outcome};
use crate::schema::Schema;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;
use std::sync::Arc;

#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Shared API client handed over at configure time
    type Client: Send + Sync + 'static;
    /// State model, (de)serialized against [`Resource::schema`]
    type Model: Serialize + DeserializeOwned + Clone + Send + Sync;
    /// Create/update payload
    type Input: Send + Sync;
    /// Record returned by the service
    type Record: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Type name without the provider prefix, e.g. `source_slate`
    const NAME: &'static str;
    /// Human readable entity label used in diagnostics
    const ENTITY: &'static str;

    fn new(client: Arc<Self::Client>) -> Self
    where
        Self: Sized;

    fn schema() -> Schema
    where
        Self: Sized;

    /// Identifier held by a state model, if any
    fn id(model: &Self::Model) -> Result<Option<u64>, ConversionError>;

    fn record_id(record: &Self::Record) -> u64;

    /// State model to API payload; only user-settable fields
    fn expand(model: &Self::Model) -> Result<Self::Input, ConversionError>;

    /// API record to state model
    fn flatten(record: Self::Record) -> Result<Self::Model, ConversionError>;

    fn is_not_found(error: &Self::Error) -> bool;

    async fn create_remote(&self, input: &Self::Input) -> Result<Self::Record, Self::Error>;

    async fn get_remote(&self, id: u64) -> Result<Self::Record, Self::Error>;

    async fn update_remote(&self, id: u64, input: &Self::Input) -> Result<(), Self::Error>;

    async fn delete_remote(&self, id: u64) -> Result<(), Self::Error>;
}

/// Object-safe resource operating on JSON states
#[async_trait]
pub trait DynResource: Send + Sync {
    fn name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    async fn create(&self, planned: &Json) -> Outcome<Json>;

    async fn read(&self, state: &Json) -> Outcome<Json>;

    async fn update(&self, prior: &Json, planned: &Json) -> Outcome<Json>;

    async fn delete(&self, state: &Json) -> Outcome<Json>;

    async fn import(&self, id: &str) -> Outcome<Json>;
}

#[async_trait]
impl<R: Resource> DynResource for R {
    fn name(&self) -> &'static str {
        R::NAME
    }

    fn schema(&self) -> Schema {
        <R as Resource>::schema()
    }

    async fn create(&self, planned: &Json) -> Outcome<Json> {
        match decode::<R>(planned) {
            Ok(model) => lifecycle::create(self, &model).await.into_json(),
            Err(outcome) => outcome,
        }
    }

    async fn read(&self, state: &Json) -> Outcome<Json> {
        match decode::<R>(state) {
            Ok(model) => lifecycle::read(self, &model).await.into_json(),
            Err(outcome) => outcome.keep(state),
        }
    }

    async fn update(&self, prior: &Json, planned: &Json) -> Outcome<Json> {
        let prior_model = match decode::<R>(prior) {
            Ok(model) => model,
            Err(outcome) => return outcome.keep(prior),
        };
        match decode::<R>(planned) {
            Ok(model) => lifecycle::update(self, &prior_model, &model).await.into_json(),
            Err(outcome) => outcome.keep(prior),
        }
    }

    async fn delete(&self, state: &Json) -> Outcome<Json> {
        match decode::<R>(state) {
            Ok(model) => lifecycle::delete(self, &model).await.into_json(),
            Err(outcome) => outcome.keep(state),
        }
    }

    async fn import(&self, id: &str) -> Outcome<Json> {
        lifecycle::import(self, id).await.into_json()
    }
}

fn decode<R: Resource>(state: &Json) -> Result<R::Model, Outcome<Json>> {
    serde_json::from_value(state.clone()).map_err(|e| {
        Outcome::failed(crate::error::LifecycleError::conversion(
            R::ENTITY,
            ConversionError::Json(e),
        ))
    })
}
