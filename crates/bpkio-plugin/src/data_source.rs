//! Data source contract

use crate::diagnostics::Diagnostic;
use crate::error::{ConversionError, DataSourceError};
use crate::lifecycle::Outcome;
use crate::schema::Schema;
use crate::value::contains_unknown;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;
use std::sync::Arc;
use tracing::debug;

/// Read-only lookup of remote objects
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    type Client: Send + Sync + 'static;
    type Model: Serialize + DeserializeOwned + Send + Sync;

    /// Type name without the provider prefix, e.g. `sources`
    const NAME: &'static str;
    const ENTITY: &'static str;

    fn new(client: Arc<Self::Client>) -> Self
    where
        Self: Sized;

    fn schema() -> Schema
    where
        Self: Sized;

    /// Resolves the computed attributes of `config`. A missing object is an
    /// error, unlike for resources.
    async fn read(&self, config: Self::Model) -> Result<Self::Model, DataSourceError>;
}

#[async_trait]
pub trait DynDataSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    async fn read(&self, config: &Json) -> Outcome<Json>;
}

#[async_trait]
impl<D: DataSource> DynDataSource for D {
    fn name(&self) -> &'static str {
        D::NAME
    }

    fn schema(&self) -> Schema {
        <D as DataSource>::schema()
    }

    async fn read(&self, config: &Json) -> Outcome<Json> {
        let diagnostics = <D as DataSource>::schema().validate_config(config);
        if diagnostics.has_error() {
            return Outcome {
                state: None,
                diagnostics,
            };
        }
        if contains_unknown(config) {
            return Outcome::failed(Diagnostic::error(
                "Unknown Data Source Configuration",
                format!(
                    "{} cannot be read while its configuration depends on values \
                     known only after apply.",
                    D::ENTITY
                ),
            ));
        }

        let model: D::Model = match serde_json::from_value(config.clone()) {
            Ok(model) => model,
            Err(e) => {
                return Outcome::failed(DataSourceError::Conversion {
                    entity: D::ENTITY,
                    source: ConversionError::Json(e),
                });
            }
        };

        debug!(data_source = D::NAME, "reading");
        let mut outcome = match DataSource::read(self, model).await {
            Ok(model) => Outcome::ok(model).into_json(),
            Err(e) => Outcome::failed(e),
        };
        let mut all = diagnostics;
        all.extend(outcome.diagnostics);
        outcome.diagnostics = all;
        outcome
    }
}
