//! Single-object data sources backed by a resource's converters

use async_trait::async_trait;
use bpkio_plugin::{ConversionError, DataSource, DataSourceError, Resource, Schema};
use std::sync::Arc;
use tracing::debug;

/// Reads one object by `id` with the schema and converters of `R`; every
/// attribute other than `id` is computed.
pub struct Lookup<R> {
    resource: R,
}

#[async_trait]
impl<R: Resource> DataSource for Lookup<R> {
    type Client = R::Client;
    type Model = R::Model;

    const NAME: &'static str = R::NAME;
    const ENTITY: &'static str = R::ENTITY;

    fn new(client: Arc<R::Client>) -> Self {
        Self {
            resource: R::new(client),
        }
    }

    fn schema() -> Schema {
        <R as Resource>::schema().as_data_source("id")
    }

    async fn read(&self, config: R::Model) -> Result<R::Model, DataSourceError> {
        let conversion = |source: ConversionError| DataSourceError::Conversion {
            entity: R::ENTITY,
            source,
        };
        let id = R::id(&config)
            .map_err(conversion)?
            .ok_or_else(|| conversion(ConversionError::missing("id")))?;
        debug!(data_source = R::NAME, id, "looking up");

        match self.resource.get_remote(id).await {
            Ok(record) => R::flatten(record).map_err(conversion),
            Err(e) if R::is_not_found(&e) => Err(DataSourceError::NotFound {
                entity: R::ENTITY,
                id,
            }),
            Err(e) => Err(DataSourceError::Api {
                entity: R::ENTITY,
                message: e.to_string(),
            }),
        }
    }
}
