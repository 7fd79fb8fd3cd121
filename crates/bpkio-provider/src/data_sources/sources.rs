//! `bpkio_sources`

use crate::model::SourcesModel;
use async_trait::async_trait;
use bpkio_client::Client;
use bpkio_plugin::{DataSource, DataSourceError, Schema};
use std::sync::Arc;
use tracing::debug;

pub struct Sources {
    client: Arc<Client>,
}

#[async_trait]
impl DataSource for Sources {
    type Client = Client;
    type Model = SourcesModel;

    const NAME: &'static str = "sources";
    const ENTITY: &'static str = "Sources";

    fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        SourcesModel::schema()
    }

    async fn read(&self, config: SourcesModel) -> Result<SourcesModel, DataSourceError> {
        let sources = self
            .client
            .list_all_sources()
            .await
            .map_err(|e| DataSourceError::Api {
                entity: Self::ENTITY,
                message: e.to_string(),
            })?;
        debug!(count = sources.len(), "listed sources");
        config
            .with_sources(sources)
            .map_err(|source| DataSourceError::Conversion {
                entity: Self::ENTITY,
                source,
            })
    }
}
