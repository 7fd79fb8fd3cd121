//! `bpkio_services`

use crate::model::ServicesModel;
use async_trait::async_trait;
use bpkio_client::Client;
use bpkio_plugin::{DataSource, DataSourceError, Schema};
use std::sync::Arc;
use tracing::debug;

pub struct Services {
    client: Arc<Client>,
}

#[async_trait]
impl DataSource for Services {
    type Client = Client;
    type Model = ServicesModel;

    const NAME: &'static str = "services";
    const ENTITY: &'static str = "Services";

    fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        ServicesModel::schema()
    }

    async fn read(&self, config: ServicesModel) -> Result<ServicesModel, DataSourceError> {
        let services = self
            .client
            .list_all_services()
            .await
            .map_err(|e| DataSourceError::Api {
                entity: Self::ENTITY,
                message: e.to_string(),
            })?;
        debug!(count = services.len(), "listed services");
        config
            .with_services(services)
            .map_err(|source| DataSourceError::Conversion {
                entity: Self::ENTITY,
                source,
            })
    }
}
