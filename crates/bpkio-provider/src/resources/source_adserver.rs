//! `bpkio_source_adserver`

use crate::model::AdServerModel;
use async_trait::async_trait;
use bpkio_client::{AdServer, AdServerInput, Client, ClientError};
use bpkio_plugin::{ConversionError, Resource, Schema};
use std::sync::Arc;

pub struct SourceAdServer {
    client: Arc<Client>,
}

#[async_trait]
impl Resource for SourceAdServer {
    type Client = Client;
    type Model = AdServerModel;
    type Input = AdServerInput;
    type Record = AdServer;
    type Error = ClientError;

    const NAME: &'static str = "source_adserver";
    const ENTITY: &'static str = "Ad Server";

    fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        AdServerModel::schema()
    }

    fn id(model: &AdServerModel) -> Result<Option<u64>, ConversionError> {
        model.id.to_u64("id")
    }

    fn record_id(record: &AdServer) -> u64 {
        record.id
    }

    fn expand(model: &AdServerModel) -> Result<AdServerInput, ConversionError> {
        model.expand()
    }

    fn flatten(record: AdServer) -> Result<AdServerModel, ConversionError> {
        AdServerModel::flatten(record)
    }

    fn is_not_found(error: &ClientError) -> bool {
        error.is_not_found()
    }

    async fn create_remote(&self, input: &AdServerInput) -> Result<AdServer, ClientError> {
        self.client.create_ad_server(input).await
    }

    async fn get_remote(&self, id: u64) -> Result<AdServer, ClientError> {
        self.client.get_ad_server(id).await
    }

    async fn update_remote(&self, id: u64, input: &AdServerInput) -> Result<(), ClientError> {
        self.client.update_ad_server(id, input).await.map(|_| ())
    }

    async fn delete_remote(&self, id: u64) -> Result<(), ClientError> {
        self.client.delete_ad_server(id).await
    }
}
