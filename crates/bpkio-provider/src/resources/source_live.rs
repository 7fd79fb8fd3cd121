//! `bpkio_source_live`

use crate::model::LiveModel;
use async_trait::async_trait;
use bpkio_client::{Client, ClientError, Live, LiveInput};
use bpkio_plugin::{ConversionError, Resource, Schema};
use std::sync::Arc;

pub struct SourceLive {
    client: Arc<Client>,
}

#[async_trait]
impl Resource for SourceLive {
    type Client = Client;
    type Model = LiveModel;
    type Input = LiveInput;
    type Record = Live;
    type Error = ClientError;

    const NAME: &'static str = "source_live";
    const ENTITY: &'static str = "Live Source";

    fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        LiveModel::schema()
    }

    fn id(model: &LiveModel) -> Result<Option<u64>, ConversionError> {
        model.id.to_u64("id")
    }

    fn record_id(record: &Live) -> u64 {
        record.id
    }

    fn expand(model: &LiveModel) -> Result<LiveInput, ConversionError> {
        model.expand()
    }

    fn flatten(record: Live) -> Result<LiveModel, ConversionError> {
        LiveModel::flatten(record)
    }

    fn is_not_found(error: &ClientError) -> bool {
        error.is_not_found()
    }

    async fn create_remote(&self, input: &LiveInput) -> Result<Live, ClientError> {
        self.client.create_live(input).await
    }

    async fn get_remote(&self, id: u64) -> Result<Live, ClientError> {
        self.client.get_live(id).await
    }

    async fn update_remote(&self, id: u64, input: &LiveInput) -> Result<(), ClientError> {
        self.client.update_live(id, input).await.map(|_| ())
    }

    async fn delete_remote(&self, id: u64) -> Result<(), ClientError> {
        self.client.delete_live(id).await
    }
}
