//! `bpkio_source_slate`

use crate::model::SlateModel;
use async_trait::async_trait;
use bpkio_client::{Client, ClientError, Slate, SlateInput};
use bpkio_plugin::{ConversionError, Resource, Schema};
use std::sync::Arc;

pub struct SourceSlate {
    client: Arc<Client>,
}

#[async_trait]
impl Resource for SourceSlate {
    type Client = Client;
    type Model = SlateModel;
    type Input = SlateInput;
    type Record = Slate;
    type Error = ClientError;

    const NAME: &'static str = "source_slate";
    const ENTITY: &'static str = "Slate";

    fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        SlateModel::schema()
    }

    fn id(model: &SlateModel) -> Result<Option<u64>, ConversionError> {
        model.id.to_u64("id")
    }

    fn record_id(record: &Slate) -> u64 {
        record.id
    }

    fn expand(model: &SlateModel) -> Result<SlateInput, ConversionError> {
        model.expand()
    }

    fn flatten(record: Slate) -> Result<SlateModel, ConversionError> {
        SlateModel::flatten(record)
    }

    fn is_not_found(error: &ClientError) -> bool {
        error.is_not_found()
    }

    async fn create_remote(&self, input: &SlateInput) -> Result<Slate, ClientError> {
        self.client.create_slate(input).await
    }

    async fn get_remote(&self, id: u64) -> Result<Slate, ClientError> {
        self.client.get_slate(id).await
    }

    async fn update_remote(&self, id: u64, input: &SlateInput) -> Result<(), ClientError> {
        self.client.update_slate(id, input).await.map(|_| ())
    }

    async fn delete_remote(&self, id: u64) -> Result<(), ClientError> {
        self.client.delete_slate(id).await
    }
}
