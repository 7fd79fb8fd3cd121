//! `bpkio_service_ad_insertion`

use crate::model::AdInsertionModel;
use async_trait::async_trait;
use bpkio_client::{AdInsertion, AdInsertionInput, Client, ClientError};
use bpkio_plugin::{ConversionError, Resource, Schema};
use std::sync::Arc;

pub struct ServiceAdInsertion {
    client: Arc<Client>,
}

#[async_trait]
impl Resource for ServiceAdInsertion {
    type Client = Client;
    type Model = AdInsertionModel;
    type Input = AdInsertionInput;
    type Record = AdInsertion;
    type Error = ClientError;

    const NAME: &'static str = "service_ad_insertion";
    const ENTITY: &'static str = "Ad Insertion Service";

    fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        AdInsertionModel::schema()
    }

    fn id(model: &AdInsertionModel) -> Result<Option<u64>, ConversionError> {
        model.id.to_u64("id")
    }

    fn record_id(record: &AdInsertion) -> u64 {
        record.id
    }

    fn expand(model: &AdInsertionModel) -> Result<AdInsertionInput, ConversionError> {
        model.expand()
    }

    fn flatten(record: AdInsertion) -> Result<AdInsertionModel, ConversionError> {
        AdInsertionModel::flatten(record)
    }

    fn is_not_found(error: &ClientError) -> bool {
        error.is_not_found()
    }

    async fn create_remote(&self, input: &AdInsertionInput) -> Result<AdInsertion, ClientError> {
        self.client.create_ad_insertion(input).await
    }

    async fn get_remote(&self, id: u64) -> Result<AdInsertion, ClientError> {
        self.client.get_ad_insertion(id).await
    }

    async fn update_remote(&self, id: u64, input: &AdInsertionInput) -> Result<(), ClientError> {
        self.client.update_ad_insertion(id, input).await.map(|_| ())
    }

    async fn delete_remote(&self, id: u64) -> Result<(), ClientError> {
        self.client.delete_ad_insertion(id).await
    }
}
