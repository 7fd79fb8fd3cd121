//! Provider root

use crate::data_sources::{Lookup, Services, Sources, TranscodingProfile, TranscodingProfiles};
use crate::resources::{ServiceAdInsertion, SourceAdServer, SourceLive, SourceSlate};
use async_trait::async_trait;
use bpkio_client::{Client, DEFAULT_ENDPOINT};
use bpkio_config::{API_KEY_ENV, ENDPOINT_ENV, ProviderSettings};
use bpkio_plugin::{
    Attribute, DataSourceFactory, Diagnostic, Diagnostics, Provider, ResourceFactory, Schema,
};
use serde_json::Value as Json;
use std::sync::Arc;
use tracing::info;

pub const TYPE_NAME: &str = "bpkio";

#[derive(Debug, Clone, Copy, Default)]
pub struct BpkioProvider;

impl BpkioProvider {
    pub fn new() -> Self {
        Self
    }

    fn settings(config: &Json) -> Result<ProviderSettings, Diagnostics> {
        if config.is_null() {
            return Ok(ProviderSettings::default());
        }
        serde_json::from_value(config.clone()).map_err(|e| {
            Diagnostics::from(Diagnostic::error(
                "Invalid Provider Configuration",
                e.to_string(),
            ))
        })
    }
}

#[async_trait]
impl Provider for BpkioProvider {
    type Client = Client;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn schema(&self) -> Schema {
        Schema::new("Interact with the broadpeak.io API.")
            .attribute(
                "endpoint",
                Attribute::string().optional().describe(format!(
                    "API endpoint. May also be set with `{ENDPOINT_ENV}`; \
                     defaults to `{DEFAULT_ENDPOINT}`."
                )),
            )
            .attribute(
                "api_key",
                Attribute::string().optional().sensitive().describe(format!(
                    "API key. May also be set with `{API_KEY_ENV}`; one of the two is required."
                )),
            )
    }

    async fn configure(&self, config: &Json) -> Result<Arc<Client>, Diagnostics> {
        let settings = Self::settings(config)?;
        let resolved = bpkio_config::resolve(&settings).map_err(|errors| {
            Diagnostics::from(errors.into_iter().map(Diagnostic::from).collect::<Vec<_>>())
        })?;

        info!(endpoint = %resolved.endpoint, "configuring bpkio client");
        let client = Client::new(resolved.into()).map_err(|e| {
            Diagnostics::from(Diagnostic::error(
                "Unable to Create bpkio API Client",
                e.to_string(),
            ))
        })?;
        Ok(Arc::new(client))
    }

    fn resources(&self) -> Vec<ResourceFactory<Client>> {
        vec![
            ResourceFactory::of::<SourceAdServer>(),
            ResourceFactory::of::<SourceSlate>(),
            ResourceFactory::of::<SourceLive>(),
            ResourceFactory::of::<ServiceAdInsertion>(),
        ]
    }

    fn data_sources(&self) -> Vec<DataSourceFactory<Client>> {
        vec![
            DataSourceFactory::of::<Sources>(),
            DataSourceFactory::of::<Lookup<SourceAdServer>>(),
            DataSourceFactory::of::<Lookup<SourceSlate>>(),
            DataSourceFactory::of::<Lookup<SourceLive>>(),
            DataSourceFactory::of::<Services>(),
            DataSourceFactory::of::<Lookup<ServiceAdInsertion>>(),
            DataSourceFactory::of::<TranscodingProfile>(),
            DataSourceFactory::of::<TranscodingProfiles>(),
        ]
    }
}
