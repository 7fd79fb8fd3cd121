//! Provider root contract

use crate::data_source::{DataSource, DynDataSource};
use crate::diagnostics::Diagnostics;
use crate::resource::{DynResource, Resource};
use crate::schema::{ProviderSchema, Schema};
use async_trait::async_trait;
use serde_json::Value as Json;
use std::sync::Arc;

/// Provider root: owns configuration and builds the shared client
#[async_trait]
pub trait Provider: Send + Sync + 'static {
    type Client: Send + Sync + 'static;

    /// Prefix of every resource and data source type name
    fn type_name(&self) -> &'static str;

    fn version(&self) -> &'static str;

    /// Schema of the provider configuration block
    fn schema(&self) -> Schema;

    /// Builds the client shared by every resource and data source
    async fn configure(&self, config: &Json) -> Result<Arc<Self::Client>, Diagnostics>;

    fn resources(&self) -> Vec<ResourceFactory<Self::Client>>;

    fn data_sources(&self) -> Vec<DataSourceFactory<Self::Client>>;

    /// Full schema with prefixed type names
    fn provider_schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: self.schema(),
            resources: self
                .resources()
                .into_iter()
                .map(|f| (full_name(self.type_name(), f.name), (f.schema)()))
                .collect(),
            data_sources: self
                .data_sources()
                .into_iter()
                .map(|f| (full_name(self.type_name(), f.name), (f.schema)()))
                .collect(),
        }
    }
}

/// `bpkio` + `source_slate` → `bpkio_source_slate`
pub fn full_name(type_name: &str, name: &str) -> String {
    format!("{type_name}_{name}")
}

/// Constructor for one resource type
pub struct ResourceFactory<C> {
    pub name: &'static str,
    pub schema: fn() -> Schema,
    pub build: fn(Arc<C>) -> Box<dyn DynResource>,
}

impl<C: Send + Sync + 'static> ResourceFactory<C> {
    pub fn of<R: Resource<Client = C>>() -> Self {
        Self {
            name: R::NAME,
            schema: <R as Resource>::schema,
            build: build_resource::<R>,
        }
    }
}

fn build_resource<R: Resource>(client: Arc<R::Client>) -> Box<dyn DynResource> {
    Box::new(R::new(client))
}

/// Constructor for one data source type
pub struct DataSourceFactory<C> {
    pub name: &'static str,
    pub schema: fn() -> Schema,
    pub build: fn(Arc<C>) -> Box<dyn DynDataSource>,
}

impl<C: Send + Sync + 'static> DataSourceFactory<C> {
    pub fn of<D: DataSource<Client = C>>() -> Self {
        Self {
            name: D::NAME,
            schema: <D as DataSource>::schema,
            build: build_data_source::<D>,
        }
    }
}

fn build_data_source<D: DataSource>(client: Arc<D::Client>) -> Box<dyn DynDataSource> {
    Box::new(D::new(client))
}
