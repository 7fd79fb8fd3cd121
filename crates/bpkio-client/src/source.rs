//! Source listing (`/v1/sources`)

use crate::client::{Client, PAGE_LIMIT, null_default};
use crate::error::Result;
use crate::live::Origin;
use serde::{Deserialize, Serialize};

const PATH: &str = "v1/sources";

/// Any kind of source: live, asset, asset-catalog, slate or ad-server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Source {
    #[serde(deserialize_with = "null_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub r#type: String,
    #[serde(deserialize_with = "null_default")]
    pub url: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub format: String,
    #[serde(deserialize_with = "null_default")]
    pub multi_period: bool,
    #[serde(deserialize_with = "null_default")]
    pub origin: Origin,
}

impl Client {
    pub async fn list_sources(&self, offset: u32, limit: u32) -> Result<Vec<Source>> {
        self.get_page(PATH, offset, limit).await
    }

    /// First page of sources with the largest page size the API accepts
    pub async fn list_all_sources(&self) -> Result<Vec<Source>> {
        self.list_sources(0, PAGE_LIMIT).await
    }
}
