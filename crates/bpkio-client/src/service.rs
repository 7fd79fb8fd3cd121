//! Service listing (`/v1/services`)

use crate::client::{Client, PAGE_LIMIT, null_default};
use crate::error::Result;
use serde::{Deserialize, Serialize};

const PATH: &str = "v1/services";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Service {
    #[serde(deserialize_with = "null_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub r#type: String,
    #[serde(deserialize_with = "null_default")]
    pub url: String,
    #[serde(deserialize_with = "null_default")]
    pub creation_date: String,
    #[serde(deserialize_with = "null_default")]
    pub update_date: String,
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    #[serde(alias = "environmentTags")]
    #[serde(deserialize_with = "null_default")]
    pub tags: Vec<String>,
}

impl Client {
    pub async fn list_services(&self, offset: u32, limit: u32) -> Result<Vec<Service>> {
        self.get_page(PATH, offset, limit).await
    }

    pub async fn list_all_services(&self) -> Result<Vec<Service>> {
        self.list_services(0, PAGE_LIMIT).await
    }
}
