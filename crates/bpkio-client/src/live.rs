//! Live sources (`/v1/sources/live`)

use crate::client::{Client, null_default};
use crate::error::Result;
use serde::{Deserialize, Serialize};

const PATH: &str = "v1/sources/live";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomHeader {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

/// Settings applied when fetching from the origin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Origin {
    #[serde(deserialize_with = "null_default")]
    pub custom_headers: Vec<CustomHeader>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Live {
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveInput {
    pub name: String,
    pub description: String,
    pub url: String,
    pub multi_period: bool,
    pub origin: Origin,
}

impl Client {
    pub async fn create_live(&self, input: &LiveInput) -> Result<Live> {
        self.post(PATH, input).await
    }

    pub async fn get_live(&self, id: u64) -> Result<Live> {
        self.get(&format!("{PATH}/{id}")).await
    }

    pub async fn update_live(&self, id: u64, input: &LiveInput) -> Result<Live> {
        self.put(&format!("{PATH}/{id}"), input).await
    }

    pub async fn delete_live(&self, id: u64) -> Result<()> {
        self.delete(&format!("{PATH}/{id}")).await
    }
}
