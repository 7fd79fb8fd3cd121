//! Slate sources (`/v1/sources/slate`)

use crate::client::{Client, null_default};
use crate::error::Result;
use serde::{Deserialize, Serialize};

const PATH: &str = "v1/sources/slate";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Slate {
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
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlateInput {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl Client {
    pub async fn create_slate(&self, input: &SlateInput) -> Result<Slate> {
        self.post(PATH, input).await
    }

    pub async fn get_slate(&self, id: u64) -> Result<Slate> {
        self.get(&format!("{PATH}/{id}")).await
    }

    pub async fn update_slate(&self, id: u64, input: &SlateInput) -> Result<Slate> {
        self.put(&format!("{PATH}/{id}"), input).await
    }

    pub async fn delete_slate(&self, id: u64) -> Result<()> {
        self.delete(&format!("{PATH}/{id}")).await
    }
}
