//! Ad servers (`/v1/adservers`)

use crate::client::{Client, null_default};
use crate::error::Result;
use serde::{Deserialize, Serialize};

const PATH: &str = "v1/adservers";

/// Template the API uses for ad servers defined by URL and parameters
pub const CUSTOM_TEMPLATE: &str = "custom";

/// Query parameter appended to ad requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParam {
    /// from-query-parameter, from-variable, from-header, forward or custom
    #[serde(deserialize_with = "null_default")]
    pub r#type: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdServer {
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
    pub queries: String,
    #[serde(deserialize_with = "null_default")]
    pub query_parameters: Vec<QueryParam>,
    #[serde(deserialize_with = "null_default")]
    pub template: String,
}

/// Create/update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdServerInput {
    pub name: String,
    pub description: String,
    pub url: String,
    pub queries: String,
    pub query_parameters: Vec<QueryParam>,
    pub template: String,
}

impl Default for AdServerInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            url: String::new(),
            queries: String::new(),
            query_parameters: Vec::new(),
            template: CUSTOM_TEMPLATE.to_string(),
        }
    }
}

impl Client {
    pub async fn create_ad_server(&self, input: &AdServerInput) -> Result<AdServer> {
        self.post(PATH, input).await
    }

    pub async fn get_ad_server(&self, id: u64) -> Result<AdServer> {
        self.get(&format!("{PATH}/{id}")).await
    }

    pub async fn update_ad_server(&self, id: u64, input: &AdServerInput) -> Result<AdServer> {
        self.put(&format!("{PATH}/{id}"), input).await
    }

    pub async fn delete_ad_server(&self, id: u64) -> Result<()> {
        self.delete(&format!("{PATH}/{id}")).await
    }
}
