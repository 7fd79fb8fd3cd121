//! Transcoding profiles (`/v1/transcoding-profiles`)

use crate::client::{Client, PAGE_LIMIT, null_default};
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};

const PATH: &str = "v1/transcoding-profiles";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranscodingProfile {
    #[serde(deserialize_with = "null_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub internal_id: String,
    /// Profile definition, kept as raw JSON text
    #[serde(deserialize_with = "raw_json")]
    pub content: String,
}

/// Accepts the content either as a JSON string or as an embedded document
fn raw_json<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl Client {
    pub async fn get_transcoding_profile(&self, id: u64) -> Result<TranscodingProfile> {
        self.get(&format!("{PATH}/{id}")).await
    }

    pub async fn list_transcoding_profiles(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<TranscodingProfile>> {
        self.get_page(PATH, offset, limit).await
    }

    pub async fn list_all_transcoding_profiles(&self) -> Result<Vec<TranscodingProfile>> {
        self.list_transcoding_profiles(0, PAGE_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_as_string_or_object() {
        let a: TranscodingProfile =
            serde_json::from_str(r#"{"id": 1, "content": "{\"packaging\":\"hls\"}"}"#).unwrap();
        let b: TranscodingProfile =
            serde_json::from_str(r#"{"id": 1, "content": {"packaging":"hls"}}"#).unwrap();
        assert_eq!(a.content, r#"{"packaging":"hls"}"#);
        assert_eq!(b.content, r#"{"packaging":"hls"}"#);

        let c: TranscodingProfile = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        assert_eq!(c.content, "");
    }
}
