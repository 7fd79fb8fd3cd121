//! Ad insertion services (`/v1/services/ad-insertion`)

use crate::ad_server::AdServer;
use crate::client::{Client, null_default};
use crate::error::Result;
use crate::slate::Slate;
use crate::source::Source;
use crate::transcoding_profile::TranscodingProfile;
use serde::{Deserialize, Serialize};

const PATH: &str = "v1/services/ad-insertion";

/// Reference to another object by ID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifiable {
    pub id: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerSideAdTracking {
    #[serde(deserialize_with = "null_default")]
    pub enable: bool,
    #[serde(deserialize_with = "null_default")]
    pub check_ad_media_segment_availability: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotAware {
    /// french_addressable_tv, spot_to_live or disabled
    #[serde(deserialize_with = "null_default")]
    pub mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizationHeader {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdvancedOptions {
    pub authorization_header: Option<AuthorizationHeader>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LiveAdPreRoll {
    pub ad_server: Option<AdServer>,
    #[serde(deserialize_with = "null_default")]
    pub max_duration: u64,
    #[serde(deserialize_with = "null_default")]
    pub offset: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LiveAdReplacement {
    pub ad_server: Option<AdServer>,
    pub gap_filler: Option<Slate>,
    pub spot_aware: Option<SpotAware>,
}

/// Service record; linked objects are expanded by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdInsertion {
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
    #[serde(deserialize_with = "null_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub enable_ad_transcoding: bool,
    pub server_side_ad_tracking: Option<ServerSideAdTracking>,
    pub source: Option<Source>,
    pub transcoding_profile: Option<TranscodingProfile>,
    pub live_ad_pre_roll: Option<LiveAdPreRoll>,
    pub live_ad_replacement: Option<LiveAdReplacement>,
    pub advanced_options: Option<AdvancedOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveAdPreRollInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_server: Option<Identifiable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveAdReplacementInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_server: Option<Identifiable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_filler: Option<Identifiable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_aware: Option<SpotAware>,
}

/// Create/update payload; absent blocks are left out entirely
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdInsertionInput {
    pub name: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_ad_transcoding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Identifiable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcoding_profile: Option<Identifiable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_ad_pre_roll: Option<LiveAdPreRollInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_ad_replacement: Option<LiveAdReplacementInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_side_ad_tracking: Option<ServerSideAdTracking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_options: Option<AdvancedOptions>,
}

impl Client {
    pub async fn create_ad_insertion(&self, input: &AdInsertionInput) -> Result<AdInsertion> {
        self.post(PATH, input).await
    }

    pub async fn get_ad_insertion(&self, id: u64) -> Result<AdInsertion> {
        self.get(&format!("{PATH}/{id}")).await
    }

    pub async fn update_ad_insertion(
        &self,
        id: u64,
        input: &AdInsertionInput,
    ) -> Result<AdInsertion> {
        self.put(&format!("{PATH}/{id}"), input).await
    }

    pub async fn delete_ad_insertion(&self, id: u64) -> Result<()> {
        self.delete(&format!("{PATH}/{id}")).await
    }
}
