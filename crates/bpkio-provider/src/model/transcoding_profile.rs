//! `transcoding_profile` model

use bpkio_client::TranscodingProfile;
use bpkio_plugin::{Attribute, ConversionError, Schema, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodingProfileModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub internal_id: Value<String>,
    pub content: Value<String>,
}

impl TranscodingProfileModel {
    pub fn schema() -> Schema {
        Schema::new("Transcoding profile applied to inserted ads.")
            .attribute(
                "id",
                Attribute::int64()
                    .required()
                    .describe("Identifier of the transcoding profile."),
            )
            .attribute(
                "name",
                Attribute::string()
                    .computed()
                    .describe("Name of the profile."),
            )
            .attribute(
                "internal_id",
                Attribute::string()
                    .computed()
                    .describe("Identifier used internally by the transcoder."),
            )
            .attribute(
                "content",
                Attribute::string()
                    .computed()
                    .describe("Profile definition as JSON text."),
            )
    }

    pub fn flatten(profile: TranscodingProfile) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("id", profile.id)?,
            name: Value::Known(profile.name),
            internal_id: Value::Known(profile.internal_id),
            content: Value::Known(profile.content),
        })
    }
}
