//! `source_slate` model

use super::{computed_string, id_attribute};
use bpkio_client::{Slate, SlateInput};
use bpkio_plugin::{Attribute, ConversionError, Schema, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlateModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
    pub description: Value<String>,
    pub format: Value<String>,
}

impl SlateModel {
    pub fn schema() -> Schema {
        Schema::new("Slate source: an image or video shown when no content is available.")
            .attribute("id", id_attribute("Identifier of the slate."))
            .attribute(
                "name",
                Attribute::string().required().describe("Name of the slate."),
            )
            .attribute("type", computed_string("Source type, always `slate`."))
            .attribute(
                "url",
                Attribute::string()
                    .required()
                    .describe("URL of the slate image or video."),
            )
            .attribute(
                "description",
                Attribute::string()
                    .optional()
                    .computed()
                    .default_value(json!(""))
                    .describe("Free-form description."),
            )
            .attribute(
                "format",
                computed_string("Media format detected by the service."),
            )
    }

    pub fn flatten(record: Slate) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("id", record.id)?,
            name: Value::Known(record.name),
            r#type: Value::Known(record.r#type),
            url: Value::Known(record.url),
            description: Value::Known(record.description),
            format: Value::Known(record.format),
        })
    }

    pub fn expand(&self) -> Result<SlateInput, ConversionError> {
        Ok(SlateInput {
            name: self.name.required("name")?.clone(),
            description: self.description.or_default(),
            url: self.url.required("url")?.clone(),
        })
    }
}
