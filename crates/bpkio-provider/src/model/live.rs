//! `source_live` model

use super::{computed_string, id_attribute};
use bpkio_client::{CustomHeader, Live, LiveInput, Origin};
use bpkio_plugin::{Attribute, ConversionError, Schema, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomHeaderModel {
    pub name: Value<String>,
    pub value: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginModel {
    pub custom_headers: Value<Vec<CustomHeaderModel>>,
}

impl OriginModel {
    pub fn schema() -> Schema {
        let header = Schema::nested()
            .attribute(
                "name",
                Attribute::string().required().describe("Header name."),
            )
            .attribute(
                "value",
                Attribute::string().required().describe("Header value."),
            );
        Schema::nested().attribute(
            "custom_headers",
            Attribute::list_nested(header)
                .optional()
                .describe("Headers sent with every request to the origin."),
        )
    }

    /// An origin without custom headers reads as null
    pub fn flatten(origin: Origin) -> Value<Self> {
        if origin.custom_headers.is_empty() {
            return Value::Null;
        }
        let headers = origin
            .custom_headers
            .into_iter()
            .map(|h| CustomHeaderModel {
                name: Value::Known(h.name),
                value: Value::Known(h.value),
            })
            .collect();
        Value::Known(Self {
            custom_headers: Value::Known(headers),
        })
    }

    pub fn expand(origin: &Value<Self>) -> Result<Origin, ConversionError> {
        let Some(Value::Known(headers)) = origin.optional().map(|o| &o.custom_headers) else {
            return Ok(Origin::default());
        };
        let custom_headers = headers
            .iter()
            .map(|h| {
                Ok(CustomHeader {
                    name: h.name.required("origin.custom_headers.name")?.clone(),
                    value: h.value.required("origin.custom_headers.value")?.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConversionError>>()?;
        Ok(Origin { custom_headers })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
    pub description: Value<String>,
    pub format: Value<String>,
    pub multi_period: Value<bool>,
    pub origin: Value<OriginModel>,
}

impl LiveModel {
    pub fn schema() -> Schema {
        Schema::new("Live source: a linear stream served from an origin.")
            .attribute("id", id_attribute("Identifier of the live source."))
            .attribute(
                "name",
                Attribute::string()
                    .required()
                    .describe("Name of the live source."),
            )
            .attribute("type", computed_string("Source type, always `live`."))
            .attribute(
                "url",
                Attribute::string()
                    .required()
                    .describe("URL of the live stream manifest."),
            )
            .attribute(
                "format",
                computed_string("Stream format detected by the service."),
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
                "multi_period",
                Attribute::bool()
                    .optional()
                    .computed()
                    .default_value(json!(false))
                    .describe("Whether the stream uses multiple DASH periods. Defaults to `false`."),
            )
            .attribute(
                "origin",
                Attribute::single_nested(OriginModel::schema())
                    .optional()
                    .computed()
                    .describe("How the service reaches the origin."),
            )
    }

    pub fn flatten(record: Live) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("id", record.id)?,
            name: Value::Known(record.name),
            r#type: Value::Known(record.r#type),
            url: Value::Known(record.url),
            description: Value::Known(record.description),
            format: Value::Known(record.format),
            multi_period: Value::Known(record.multi_period),
            origin: OriginModel::flatten(record.origin),
        })
    }

    pub fn expand(&self) -> Result<LiveInput, ConversionError> {
        Ok(LiveInput {
            name: self.name.required("name")?.clone(),
            description: self.description.or_default(),
            url: self.url.required("url")?.clone(),
            multi_period: self.multi_period.or_default(),
            origin: OriginModel::expand(&self.origin)?,
        })
    }
}
