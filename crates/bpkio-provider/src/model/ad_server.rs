//! `source_adserver` model

use super::{computed_string, id_attribute};
use bpkio_client::{AdServer, AdServerInput, CUSTOM_TEMPLATE, QueryParam};
use bpkio_plugin::{Attribute, ConversionError, Schema, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const QUERY_PARAMETER_TYPES: [&str; 5] = [
    "from-query-parameter",
    "from-variable",
    "from-header",
    "forward",
    "custom",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParameterModel {
    pub r#type: Value<String>,
    pub name: Value<String>,
    pub value: Value<String>,
}

impl QueryParameterModel {
    pub fn schema() -> Schema {
        Schema::nested()
            .attribute(
                "type",
                Attribute::string()
                    .required()
                    .one_of(QUERY_PARAMETER_TYPES)
                    .describe(
                        "Where the value comes from: from-query-parameter, from-variable, \
                         from-header, forward or custom.",
                    ),
            )
            .attribute(
                "name",
                Attribute::string()
                    .required()
                    .describe("Name of the query parameter."),
            )
            .attribute(
                "value",
                Attribute::string()
                    .required()
                    .describe("Value, or the name of the variable or header to read it from."),
            )
    }

    pub fn flatten(param: QueryParam) -> Self {
        Self {
            r#type: Value::Known(param.r#type),
            name: Value::Known(param.name),
            value: Value::Known(param.value),
        }
    }

    pub fn expand(&self) -> Result<QueryParam, ConversionError> {
        Ok(QueryParam {
            r#type: self.r#type.required("query_parameters.type")?.clone(),
            name: self.name.required("query_parameters.name")?.clone(),
            value: self.value.required("query_parameters.value")?.clone(),
        })
    }
}

/// Ordered API list to state; no parameters reads as null
pub(crate) fn flatten_query_parameters(params: Vec<QueryParam>) -> Value<Vec<QueryParameterModel>> {
    Value::non_empty(params.into_iter().map(QueryParameterModel::flatten).collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdServerModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
    pub description: Value<String>,
    pub queries: Value<String>,
    pub query_parameters: Value<Vec<QueryParameterModel>>,
}

impl AdServerModel {
    pub fn schema() -> Schema {
        Schema::new("Ad server used as a source of ads by ad insertion services.")
            .attribute("id", id_attribute("Identifier of the ad server."))
            .attribute(
                "name",
                Attribute::string()
                    .required()
                    .describe("Name of the ad server."),
            )
            .attribute("type", computed_string("Source type, always `ad-server`."))
            .attribute(
                "url",
                Attribute::string()
                    .required()
                    .describe("Base URL of the ad server."),
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
                "queries",
                Attribute::string()
                    .optional()
                    .computed()
                    .default_value(json!(""))
                    .deprecated(
                        "This attribute will be removed in a future version. \
                         Use 'query_parameters' instead.",
                    )
                    .describe("Raw query string appended to ad requests."),
            )
            .attribute(
                "query_parameters",
                Attribute::list_nested(QueryParameterModel::schema())
                    .optional()
                    .computed()
                    .describe("Query parameters appended to ad requests, in order."),
            )
    }

    pub fn flatten(record: AdServer) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("id", record.id)?,
            name: Value::Known(record.name),
            r#type: Value::Known(record.r#type),
            url: Value::Known(record.url),
            description: Value::Known(record.description),
            queries: Value::Known(record.queries),
            query_parameters: flatten_query_parameters(record.query_parameters),
        })
    }

    pub fn expand(&self) -> Result<AdServerInput, ConversionError> {
        let query_parameters = match &self.query_parameters {
            Value::Known(params) => params
                .iter()
                .map(QueryParameterModel::expand)
                .collect::<Result<Vec<_>, _>>()?,
            _ => Vec::new(),
        };

        Ok(AdServerInput {
            name: self.name.required("name")?.clone(),
            description: self.description.or_default(),
            url: self.url.required("url")?.clone(),
            queries: self.queries.or_default(),
            query_parameters,
            template: CUSTOM_TEMPLATE.to_string(),
        })
    }
}
