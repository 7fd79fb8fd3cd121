//! Models of the list data sources

use super::transcoding_profile::TranscodingProfileModel;
use bpkio_client::{Service, Source};
use bpkio_plugin::{Attribute, AttributeKind, ConversionError, Schema, Value};
use serde::{Deserialize, Serialize};

pub const SOURCE_TYPES: [&str; 5] = ["live", "asset", "asset-catalog", "slate", "ad-server"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSummaryModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
}

impl SourceSummaryModel {
    fn flatten(source: Source) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("sources.id", source.id)?,
            name: Value::Known(source.name),
            r#type: Value::Known(source.r#type),
            url: Value::Known(source.url),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesModel {
    /// Filter
    pub r#type: Value<String>,
    pub sources: Value<Vec<SourceSummaryModel>>,
}

impl SourcesModel {
    pub fn schema() -> Schema {
        let source = Schema::nested()
            .attribute("id", Attribute::int64().computed())
            .attribute("name", Attribute::string().computed())
            .attribute("type", Attribute::string().computed())
            .attribute("url", Attribute::string().computed());

        Schema::new("Lists the sources of the account, optionally of one type only.")
            .attribute(
                "type",
                Attribute::string()
                    .optional()
                    .one_of(SOURCE_TYPES)
                    .describe("Only list sources of this type."),
            )
            .attribute(
                "sources",
                Attribute::list_nested(source)
                    .computed()
                    .describe("Matching sources, in API order."),
            )
    }

    /// Keeps the sources matching the filter; the list is never null
    pub fn with_sources(mut self, sources: Vec<Source>) -> Result<Self, ConversionError> {
        let wanted = self.r#type.optional().filter(|t| !t.is_empty()).cloned();
        let sources = sources
            .into_iter()
            .filter(|s| wanted.as_ref().is_none_or(|t| &s.r#type == t))
            .map(SourceSummaryModel::flatten)
            .collect::<Result<Vec<_>, _>>()?;
        self.sources = Value::Known(sources);
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSummaryModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
    pub creation_date: Value<String>,
    pub update_date: Value<String>,
    pub state: Value<String>,
    pub tags: Value<Vec<String>>,
}

impl ServiceSummaryModel {
    fn flatten(service: Service) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("services.id", service.id)?,
            name: Value::Known(service.name),
            r#type: Value::Known(service.r#type),
            url: Value::Known(service.url),
            creation_date: Value::Known(service.creation_date),
            update_date: Value::Known(service.update_date),
            state: Value::Known(service.state),
            tags: Value::Known(service.tags),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesModel {
    pub r#type: Value<String>,
    pub state: Value<String>,
    pub services: Value<Vec<ServiceSummaryModel>>,
}

impl ServicesModel {
    pub fn schema() -> Schema {
        let service = Schema::nested()
            .attribute("id", Attribute::int64().computed())
            .attribute("name", Attribute::string().computed())
            .attribute("type", Attribute::string().computed())
            .attribute("url", Attribute::string().computed())
            .attribute("creation_date", Attribute::string().computed())
            .attribute("update_date", Attribute::string().computed())
            .attribute("state", Attribute::string().computed())
            .attribute("tags", Attribute::list(AttributeKind::String).computed());

        Schema::new("Lists the services of the account.")
            .attribute(
                "type",
                Attribute::string()
                    .optional()
                    .describe("Only list services of this type, e.g. `ad-insertion`."),
            )
            .attribute(
                "state",
                Attribute::string()
                    .optional()
                    .describe("Only list services in this state, e.g. `enabled`."),
            )
            .attribute(
                "services",
                Attribute::list_nested(service)
                    .computed()
                    .describe("Matching services, in API order."),
            )
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Result<Self, ConversionError> {
        let wanted_type = self.r#type.optional().filter(|t| !t.is_empty()).cloned();
        let wanted_state = self.state.optional().filter(|s| !s.is_empty()).cloned();
        let services = services
            .into_iter()
            .filter(|s| wanted_type.as_ref().is_none_or(|t| &s.r#type == t))
            .filter(|s| wanted_state.as_ref().is_none_or(|st| &s.state == st))
            .map(ServiceSummaryModel::flatten)
            .collect::<Result<Vec<_>, _>>()?;
        self.services = Value::Known(services);
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodingProfilesModel {
    pub profiles: Value<Vec<TranscodingProfileModel>>,
}

impl TranscodingProfilesModel {
    pub fn schema() -> Schema {
        Schema::new("Lists the transcoding profiles of the account.").attribute(
            "profiles",
            Attribute::list_nested(TranscodingProfileModel::schema().read_only())
                .computed()
                .describe("Transcoding profiles, in API order."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: u64, kind: &str) -> Source {
        Source {
            id,
            name: format!("source-{id}"),
            r#type: kind.to_string(),
            ..Source::default()
        }
    }

    #[test]
    fn test_type_filter() {
        let all = vec![source(1, "live"), source(2, "slate"), source(3, "live")];

        let model = SourcesModel::default().with_sources(all.clone()).unwrap();
        assert_eq!(model.sources.optional().unwrap().len(), 3);

        let model = SourcesModel {
            r#type: "live".into(),
            ..SourcesModel::default()
        }
        .with_sources(all)
        .unwrap();
        let ids: Vec<_> = model
            .sources
            .optional()
            .unwrap()
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(ids, vec![Value::Known(1), Value::Known(3)]);
    }

    #[test]
    fn test_no_match_is_empty_not_null() {
        let model = SourcesModel {
            r#type: "asset".into(),
            ..SourcesModel::default()
        }
        .with_sources(vec![source(1, "live")])
        .unwrap();
        assert_eq!(model.sources, Value::Known(vec![]));
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            serde_json::json!({"type": "asset", "sources": []})
        );
    }

    #[test]
    fn test_service_filters() {
        let services = vec![
            Service {
                id: 1,
                r#type: "ad-insertion".into(),
                state: "enabled".into(),
                ..Service::default()
            },
            Service {
                id: 2,
                r#type: "ad-insertion".into(),
                state: "paused".into(),
                ..Service::default()
            },
            Service {
                id: 3,
                r#type: "content-replacement".into(),
                state: "enabled".into(),
                ..Service::default()
            },
        ];
        let model = ServicesModel {
            r#type: "ad-insertion".into(),
            state: "enabled".into(),
            ..ServicesModel::default()
        }
        .with_services(services)
        .unwrap();
        let listed = model.services.optional().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, Value::Known(1));
    }
}
