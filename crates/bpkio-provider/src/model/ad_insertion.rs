//! `service_ad_insertion` model
//!
//! Linked objects (source, profile, ad servers, gap filler) are configured by
//! ID only; their remaining attributes are filled in from the expanded
//! objects the API returns. A linked block whose ID is zero in the response
//! reads as null, never as an empty object.

use super::ad_server::{QueryParameterModel, flatten_query_parameters};
use super::live::OriginModel;
use super::transcoding_profile::TranscodingProfileModel;
use super::{computed_string, id_attribute, linked};
use bpkio_client::{
    AdInsertion, AdInsertionInput, AdServer, AdvancedOptions, AuthorizationHeader, Identifiable,
    LiveAdPreRoll, LiveAdPreRollInput, LiveAdReplacement, LiveAdReplacementInput,
    ServerSideAdTracking, Slate, Source, SpotAware,
};
use bpkio_plugin::{Attribute, AttributeKind, ConversionError, Schema, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const SPOT_AWARE_MODES: [&str; 3] = ["french_addressable_tv", "spot_to_live", "disabled"];

fn identify(id: &Value<i64>, attribute: &str) -> Result<Identifiable, ConversionError> {
    Ok(Identifiable {
        id: id.required_u64(attribute)?,
    })
}

fn linked_id(description: &str) -> Attribute {
    Attribute::int64().required().describe(description)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedSourceModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
    pub description: Value<String>,
    pub format: Value<String>,
    pub multi_period: Value<bool>,
    pub origin: Value<OriginModel>,
}

impl LinkedSourceModel {
    fn schema() -> Schema {
        Schema::nested()
            .attribute("id", linked_id("Identifier of the source to insert ads into."))
            .attribute("name", computed_string("Name of the source."))
            .attribute("type", computed_string("Type of the source."))
            .attribute("url", computed_string("URL of the source."))
            .attribute("description", computed_string("Description of the source."))
            .attribute("format", computed_string("Format of the source."))
            .attribute(
                "multi_period",
                Attribute::bool()
                    .computed()
                    .use_state_for_unknown()
                    .describe("Whether the source uses multiple periods."),
            )
            .attribute(
                "origin",
                Attribute::single_nested(OriginModel::schema().read_only())
                    .computed()
                    .use_state_for_unknown()
                    .describe("Origin settings of the source."),
            )
    }

    fn flatten(source: Source) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("source.id", source.id)?,
            name: Value::Known(source.name),
            r#type: Value::Known(source.r#type),
            url: Value::Known(source.url),
            description: Value::Known(source.description),
            format: Value::Known(source.format),
            multi_period: Value::Known(source.multi_period),
            origin: OriginModel::flatten(source.origin),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedAdServerModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
    pub query_parameters: Value<Vec<QueryParameterModel>>,
}

impl LinkedAdServerModel {
    fn schema() -> Schema {
        Schema::nested()
            .attribute("id", linked_id("Identifier of the ad server."))
            .attribute("name", computed_string("Name of the ad server."))
            .attribute("type", computed_string("Type of the ad server."))
            .attribute("url", computed_string("URL of the ad server."))
            .attribute(
                "query_parameters",
                Attribute::list_nested(QueryParameterModel::schema().read_only())
                    .computed()
                    .use_state_for_unknown()
                    .describe("Query parameters of the ad server."),
            )
    }

    fn flatten(ad_server: AdServer) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("ad_server.id", ad_server.id)?,
            name: Value::Known(ad_server.name),
            r#type: Value::Known(ad_server.r#type),
            url: Value::Known(ad_server.url),
            query_parameters: flatten_query_parameters(ad_server.query_parameters),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapFillerModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
}

impl GapFillerModel {
    fn schema() -> Schema {
        Schema::nested()
            .attribute("id", linked_id("Identifier of the slate used as gap filler."))
            .attribute("name", computed_string("Name of the slate."))
            .attribute("type", computed_string("Type of the slate."))
            .attribute("url", computed_string("URL of the slate."))
    }

    fn flatten(slate: Slate) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Value::from_u64("gap_filler.id", slate.id)?,
            name: Value::Known(slate.name),
            r#type: Value::Known(slate.r#type),
            url: Value::Known(slate.url),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotAwareModel {
    pub mode: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveAdPrerollModel {
    pub ad_server: Value<LinkedAdServerModel>,
    pub max_duration: Value<i64>,
    pub offset: Value<i64>,
}

impl LiveAdPrerollModel {
    fn schema() -> Schema {
        Schema::nested()
            .attribute(
                "ad_server",
                Attribute::single_nested(LinkedAdServerModel::schema())
                    .optional()
                    .describe("Ad server queried for pre-roll ads."),
            )
            .attribute(
                "max_duration",
                Attribute::int64()
                    .optional()
                    .computed()
                    .use_state_for_unknown()
                    .describe("Maximum pre-roll duration in seconds."),
            )
            .attribute(
                "offset",
                Attribute::int64()
                    .optional()
                    .computed()
                    .use_state_for_unknown()
                    .describe("Offset in seconds applied to the pre-roll."),
            )
    }

    /// Null unless an ad server is linked
    fn flatten(preroll: Option<LiveAdPreRoll>) -> Result<Value<Self>, ConversionError> {
        let Some(preroll) = preroll else {
            return Ok(Value::Null);
        };
        let Some(ad_server) = preroll.ad_server.filter(|a| a.id != 0) else {
            return Ok(Value::Null);
        };
        Ok(Value::Known(Self {
            ad_server: Value::Known(LinkedAdServerModel::flatten(ad_server)?),
            max_duration: Value::from_u64("live_ad_preroll.max_duration", preroll.max_duration)?,
            offset: Value::from_u64("live_ad_preroll.offset", preroll.offset)?,
        }))
    }

    fn expand(&self) -> Result<LiveAdPreRollInput, ConversionError> {
        Ok(LiveAdPreRollInput {
            ad_server: self
                .ad_server
                .optional()
                .map(|a| identify(&a.id, "live_ad_preroll.ad_server.id"))
                .transpose()?,
            max_duration: self.max_duration.to_u64("live_ad_preroll.max_duration")?,
            offset: self.offset.to_u64("live_ad_preroll.offset")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveAdReplacementModel {
    pub ad_server: Value<LinkedAdServerModel>,
    pub gap_filler: Value<GapFillerModel>,
    pub spot_aware: Value<SpotAwareModel>,
}

impl LiveAdReplacementModel {
    fn schema() -> Schema {
        let spot_aware = Schema::nested().attribute(
            "mode",
            Attribute::string()
                .optional()
                .computed()
                .default_value(json!("disabled"))
                .one_of(SPOT_AWARE_MODES)
                .describe("Spot-aware mode: french_addressable_tv, spot_to_live or disabled."),
        );
        Schema::nested()
            .attribute(
                "ad_server",
                Attribute::single_nested(LinkedAdServerModel::schema())
                    .optional()
                    .describe("Ad server queried for replacement ads."),
            )
            .attribute(
                "gap_filler",
                Attribute::single_nested(GapFillerModel::schema())
                    .optional()
                    .describe("Slate shown when there are not enough ads to fill a break."),
            )
            .attribute(
                "spot_aware",
                Attribute::single_nested(spot_aware)
                    .optional()
                    .describe("Spot-aware ad replacement settings."),
            )
    }

    /// Null unless an ad server is linked
    fn flatten(replacement: Option<LiveAdReplacement>) -> Result<Value<Self>, ConversionError> {
        let Some(replacement) = replacement else {
            return Ok(Value::Null);
        };
        let Some(ad_server) = replacement.ad_server.filter(|a| a.id != 0) else {
            return Ok(Value::Null);
        };
        let gap_filler = match replacement.gap_filler {
            Some(slate) => linked(slate.id, || GapFillerModel::flatten(slate))?,
            None => Value::Null,
        };
        let spot_aware = match replacement.spot_aware {
            Some(spot) if !spot.mode.is_empty() => Value::Known(SpotAwareModel {
                mode: Value::Known(spot.mode),
            }),
            _ => Value::Null,
        };
        Ok(Value::Known(Self {
            ad_server: Value::Known(LinkedAdServerModel::flatten(ad_server)?),
            gap_filler,
            spot_aware,
        }))
    }

    fn expand(&self) -> Result<LiveAdReplacementInput, ConversionError> {
        Ok(LiveAdReplacementInput {
            ad_server: self
                .ad_server
                .optional()
                .map(|a| identify(&a.id, "live_ad_replacement.ad_server.id"))
                .transpose()?,
            gap_filler: self
                .gap_filler
                .optional()
                .map(|g| identify(&g.id, "live_ad_replacement.gap_filler.id"))
                .transpose()?,
            spot_aware: self
                .spot_aware
                .optional()
                .and_then(|s| s.mode.optional())
                .map(|mode| SpotAware { mode: mode.clone() }),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSideAdTrackingModel {
    pub enable: Value<bool>,
    pub check_ad_media_segment_availability: Value<bool>,
}

impl ServerSideAdTrackingModel {
    fn schema() -> Schema {
        Schema::nested()
            .attribute(
                "enable",
                Attribute::bool()
                    .optional()
                    .computed()
                    .default_value(json!(true))
                    .describe("Whether ad impressions are tracked server side."),
            )
            .attribute(
                "check_ad_media_segment_availability",
                Attribute::bool()
                    .optional()
                    .computed()
                    .default_value(json!(false))
                    .describe("Whether ad media segments are checked before tracking."),
            )
    }

    fn flatten(tracking: ServerSideAdTracking) -> Self {
        Self {
            enable: Value::Known(tracking.enable),
            check_ad_media_segment_availability: Value::Known(
                tracking.check_ad_media_segment_availability,
            ),
        }
    }

    fn expand(&self) -> ServerSideAdTracking {
        ServerSideAdTracking {
            enable: self.enable.optional().copied().unwrap_or(true),
            check_ad_media_segment_availability: self
                .check_ad_media_segment_availability
                .optional()
                .copied()
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizationHeaderModel {
    pub name: Value<String>,
    pub value: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedOptionsModel {
    pub authorization_header: Value<AuthorizationHeaderModel>,
}

impl AdvancedOptionsModel {
    fn schema() -> Schema {
        let header = Schema::nested()
            .attribute(
                "name",
                Attribute::string().optional().describe("Header name."),
            )
            .attribute(
                "value",
                Attribute::string()
                    .optional()
                    .sensitive()
                    .describe("Header value."),
            );
        Schema::nested().attribute(
            "authorization_header",
            Attribute::single_nested(header)
                .optional()
                .sensitive()
                .describe("Authorization header sent to the origin."),
        )
    }

    /// Null unless both header name and value are set
    fn flatten(options: Option<AdvancedOptions>) -> Value<Self> {
        match options.and_then(|o| o.authorization_header) {
            Some(header) if !header.name.is_empty() && !header.value.is_empty() => {
                Value::Known(Self {
                    authorization_header: Value::Known(AuthorizationHeaderModel {
                        name: Value::Known(header.name),
                        value: Value::Known(header.value),
                    }),
                })
            }
            _ => Value::Null,
        }
    }

    fn expand(&self) -> AdvancedOptions {
        AdvancedOptions {
            authorization_header: self.authorization_header.optional().map(|h| {
                AuthorizationHeader {
                    name: h.name.or_default(),
                    value: h.value.or_default(),
                }
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdInsertionModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub r#type: Value<String>,
    pub url: Value<String>,
    pub creation_date: Value<String>,
    pub update_date: Value<String>,
    pub state: Value<String>,
    pub tags: Value<Vec<String>>,
    pub enable_ad_transcoding: Value<bool>,
    pub server_side_ad_tracking: Value<ServerSideAdTrackingModel>,
    pub source: Value<LinkedSourceModel>,
    pub transcoding_profile: Value<TranscodingProfileModel>,
    pub live_ad_preroll: Value<LiveAdPrerollModel>,
    pub live_ad_replacement: Value<LiveAdReplacementModel>,
    pub advanced_options: Value<AdvancedOptionsModel>,
}

impl AdInsertionModel {
    pub fn schema() -> Schema {
        let transcoding_profile = Schema::nested()
            .attribute("id", linked_id("Identifier of the transcoding profile."))
            .attribute("name", computed_string("Name of the profile."))
            .attribute("internal_id", computed_string("Internal identifier of the profile."))
            .attribute("content", computed_string("Profile definition as JSON text."));

        Schema::new("Dynamic ad insertion service for a live source.")
            .attribute("id", id_attribute("Identifier of the service."))
            .attribute(
                "name",
                Attribute::string()
                    .required()
                    .describe("Name of the service."),
            )
            .attribute("type", computed_string("Service type, always `ad-insertion`."))
            .attribute("url", computed_string("Playback URL of the service."))
            .attribute("creation_date", computed_string("When the service was created."))
            .attribute(
                "update_date",
                Attribute::string()
                    .computed()
                    .describe("When the service was last updated."),
            )
            .attribute(
                "state",
                Attribute::string()
                    .computed()
                    .describe("Service state, e.g. `enabled`."),
            )
            .attribute(
                "tags",
                Attribute::list(AttributeKind::String)
                    .optional()
                    .computed()
                    .default_value(json!([]))
                    .describe("Environment tags."),
            )
            .attribute(
                "enable_ad_transcoding",
                Attribute::bool()
                    .optional()
                    .computed()
                    .default_value(json!(true))
                    .describe("Whether ads are transcoded to match the source. Defaults to `true`."),
            )
            .attribute(
                "server_side_ad_tracking",
                Attribute::single_nested(ServerSideAdTrackingModel::schema())
                    .optional()
                    .computed()
                    .use_state_for_unknown()
                    .describe("Server-side ad tracking settings."),
            )
            .attribute(
                "source",
                Attribute::single_nested(LinkedSourceModel::schema())
                    .optional()
                    .describe("Source the ads are inserted into."),
            )
            .attribute(
                "transcoding_profile",
                Attribute::single_nested(transcoding_profile)
                    .optional()
                    .describe("Transcoding profile applied to ads."),
            )
            .attribute(
                "live_ad_preroll",
                Attribute::single_nested(LiveAdPrerollModel::schema())
                    .optional()
                    .describe("Pre-roll inserted when a viewer joins."),
            )
            .attribute(
                "live_ad_replacement",
                Attribute::single_nested(LiveAdReplacementModel::schema())
                    .optional()
                    .describe("Replacement of ad breaks signalled in the stream."),
            )
            .attribute(
                "advanced_options",
                Attribute::single_nested(AdvancedOptionsModel::schema())
                    .optional()
                    .sensitive()
                    .describe("Advanced origin options."),
            )
    }

    pub fn flatten(record: AdInsertion) -> Result<Self, ConversionError> {
        let source = match record.source {
            Some(source) => linked(source.id, || LinkedSourceModel::flatten(source))?,
            None => Value::Null,
        };
        let transcoding_profile = match record.transcoding_profile {
            Some(profile) => linked(profile.id, || TranscodingProfileModel::flatten(profile))?,
            None => Value::Null,
        };

        Ok(Self {
            id: Value::from_u64("id", record.id)?,
            name: Value::Known(record.name),
            r#type: Value::Known(record.r#type),
            url: Value::Known(record.url),
            creation_date: Value::Known(record.creation_date),
            update_date: Value::Known(record.update_date),
            state: Value::Known(record.state),
            tags: Value::Known(record.tags),
            enable_ad_transcoding: Value::Known(record.enable_ad_transcoding),
            server_side_ad_tracking: record
                .server_side_ad_tracking
                .map(ServerSideAdTrackingModel::flatten)
                .into(),
            source,
            transcoding_profile,
            live_ad_preroll: LiveAdPrerollModel::flatten(record.live_ad_pre_roll)?,
            live_ad_replacement: LiveAdReplacementModel::flatten(record.live_ad_replacement)?,
            advanced_options: AdvancedOptionsModel::flatten(record.advanced_options),
        })
    }

    pub fn expand(&self) -> Result<AdInsertionInput, ConversionError> {
        Ok(AdInsertionInput {
            name: self.name.required("name")?.clone(),
            tags: self.tags.or_default(),
            enable_ad_transcoding: self.enable_ad_transcoding.optional().copied(),
            source: self
                .source
                .optional()
                .map(|s| identify(&s.id, "source.id"))
                .transpose()?,
            transcoding_profile: self
                .transcoding_profile
                .optional()
                .map(|p| identify(&p.id, "transcoding_profile.id"))
                .transpose()?,
            live_ad_pre_roll: self
                .live_ad_preroll
                .optional()
                .map(LiveAdPrerollModel::expand)
                .transpose()?,
            live_ad_replacement: self
                .live_ad_replacement
                .optional()
                .map(LiveAdReplacementModel::expand)
                .transpose()?,
            server_side_ad_tracking: self
                .server_side_ad_tracking
                .optional()
                .map(ServerSideAdTrackingModel::expand),
            advanced_options: self
                .advanced_options
                .optional()
                .map(AdvancedOptionsModel::expand),
        })
    }
}
