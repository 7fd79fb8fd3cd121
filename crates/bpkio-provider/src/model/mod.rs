//! State models and their converters
//!
//! Every model mirrors its schema attribute for attribute. `flatten` turns
//! an API record into a model, `expand` turns a planned model into the API
//! payload and only ever reads user-settable attributes.

pub mod ad_insertion;
pub mod ad_server;
pub mod listing;
pub mod live;
pub mod slate;
pub mod transcoding_profile;

pub use ad_insertion::AdInsertionModel;
pub use ad_server::{AdServerModel, QueryParameterModel};
pub use listing::{
    ServiceSummaryModel, ServicesModel, SourceSummaryModel, SourcesModel, TranscodingProfilesModel,
};
pub use live::{CustomHeaderModel, LiveModel, OriginModel};
pub use slate::SlateModel;
pub use transcoding_profile::TranscodingProfileModel;

use bpkio_plugin::{Attribute, ConversionError, Value};

/// Computed identifier that survives plans unchanged
pub(crate) fn id_attribute(description: &str) -> Attribute {
    Attribute::int64()
        .computed()
        .use_state_for_unknown()
        .describe(description)
}

/// Service-computed string that survives plans unchanged
pub(crate) fn computed_string(description: &str) -> Attribute {
    Attribute::string()
        .computed()
        .use_state_for_unknown()
        .describe(description)
}

/// Nested object present only when the remote object it links to is set
pub(crate) fn linked<T>(
    id: u64,
    build: impl FnOnce() -> Result<T, ConversionError>,
) -> Result<Value<T>, ConversionError> {
    if id == 0 {
        Ok(Value::Null)
    } else {
        build().map(Value::Known)
    }
}
