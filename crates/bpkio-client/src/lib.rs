//! broadpeak.io REST client
//!
//! Typed bindings for the subset of the broadpeak.io API the provider
//! manages. Every call carries the API key as a bearer token; a 404 answer
//! surfaces as [`ClientError::NotFound`] so callers can tell "gone" apart
//! from other failures.
//!
//! ```text
//! v1/adservers               ad servers
//! v1/sources                 all sources (list)
//! v1/sources/slate           slates
//! v1/sources/live            live sources
//! v1/services                all services (list)
//! v1/services/ad-insertion   ad insertion services
//! v1/transcoding-profiles    transcoding profiles
//! ```

pub mod ad_insertion;
pub mod ad_server;
pub mod client;
pub mod error;
pub mod live;
pub mod service;
pub mod slate;
pub mod source;
pub mod transcoding_profile;

pub use ad_insertion::{
    AdInsertion, AdInsertionInput, AdvancedOptions, AuthorizationHeader, Identifiable,
    LiveAdPreRoll, LiveAdPreRollInput, LiveAdReplacement, LiveAdReplacementInput,
    ServerSideAdTracking, SpotAware,
};
pub use ad_server::{AdServer, AdServerInput, CUSTOM_TEMPLATE, QueryParam};
pub use client::{Client, ClientConfig, DEFAULT_ENDPOINT, PAGE_LIMIT};
pub use error::{ClientError, Result};
pub use live::{CustomHeader, Live, LiveInput, Origin};
pub use service::Service;
pub use slate::{Slate, SlateInput};
pub use source::Source;
pub use transcoding_profile::TranscodingProfile;
