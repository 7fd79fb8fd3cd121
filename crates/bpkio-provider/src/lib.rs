//! broadpeak.io provider
//!
//! Resources:
//!
//! | type | API |
//! |---|---|
//! | `bpkio_source_adserver` | `v1/adservers` |
//! | `bpkio_source_slate` | `v1/sources/slate` |
//! | `bpkio_source_live` | `v1/sources/live` |
//! | `bpkio_service_ad_insertion` | `v1/services/ad-insertion` |
//!
//! Each resource type is also a data source looked up by `id`. The
//! `bpkio_sources`, `bpkio_services` and `bpkio_transcoding_profiles` data
//! sources list objects; `bpkio_transcoding_profile` reads a single profile.

pub mod data_sources;
pub mod model;
pub mod provider;
pub mod resources;

pub use provider::{BpkioProvider, TYPE_NAME};
