//! Data sources

mod lookup;
mod services;
mod sources;
mod transcoding_profiles;

pub use lookup::Lookup;
pub use services::Services;
pub use sources::Sources;
pub use transcoding_profiles::{TranscodingProfile, TranscodingProfiles};
