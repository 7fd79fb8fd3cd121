//! Managed resources

mod service_ad_insertion;
mod source_adserver;
mod source_live;
mod source_slate;

pub use service_ad_insertion::ServiceAdInsertion;
pub use source_adserver::SourceAdServer;
pub use source_live::SourceLive;
pub use source_slate::SourceSlate;
