//! Pipeline services for the Ferry ETA Service

pub mod eta_policy;
pub mod geo;
pub mod merge;
pub mod payload;
pub mod pipeline;

pub use geo::GeoIndex;
pub use merge::ResultMerger;
pub use payload::PayloadBuilder;
pub use pipeline::EtaPipeline;
