pub mod catalog;
pub mod config;
pub mod error;
pub mod fallback;
pub mod http;
pub mod logging;
pub mod orchestrator;
pub mod source;
pub mod types;

pub use catalog::{ConverterId, ResourceKey};
pub use config::ContentConfig;
pub use error::{FetchError, FetchResult};
pub use http::HttpSource;
pub use orchestrator::{Orchestrator, ResourceState, Snapshot};
pub use source::{ContentSource, Envelope};
pub use types::{AdInventory, AdRecord, CompanyProfile, ConverterContent, HomeContent, Payload, SeoProfile};
