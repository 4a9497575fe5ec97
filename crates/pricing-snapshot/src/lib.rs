pub mod errors;
pub mod metadata;
pub mod request;
pub mod response;

pub use errors::SnapshotError;
pub use metadata::SnapshotMetadata;
pub use request::{build_request, to_json, PricingRequest, FORMAT_ID, FORMAT_VERSION};
pub use response::{parse_response, PricingOutcome};
