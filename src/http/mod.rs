//! HTTP protocol layer module
//!
//! Query string parsing and response building, decoupled from the lookup
//! logic.

pub mod query;
pub mod response;

pub use query::QueryParams;
pub use response::build_json_response;
