//! Request handler module
//!
//! The single lookup route and its response envelope.

pub mod envelope;
pub mod lookup;

pub use lookup::handle_request;
